//! Composed read views for the two home routes.

use bigdecimal::{BigDecimal, Zero};
use serde::Serialize;

use fundportal_core::{ApiResult, Money};

use crate::gateway::Gateway;
use crate::types::{BankAccount, PortfolioSummary};

/// What `/dashboard` shows a customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerDashboard {
    pub account: Option<BankAccount>,
    pub summary: PortfolioSummary,
}

impl CustomerDashboard {
    /// Wallet and holdings are fetched concurrently.
    pub async fn load(gateway: &Gateway) -> ApiResult<Self> {
        let bank = gateway.bank();
        let portfolio = gateway.portfolio();
        let (account, summary) = tokio::try_join!(bank.get_mine(), portfolio.summary())?;
        Ok(Self { account, summary })
    }

    /// Available balance; zero until a bank account is linked.
    pub fn balance(&self) -> Money {
        self.account
            .as_ref()
            .map(|a| a.balance.clone())
            .unwrap_or_else(BigDecimal::zero)
    }

    pub fn has_account(&self) -> bool {
        self.account.is_some()
    }
}

/// Counters on `/admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminOverview {
    pub total_schemes: usize,
    pub active_schemes: usize,
    /// Customer accounts; every account when none carries the customer role.
    pub total_users: usize,
}

impl AdminOverview {
    pub async fn load(gateway: &Gateway) -> ApiResult<Self> {
        let funds = gateway.funds();
        let users = gateway.users();
        let (schemes, users) = tokio::try_join!(funds.list(), users.list())?;
        let customers = users.iter().filter(|u| u.is_customer()).count();
        Ok(Self {
            total_schemes: schemes.len(),
            active_schemes: schemes.iter().filter(|s| s.is_active).count(),
            total_users: if customers > 0 { customers } else { users.len() },
        })
    }
}
