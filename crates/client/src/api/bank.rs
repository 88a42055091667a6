use fundportal_core::{AccountId, ApiResult};

use crate::forms::BalanceUpdate;
use crate::gateway::{Call, Gateway};
use crate::types::{BankAccount, BankAccountPatch, NewBankAccount};

/// `/bank-accounts/*` endpoints. Customers see only their own account.
#[derive(Debug, Clone, Copy)]
pub struct BankApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> BankApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// The caller's linked account, if one exists.
    pub async fn get_mine(&self) -> ApiResult<Option<BankAccount>> {
        let accounts: Vec<BankAccount> = self.gateway.fetch(Call::get("bank-accounts/")).await?;
        Ok(accounts.into_iter().next())
    }

    pub async fn create(&self, account: &NewBankAccount) -> ApiResult<BankAccount> {
        let call = Call::post("bank-accounts/").json(account)?;
        self.gateway.fetch(call).await
    }

    pub async fn update(&self, id: AccountId, patch: &BankAccountPatch) -> ApiResult<BankAccount> {
        let call = Call::patch(format!("bank-accounts/{id}/")).json(patch)?;
        self.gateway.fetch(call).await
    }

    pub async fn delete(&self, id: AccountId) -> ApiResult<()> {
        self.gateway
            .fetch_empty(Call::delete(format!("bank-accounts/{id}/")))
            .await
    }

    /// Deposit into or overwrite the balance; returns the updated account.
    pub async fn update_balance(&self, id: AccountId, update: &BalanceUpdate) -> ApiResult<BankAccount> {
        let call = Call::post(format!("bank-accounts/{id}/update_balance/")).json(update)?;
        self.gateway.fetch(call).await
    }
}
