//! Client-side form checks.
//!
//! These mirror the server's own validation so obviously bad input is
//! rejected before a request is made. The server remains authoritative: a
//! value accepted here may still come back as a validation error.

use bigdecimal::{BigDecimal, Zero};
use serde::Serialize;
use thiserror::Error;

use fundportal_core::{format_inr, parse_amount, truncate_units, ApiError, Money, SchemeId};

use crate::types::{RegisterProfile, SchemeDraft, SchemePatch};

/// Smallest purchase the portal accepts, in rupees.
pub const MIN_INVESTMENT: u32 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Minimum investment amount is ₹100")]
    BelowMinimum,

    #[error("Insufficient balance. You have {}", format_inr(.0))]
    InsufficientBalance(Money),

    #[error("Amount cannot be negative.")]
    NegativeAmount,

    #[error("NAV must be greater than zero.")]
    NonPositiveNav,

    #[error("Password fields didn't match.")]
    PasswordMismatch,

    #[error("This field is required: {0}")]
    MissingField(&'static str),
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        ApiError::validation(err.to_string())
    }
}

fn parse(input: &str) -> Result<Money, FormError> {
    parse_amount(input).ok_or(FormError::InvalidAmount)
}

/// A purchase that passed the client-side checks.
///
/// The purchase endpoint only accepts this type, so an amount below the
/// minimum or above the wallet balance never leaves the process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseOrder {
    scheme_id: SchemeId,
    amount: Money,
}

impl PurchaseOrder {
    pub fn new(scheme_id: SchemeId, amount: &str, available: &Money) -> Result<Self, FormError> {
        let amount = parse(amount)?;
        if amount < BigDecimal::from(MIN_INVESTMENT) {
            return Err(FormError::BelowMinimum);
        }
        if &amount > available {
            return Err(FormError::InsufficientBalance(available.clone()));
        }
        Ok(Self { scheme_id, amount })
    }

    pub fn scheme_id(&self) -> SchemeId {
        self.scheme_id
    }

    pub fn amount(&self) -> &Money {
        &self.amount
    }
}

/// How `update_balance` applies its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BalanceOperation {
    /// Deposit on top of the current balance.
    Add,
    /// Overwrite the balance.
    Set,
}

/// Body of `POST /bank-accounts/:id/update_balance/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceUpdate {
    amount: Money,
    operation: BalanceOperation,
}

impl BalanceUpdate {
    pub fn deposit(amount: &str) -> Result<Self, FormError> {
        let amount = parse(amount)?;
        if amount <= BigDecimal::zero() {
            return Err(FormError::InvalidAmount);
        }
        Ok(Self {
            amount,
            operation: BalanceOperation::Add,
        })
    }

    pub fn set(amount: &str) -> Result<Self, FormError> {
        let amount = parse(amount)?;
        if amount < BigDecimal::zero() {
            return Err(FormError::NegativeAmount);
        }
        Ok(Self {
            amount,
            operation: BalanceOperation::Set,
        })
    }

    pub fn amount(&self) -> &Money {
        &self.amount
    }

    pub fn operation(&self) -> BalanceOperation {
        self.operation
    }
}

/// Body of `POST /mutual-funds/:id/update_nav/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavUpdate {
    nav: Money,
}

impl NavUpdate {
    pub fn new(nav: &str) -> Result<Self, FormError> {
        let nav = parse(nav)?;
        check_nav(&nav)?;
        Ok(Self { nav })
    }

    pub fn nav(&self) -> &Money {
        &self.nav
    }
}

fn check_nav(nav: &Money) -> Result<(), FormError> {
    if nav <= &BigDecimal::zero() {
        return Err(FormError::NonPositiveNav);
    }
    Ok(())
}

fn require(value: &str, name: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::MissingField(name));
    }
    Ok(())
}

impl SchemeDraft {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.name, "name")?;
        require(&self.scheme_code, "scheme_code")?;
        require(&self.category, "category")?;
        check_nav(&self.nav)
    }
}

impl SchemePatch {
    pub fn validate(&self) -> Result<(), FormError> {
        match &self.nav {
            Some(nav) => check_nav(nav),
            None => Ok(()),
        }
    }
}

impl RegisterProfile {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.username, "username")?;
        require(&self.email, "email")?;
        require(&self.password, "password")?;
        if self.password != self.password2 {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Units a purchase of `amount` would allot at `nav`, rounded down to four
/// decimals like the server does.
pub fn preview_units(amount: &Money, nav: &Money) -> Option<Money> {
    if nav <= &BigDecimal::zero() {
        return None;
    }
    Some(truncate_units(&(amount / nav)))
}

/// Wallet balance left after spending `amount`.
pub fn balance_after(balance: &Money, amount: &Money) -> Money {
    balance - amount
}
