//! Wire types: one fixed shape per endpoint.
//!
//! Amounts decode from either decimal strings or JSON numbers (the backend
//! emits both); a missing or mistyped required field is a schema error, never
//! guessed around.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fundportal_auth::{AccessToken, RefreshToken, Role, TokenPair};
use fundportal_core::{
    deserialize_amount, AccountId, Money, PortfolioId, SchemeId, TransactionId, UserId,
};

pub use fundportal_auth::User;

/// `POST /auth/refresh/` response. `refresh` is present only when the server
/// rotates refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshResponse {
    pub access: AccessToken,
    #[serde(default)]
    pub refresh: Option<RefreshToken>,
}

/// Account creation payload for `POST /auth/register/`.
#[derive(Clone, Serialize)]
pub struct RegisterProfile {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl core::fmt::Debug for RegisterProfile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterProfile")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// `POST /auth/register/` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterResponse {
    pub user: User,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Linked bank account; `balance` is the customer's purchasing power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: AccountId,
    pub user: UserId,
    #[serde(default)]
    pub user_username: Option<String>,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub balance: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBankAccount {
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub balance: Money,
}

/// Partial update of the account details; the balance has its own endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BankAccountPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundScheme {
    pub id: SchemeId,
    pub name: String,
    pub scheme_code: String,
    pub description: String,
    pub category: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub nav: Money,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New scheme record (admin).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemeDraft {
    pub name: String,
    pub scheme_code: String,
    pub description: String,
    pub category: String,
    pub nav: Money,
    pub is_active: bool,
}

/// Partial scheme update (admin).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// One holding row: units of one scheme owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    pub id: PortfolioId,
    pub user: UserId,
    pub scheme: SchemeId,
    pub scheme_name: String,
    pub scheme_code: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub units: Money,
    #[serde(deserialize_with = "deserialize_amount")]
    pub invested_amount: Money,
    #[serde(deserialize_with = "deserialize_amount")]
    pub current_nav: Money,
    #[serde(deserialize_with = "deserialize_amount")]
    pub current_value: Money,
    #[serde(deserialize_with = "deserialize_amount")]
    pub profit_loss: Money,
    #[serde(deserialize_with = "deserialize_amount")]
    pub profit_loss_percentage: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `GET /portfolio/summary/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    #[serde(default)]
    pub user: Option<User>,
    pub portfolios: Vec<PortfolioEntry>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_invested: Money,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_current_value: Money,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_profit_loss: Money,
}

impl PortfolioSummary {
    pub fn holdings(&self) -> usize {
        self.portfolios.len()
    }
}

/// `GET /users/:id/portfolio/` (admin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPortfolio {
    pub user: User,
    pub portfolios: Vec<PortfolioEntry>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_invested: Money,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_current_value: Money,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_profit_loss: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user: UserId,
    #[serde(default)]
    pub user_username: Option<String>,
    pub scheme: SchemeId,
    pub scheme_name: String,
    pub transaction_type: TransactionType,
    #[serde(deserialize_with = "deserialize_amount")]
    pub units: Money,
    #[serde(deserialize_with = "deserialize_amount")]
    pub nav_at_transaction: Money,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Money,
    pub transaction_date: DateTime<Utc>,
}

/// `POST /mutual-funds/purchase/` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub units_allotted: Money,
    #[serde(deserialize_with = "deserialize_amount")]
    pub remaining_balance: Money,
    #[serde(default)]
    pub transaction: Option<Transaction>,
    #[serde(default)]
    pub portfolio: Option<PortfolioEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use serde_json::json;

    #[test]
    fn bank_account_accepts_string_balance() {
        let account: BankAccount = serde_json::from_value(json!({
            "id": 4, "user": 3, "user_username": "alice",
            "account_number": "1234567890", "ifsc_code": "HDFC0001234", "bank_name": "HDFC",
            "balance": "300.00",
            "created_at": "2024-05-01T10:00:00.123456Z",
            "updated_at": "2024-05-02T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(account.balance, BigDecimal::from(300));
        assert_eq!(account.id, AccountId::new(4));
    }

    #[test]
    fn summary_accepts_numeric_totals() {
        let summary: PortfolioSummary = serde_json::from_value(json!({
            "portfolios": [],
            "total_invested": 0,
            "total_current_value": 0,
            "total_profit_loss": 0
        }))
        .unwrap();
        assert_eq!(summary.holdings(), 0);
        assert!(summary.user.is_none());
    }

    #[test]
    fn purchase_receipt_keeps_float_amounts_exact() {
        let receipt: PurchaseReceipt = serde_json::from_value(json!({
            "message": "Purchase successful",
            "units_allotted": 7.9397,
            "remaining_balance": 50.1
        }))
        .unwrap();
        assert_eq!(receipt.units_allotted, "7.9397".parse::<BigDecimal>().unwrap());
        assert_eq!(receipt.units_allotted.to_string(), "7.9397");
        assert_eq!(receipt.remaining_balance.to_string(), "50.1");
    }

    #[test]
    fn portfolio_row_keeps_float_amounts_exact() {
        let entry: PortfolioEntry = serde_json::from_value(json!({
            "id": 1, "user": 3, "scheme": 2,
            "scheme_name": "Growth", "scheme_code": "SCH002",
            "units": "7.9397",
            "invested_amount": "100.00",
            "current_nav": "13.10",
            "current_value": 104.01,
            "profit_loss": 4.01,
            "profit_loss_percentage": 4.01,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(entry.current_value.to_string(), "104.01");
        assert_eq!(entry.profit_loss, "4.01".parse::<BigDecimal>().unwrap());

        let rendered = serde_json::to_value(&entry).unwrap();
        assert_eq!(rendered["profit_loss_percentage"], "4.01");
    }

    #[test]
    fn paginated_envelope_is_not_a_summary() {
        let result = serde_json::from_value::<PortfolioSummary>(json!({
            "results": [], "count": 0
        }));
        assert!(result.is_err());
    }

    #[test]
    fn scheme_patch_only_sends_set_fields() {
        let patch = SchemePatch {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "is_active": false }));
    }

    #[test]
    fn register_profile_debug_hides_passwords() {
        let profile = RegisterProfile {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "hunter22".to_string(),
            password2: "hunter22".to_string(),
            first_name: "Bob".to_string(),
            last_name: "Jones".to_string(),
            role: None,
        };
        assert!(!format!("{profile:?}").contains("hunter22"));
        let body = serde_json::to_value(&profile).unwrap();
        assert!(body.get("role").is_none());
        assert_eq!(body["password2"], "hunter22");
    }
}
