//! Typed endpoint groups.
//!
//! Each group is a thin borrow of the [`Gateway`]; it fixes the path, the
//! request body and the response contract of every endpoint and nothing
//! else. Obtain one with e.g. `gateway.funds()`.

mod auth;
mod bank;
mod funds;
mod portfolio;
mod transactions;
mod users;

pub use auth::AuthApi;
pub use bank::BankApi;
pub use funds::FundsApi;
pub use portfolio::PortfolioApi;
pub use transactions::TransactionsApi;
pub use users::UsersApi;

use crate::gateway::Gateway;

impl Gateway {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn bank(&self) -> BankApi<'_> {
        BankApi::new(self)
    }

    pub fn funds(&self) -> FundsApi<'_> {
        FundsApi::new(self)
    }

    pub fn portfolio(&self) -> PortfolioApi<'_> {
        PortfolioApi::new(self)
    }

    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }
}
