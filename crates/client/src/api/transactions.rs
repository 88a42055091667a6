use fundportal_core::ApiResult;

use crate::gateway::{Call, Gateway};
use crate::types::Transaction;

#[derive(Debug, Clone, Copy)]
pub struct TransactionsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> TransactionsApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Newest first; admins see every user's transactions.
    pub async fn list(&self) -> ApiResult<Vec<Transaction>> {
        self.gateway.fetch(Call::get("transactions/")).await
    }
}
