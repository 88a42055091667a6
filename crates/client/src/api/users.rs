use fundportal_core::{ApiResult, UserId};

use crate::gateway::{Call, Gateway};
use crate::types::{User, UserPortfolio};

/// `/users/*` endpoints (admin only).
#[derive(Debug, Clone, Copy)]
pub struct UsersApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> ApiResult<Vec<User>> {
        self.gateway.fetch(Call::get("users/")).await
    }

    pub async fn portfolio(&self, id: UserId) -> ApiResult<UserPortfolio> {
        self.gateway
            .fetch(Call::get(format!("users/{id}/portfolio/")))
            .await
    }
}
