use fundportal_core::ApiResult;

use crate::gateway::{Call, Gateway};
use crate::types::{PortfolioEntry, PortfolioSummary};

#[derive(Debug, Clone, Copy)]
pub struct PortfolioApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> PortfolioApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> ApiResult<Vec<PortfolioEntry>> {
        self.gateway.fetch(Call::get("portfolio/")).await
    }

    pub async fn summary(&self) -> ApiResult<PortfolioSummary> {
        self.gateway.fetch(Call::get("portfolio/summary/")).await
    }
}
