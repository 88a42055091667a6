use fundportal_core::{ApiResult, SchemeId};

use crate::forms::{NavUpdate, PurchaseOrder};
use crate::gateway::{Call, Gateway};
use crate::types::{FundScheme, PurchaseReceipt, SchemeDraft, SchemePatch};

/// `/mutual-funds/*` endpoints.
///
/// Customers only ever see active schemes; writes are admin-only and come
/// back as [`fundportal_core::ApiError::Forbidden`] otherwise.
#[derive(Debug, Clone, Copy)]
pub struct FundsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> FundsApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> ApiResult<Vec<FundScheme>> {
        self.gateway.fetch(Call::get("mutual-funds/")).await
    }

    pub async fn get(&self, id: SchemeId) -> ApiResult<FundScheme> {
        self.gateway.fetch(Call::get(format!("mutual-funds/{id}/"))).await
    }

    pub async fn create(&self, draft: &SchemeDraft) -> ApiResult<FundScheme> {
        draft.validate()?;
        let call = Call::post("mutual-funds/").json(draft)?;
        self.gateway.fetch(call).await
    }

    pub async fn update(&self, id: SchemeId, patch: &SchemePatch) -> ApiResult<FundScheme> {
        patch.validate()?;
        let call = Call::patch(format!("mutual-funds/{id}/")).json(patch)?;
        self.gateway.fetch(call).await
    }

    pub async fn delete(&self, id: SchemeId) -> ApiResult<()> {
        self.gateway
            .fetch_empty(Call::delete(format!("mutual-funds/{id}/")))
            .await
    }

    pub async fn update_nav(&self, id: SchemeId, nav: &NavUpdate) -> ApiResult<FundScheme> {
        let call = Call::post(format!("mutual-funds/{id}/update_nav/")).json(nav)?;
        self.gateway.fetch(call).await
    }

    /// Buy units. The order has already passed the minimum and balance
    /// checks; the server repeats them.
    pub async fn purchase(&self, order: &PurchaseOrder) -> ApiResult<PurchaseReceipt> {
        let call = Call::post("mutual-funds/purchase/").json(order)?;
        let receipt: PurchaseReceipt = self.gateway.fetch(call).await?;
        tracing::info!(
            scheme_id = %order.scheme_id(),
            amount = %order.amount(),
            units = %receipt.units_allotted,
            "purchase completed"
        );
        Ok(receipt)
    }
}
