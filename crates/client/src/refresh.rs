//! Refresh state machine and the shared in-flight refresh guard.

use reqwest::Response;
use tokio::sync::Mutex;

use fundportal_auth::AccessToken;
use fundportal_core::{ApiError, ApiResult, AuthFailure};

use crate::gateway::Gateway;

/// Where a single request is in its authorization lifecycle.
#[derive(Debug)]
pub(crate) enum Phase {
    /// First dispatch with whatever access token is persisted.
    Initial,
    /// The server answered 401 to `rejected`.
    Unauthenticated { rejected: Option<AccessToken> },
    /// Waiting on (or performing) the refresh exchange.
    Refreshing { rejected: Option<AccessToken> },
    /// Replaying the request once with a fresh token.
    Retrying(AccessToken),
    Succeeded(Response),
    Failed(ApiError),
}

/// Serializes refresh exchanges across every caller of a gateway.
///
/// Requests that fail together wait on one exchange; the ones that acquire
/// the guard after it completed reuse the token it persisted.
#[derive(Debug, Default)]
pub(crate) struct RefreshGate {
    in_flight: Mutex<()>,
}

impl RefreshGate {
    /// Obtain a usable access token after `rejected` drew a 401.
    ///
    /// A failed exchange tears the session down before the guard is
    /// released, so no waiter can start a second exchange with the refresh
    /// token that was just rejected.
    pub(crate) async fn refresh(
        &self,
        gateway: &Gateway,
        rejected: Option<&AccessToken>,
    ) -> ApiResult<AccessToken> {
        let _guard = self.in_flight.lock().await;
        let result = Self::exchange(gateway, rejected).await;
        if let Err(err) = &result {
            gateway.teardown(err);
        }
        result
    }

    async fn exchange(gateway: &Gateway, rejected: Option<&AccessToken>) -> ApiResult<AccessToken> {
        let session = gateway.session();

        if let Some(current) = session.access_token() {
            if rejected != Some(&current) {
                tracing::debug!("access token already refreshed by a concurrent request");
                return Ok(current);
            }
        }

        let refresh = session
            .refresh_token()
            .ok_or(ApiError::Auth(AuthFailure::MissingRefreshToken))?;

        let issued = gateway.exchange_refresh(&refresh).await?;
        session.store_access(&issued.access, issued.refresh.as_ref())?;
        tracing::info!(rotated = issued.refresh.is_some(), "access token refreshed");

        Ok(issued.access)
    }
}
