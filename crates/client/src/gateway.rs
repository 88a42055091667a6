//! HTTP gateway with bearer attachment and single-retry token refresh.
//!
//! Every endpoint wrapper funnels through [`Gateway::fetch`]. A request that
//! comes back 401 walks the explicit state machine in [`crate::refresh`]:
//!
//! ```text
//! Initial ──401──▶ Unauthenticated ──▶ Refreshing ──ok──▶ Retrying ──▶ Succeeded
//!    │                                     │                  │
//!    └──────other──▶ Succeeded             └──err──▶ Failed   └──401──▶ Failed
//! ```
//!
//! A request is replayed at most once. A failed refresh tears the session
//! down and sends the navigator to the login route.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use fundportal_auth::{AccessToken, Navigator, RefreshToken, Route, SessionStore};
use fundportal_core::{ApiError, ApiResult, AuthFailure};

use crate::config::ClientConfig;
use crate::refresh::{Phase, RefreshGate};
use crate::types::RefreshResponse;

/// How a call authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallAuth {
    /// Bearer token attached when present; 401 enters the refresh path.
    Bearer,
    /// Login/register/refresh: no refresh path, 401 is returned as-is.
    Public,
}

/// A replayable request description.
#[derive(Debug, Clone)]
pub(crate) struct Call {
    method: Method,
    path: String,
    body: Option<Value>,
    auth: CallAuth,
}

impl Call {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            auth: CallAuth::Bearer,
        }
    }

    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub(crate) fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub(crate) fn public(mut self) -> Self {
        self.auth = CallAuth::Public;
        self
    }

    pub(crate) fn json<B: Serialize>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::schema(self.endpoint(), format!("unserializable body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    pub(crate) fn auth(&self) -> CallAuth {
        self.auth
    }

    /// `"POST /mutual-funds/purchase/"`, used in logs and schema errors.
    pub(crate) fn endpoint(&self) -> String {
        format!("{} /{}", self.method, self.path.trim_start_matches('/'))
    }
}

/// Authenticated client for the portal API. Cheap to clone.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    refresh: RefreshGate,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.inner.base_url)
            .field("session", &self.inner.session.snapshot())
            .finish()
    }
}

impl Gateway {
    pub fn new(
        config: &ClientConfig,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: config.base_url(),
                session,
                navigator,
                refresh: RefreshGate::default(),
            }),
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.inner.session
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Execute a call and decode its body into the endpoint's contract.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, call: Call) -> ApiResult<T> {
        let resp = self.execute(&call).await?;
        decode(&call, resp).await
    }

    /// Execute a call whose success carries no body we care about.
    pub(crate) async fn fetch_empty(&self, call: Call) -> ApiResult<()> {
        let resp = self.execute(&call).await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// Goes straight to the wire: the refresh endpoint never re-enters the
    /// refresh path.
    pub(crate) async fn exchange_refresh(&self, refresh: &RefreshToken) -> ApiResult<RefreshResponse> {
        let call = Call::post("auth/refresh/")
            .public()
            .json(&serde_json::json!({ "refresh": refresh.expose() }))?;
        let resp = self.dispatch(&call, None).await?;
        decode(&call, resp).await.map_err(|err| match err {
            ApiError::Auth(_) | ApiError::Validation(_) => ApiError::Auth(AuthFailure::RefreshRejected),
            other => other,
        })
    }

    async fn execute(&self, call: &Call) -> ApiResult<Response> {
        let endpoint = call.endpoint();
        let mut phase = Phase::Initial;

        loop {
            phase = match phase {
                Phase::Initial => {
                    let token = self.inner.session.access_token();
                    let resp = self.dispatch(call, token.as_ref()).await?;
                    if resp.status() == StatusCode::UNAUTHORIZED && call.auth() == CallAuth::Bearer {
                        Phase::Unauthenticated { rejected: token }
                    } else {
                        Phase::Succeeded(resp)
                    }
                }
                Phase::Unauthenticated { rejected } => {
                    tracing::debug!(%endpoint, "access token rejected; refreshing");
                    Phase::Refreshing { rejected }
                }
                Phase::Refreshing { rejected } => {
                    match self.inner.refresh.refresh(self, rejected.as_ref()).await {
                        Ok(fresh) => Phase::Retrying(fresh),
                        Err(err) => Phase::Failed(err),
                    }
                }
                Phase::Retrying(token) => {
                    let resp = self.dispatch(call, Some(&token)).await?;
                    if resp.status() == StatusCode::UNAUTHORIZED {
                        tracing::warn!(%endpoint, "request still unauthorized after refresh");
                        Phase::Failed(ApiError::Auth(AuthFailure::Unauthorized))
                    } else {
                        Phase::Succeeded(resp)
                    }
                }
                Phase::Succeeded(resp) => return Ok(resp),
                Phase::Failed(err) => return Err(err),
            };
        }
    }

    async fn dispatch(&self, call: &Call, token: Option<&AccessToken>) -> ApiResult<Response> {
        let url = format!("{}/{}", self.inner.base_url, call.path.trim_start_matches('/'));
        tracing::debug!(
            method = %call.method,
            %url,
            authenticated = token.is_some(),
            "dispatching request"
        );

        let mut req = self.inner.http.request(call.method.clone(), &url);
        if let Some(token) = token {
            req = req.bearer_auth(token.expose());
        }
        if let Some(body) = &call.body {
            req = req.json(body);
        }

        req.send().await.map_err(|e| ApiError::network(e.to_string()))
    }

    /// End the session after an unrecoverable refresh failure.
    pub(crate) fn teardown(&self, cause: &ApiError) {
        tracing::warn!(error = %cause, "token refresh failed; ending session");
        self.inner.session.teardown();
        self.inner.navigator.navigate(Route::Login);
    }
}

async fn decode<T: DeserializeOwned>(call: &Call, resp: Response) -> ApiResult<T> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;

    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| ApiError::schema(call.endpoint(), e.to_string()))
}
