use serde_json::json;

use fundportal_auth::{AccessToken, RefreshToken, TokenPair, User};
use fundportal_core::{ApiError, ApiResult, AuthFailure};

use crate::gateway::{Call, Gateway};
use crate::types::{RegisterProfile, RegisterResponse};

/// `/auth/*` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Exchange credentials for a token pair. A 401 here means the
    /// credentials were wrong, not that a session expired.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenPair> {
        let call = Call::post("auth/login/")
            .public()
            .json(&json!({ "username": username, "password": password }))?;
        self.gateway.fetch(call).await.map_err(|err| match err {
            ApiError::Auth(AuthFailure::Unauthorized) => {
                ApiError::Auth(AuthFailure::InvalidCredentials)
            }
            other => other,
        })
    }

    pub async fn register(&self, profile: &RegisterProfile) -> ApiResult<RegisterResponse> {
        let call = Call::post("auth/register/").public().json(profile)?;
        self.gateway.fetch(call).await
    }

    pub async fn me(&self) -> ApiResult<User> {
        self.gateway.fetch(Call::get("auth/me/")).await
    }

    /// Exchange a refresh token without touching the persisted session.
    pub async fn refresh(&self, refresh: &RefreshToken) -> ApiResult<AccessToken> {
        let issued = self.gateway.exchange_refresh(refresh).await?;
        Ok(issued.access)
    }
}
