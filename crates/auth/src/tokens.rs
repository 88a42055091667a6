//! Opaque bearer credentials.
//!
//! `Debug` output is redacted so tokens never end up in logs.

use serde::{Deserialize, Serialize};

/// Short-lived bearer token attached to every authenticated request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

/// Long-lived token exchanged for a fresh [`AccessToken`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshToken(String);

macro_rules! impl_token {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// The raw token, for placing on the wire or in storage.
            pub fn expose(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Debug for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!($name, "(***)"))
            }
        }
    };
}

impl_token!(AccessToken, "AccessToken");
impl_token!(RefreshToken, "RefreshToken");

/// Token pair issued by `POST /auth/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: AccessToken,
    pub refresh: RefreshToken,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: AccessToken::new(access),
            refresh: RefreshToken::new(refresh),
        }
    }
}
