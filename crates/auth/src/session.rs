//! Session store: the single owner of the persisted tokens and the current
//! identity.
//!
//! The store is constructed explicitly and shared (`Arc<SessionStore>`) by
//! the gateway, the session manager and whatever renders routes. State
//! changes are published on a `watch` channel so guards can react to them.
//!
//! # Invariant
//! The state is `Authenticated` only while both tokens are persisted.

use std::sync::Arc;

use tokio::sync::watch;

use fundportal_core::{ApiError, AuthFailure};

use crate::{AccessToken, RefreshToken, Role, TokenKey, TokenPair, TokenStore, User};

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Startup: persisted tokens have not been checked yet.
    Loading,
    /// No session.
    Anonymous,
    /// Tokens validated and identity fetched.
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    pub fn is_customer(&self) -> bool {
        self.role() == Some(Role::Customer)
    }
}

#[derive(Debug)]
pub struct SessionStore {
    tokens: Arc<dyn TokenStore>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Create a store over persisted tokens. Starts in [`SessionState::Loading`].
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self { tokens, state }
    }

    pub fn access_token(&self) -> Option<AccessToken> {
        self.tokens.get(TokenKey::Access).map(AccessToken::new)
    }

    pub fn refresh_token(&self) -> Option<RefreshToken> {
        self.tokens.get(TokenKey::Refresh).map(RefreshToken::new)
    }

    pub fn has_tokens(&self) -> bool {
        self.access_token().is_some() && self.refresh_token().is_some()
    }

    /// Persist a freshly issued token pair.
    pub fn store_pair(&self, pair: &TokenPair) -> Result<(), ApiError> {
        self.tokens
            .set(TokenKey::Access, pair.access.expose())
            .and_then(|_| self.tokens.set(TokenKey::Refresh, pair.refresh.expose()))
            .map_err(|e| ApiError::storage(e.to_string()))
    }

    /// Persist a refreshed access token (and a rotated refresh token, if any).
    pub fn store_access(
        &self,
        access: &AccessToken,
        rotated: Option<&RefreshToken>,
    ) -> Result<(), ApiError> {
        self.tokens
            .set(TokenKey::Access, access.expose())
            .map_err(|e| ApiError::storage(e.to_string()))?;
        if let Some(refresh) = rotated {
            self.tokens
                .set(TokenKey::Refresh, refresh.expose())
                .map_err(|e| ApiError::storage(e.to_string()))?;
        }
        Ok(())
    }

    /// Expose `user` as the current identity.
    ///
    /// Refused unless both tokens are persisted.
    pub fn authenticate(&self, user: User) -> Result<(), ApiError> {
        if !self.has_tokens() {
            return Err(ApiError::Auth(AuthFailure::NoSession));
        }
        tracing::info!(user_id = %user.id, role = %user.role, "session authenticated");
        self.state.send_replace(SessionState::Authenticated(user));
        Ok(())
    }

    /// Leave `Loading` without a session (nothing was persisted).
    pub fn settle_anonymous(&self) {
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                *state = SessionState::Anonymous;
                true
            } else {
                false
            }
        });
    }

    /// Clear persisted tokens and the in-memory identity.
    ///
    /// Idempotent: tearing down an absent session leaves the state untouched
    /// and notifies nobody.
    pub fn teardown(&self) {
        if let Err(err) = self.tokens.clear() {
            tracing::error!(error = %err, "failed to clear persisted tokens");
        }
        let changed = self.state.send_if_modified(|state| {
            if *state == SessionState::Anonymous {
                false
            } else {
                *state = SessionState::Anonymous;
                true
            }
        });
        if changed {
            tracing::info!("session torn down");
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    pub fn is_customer(&self) -> bool {
        self.state.borrow().is_customer()
    }
}
