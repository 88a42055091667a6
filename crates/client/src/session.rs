//! Session manager: restore, login, register, logout.
//!
//! Drives the shared [`SessionStore`] through the gateway's auth endpoints.
//! The store only ever reaches `Authenticated` with both tokens persisted and
//! an identity fetched; every failure path leaves it `Anonymous` with nothing
//! persisted.

use std::sync::Arc;

use tokio::sync::watch;

use fundportal_auth::{SessionState, SessionStore, User};
use fundportal_core::ApiResult;

use crate::gateway::Gateway;
use crate::types::RegisterProfile;

#[derive(Debug, Clone)]
pub struct SessionManager {
    gateway: Gateway,
}

impl SessionManager {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.gateway.session()
    }

    /// Rehydrate from persisted tokens at startup.
    ///
    /// Any failure clears what was persisted; the loading state is left
    /// in every case.
    pub async fn restore(&self) -> Option<User> {
        let session = self.session();
        if session.access_token().is_none() {
            tracing::debug!("no persisted session");
            session.settle_anonymous();
            return None;
        }

        match self.adopt_identity().await {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!(error = %err, "could not restore persisted session");
                session.teardown();
                None
            }
        }
    }

    /// Exchange credentials, persist the pair and fetch the identity.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<User> {
        let session = self.session();
        if session.current_user().is_some() {
            session.teardown();
        }

        let pair = match self.gateway.auth().login(username, password).await {
            Ok(pair) => pair,
            Err(err) => {
                tracing::info!(%username, error = %err, "login rejected");
                session.settle_anonymous();
                return Err(err);
            }
        };

        if let Err(err) = session.store_pair(&pair) {
            tracing::error!(error = %err, "could not persist issued tokens");
            session.teardown();
            return Err(err);
        }

        match self.adopt_identity().await {
            Ok(user) => Ok(user),
            Err(err) => {
                tracing::warn!(error = %err, "identity fetch failed after login");
                session.teardown();
                Err(err)
            }
        }
    }

    /// Create the account, then log in with the same credentials.
    pub async fn register(&self, profile: &RegisterProfile) -> ApiResult<User> {
        profile.validate()?;
        let created = self.gateway.auth().register(profile).await?;
        tracing::info!(user_id = %created.user.id, "account registered");
        self.login(&profile.username, &profile.password).await
    }

    /// Drop the session locally. No network call; safe to repeat.
    pub fn logout(&self) {
        self.session().teardown();
    }

    pub fn current_user(&self) -> Option<User> {
        self.session().current_user()
    }

    pub fn state(&self) -> SessionState {
        self.session().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.session().subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.session().is_loading()
    }

    pub fn is_admin(&self) -> bool {
        self.session().is_admin()
    }

    pub fn is_customer(&self) -> bool {
        self.session().is_customer()
    }

    async fn adopt_identity(&self) -> ApiResult<User> {
        let user = self.gateway.auth().me().await?;
        self.session().authenticate(user.clone())?;
        Ok(user)
    }
}
