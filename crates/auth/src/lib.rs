//! `fundportal-auth`: session and access boundary of the portal client.
//!
//! This crate is intentionally decoupled from HTTP: it holds the identity
//! model, the persisted token pair, the session store that route guards
//! observe, and the guard policy itself.

pub mod guard;
pub mod navigator;
pub mod principal;
pub mod roles;
pub mod session;
pub mod store;
pub mod tokens;

pub use guard::{guard, home_for, Access, GuardDecision, Route};
pub use navigator::{Navigator, TracingNavigator, WatchNavigator};
pub use principal::User;
pub use roles::Role;
pub use session::{SessionState, SessionStore};
pub use store::{MemoryTokenStore, TokenKey, TokenStore, TokenStoreError};
pub use tokens::{AccessToken, RefreshToken, TokenPair};
