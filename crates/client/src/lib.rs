//! `fundportal-client`
//!
//! **Responsibility:** authenticated client for the fund portal REST API.
//!
//! This crate provides:
//! - A gateway that attaches bearer tokens and refreshes them once on 401
//! - Typed endpoint groups with one fixed response contract each
//! - The session manager (restore / login / register / logout)
//! - Client-side form checks mirrored from the server
//!
//! The client is a **thin shell** around the backend API; the backend stays
//! the authority for every business rule.

pub mod api;
pub mod config;
pub mod forms;
pub mod gateway;
mod refresh;
pub mod session;
pub mod token_file;
pub mod types;
pub mod views;

pub use config::{ClientConfig, ConfigError};
pub use forms::{
    balance_after, preview_units, BalanceOperation, BalanceUpdate, FormError, NavUpdate, PurchaseOrder,
    MIN_INVESTMENT,
};
pub use gateway::Gateway;
pub use session::SessionManager;
pub use token_file::FileTokenStore;
pub use views::{AdminOverview, CustomerDashboard};
