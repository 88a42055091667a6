//! `fundportal-core`: shared building blocks for the portal client.
//!
//! This crate contains **pure** primitives (no IO): identifiers, the client
//! error taxonomy and money helpers.

pub mod error;
pub mod id;
pub mod money;

pub use error::{ApiError, ApiResult, AuthFailure, FieldErrors, GENERIC_FAILURE};
pub use id::{AccountId, InvalidId, PortfolioId, SchemeId, TransactionId, UserId};
pub use money::{deserialize_amount, format_inr, parse_amount, truncate_units, Money};
