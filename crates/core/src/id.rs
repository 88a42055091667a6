//! Strongly-typed identifiers for backend records.
//!
//! The backend keys every record with an integer primary key; the newtypes
//! keep a scheme id from being passed where an account id is expected.

use core::num::ParseIntError;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a portal user (admin or customer).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

/// Identifier of a linked bank account (the customer's wallet).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

/// Identifier of a mutual-fund scheme.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeId(i64);

/// Identifier of a portfolio holding row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioId(i64);

/// Identifier of a fund transaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(i64);

/// An identifier string that is not a valid integer key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {source}")]
pub struct InvalidId {
    kind: &'static str,
    #[source]
    source: ParseIntError,
}

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.trim().parse::<i64>().map_err(|source| InvalidId {
                    kind: $name,
                    source,
                })?;
                Ok(Self(raw))
            }
        }
    };
}

impl_int_newtype!(UserId, "UserId");
impl_int_newtype!(AccountId, "AccountId");
impl_int_newtype!(SchemeId, "SchemeId");
impl_int_newtype!(PortfolioId, "PortfolioId");
impl_int_newtype!(TransactionId, "TransactionId");
