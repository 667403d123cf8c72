//! Account system
//!
//! This module implements the in-memory ledger:
//! - PIN-protected accounts with fixed-point balances
//! - A registry that issues unique account numbers
//! - Transfers that lock both sides before moving funds

pub mod auth;
pub mod ledger;
pub mod registry;
pub mod types;

pub use auth::PinCredential;
pub use ledger::Account;
pub use registry::AccountRegistry;
pub use types::{AccountId, Amount};
