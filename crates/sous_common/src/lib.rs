//! Sous Common - Shared types for the sous suggestion proxy.
//!
//! Wire contracts between sousd, sousctl, and any other caller,
//! plus the error taxonomy both sides agree on.

pub mod error;
pub mod suggestion;

pub use error::*;
pub use suggestion::*;
