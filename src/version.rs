//! Checker version information.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.
//! - The rulebook carries its own version ([`RULEBOOK_VERSION`]); both are printed by `--list-rules`.

pub use eiflint_core::lang::rules::RULEBOOK_VERSION;

/// The checker version string (for example, `0.1.0`).
pub const EIFLINT_VERSION: &str = env!("CARGO_PKG_VERSION");
