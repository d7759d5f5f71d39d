//! Test utilities for Shelfmark services.
//!
//! Provides `MockAuth` for gateway identity headers and `FixedClock` for
//! deterministic dates. Use from tests only, never in production code.

pub mod auth;
pub mod clock;
