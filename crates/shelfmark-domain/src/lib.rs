//! Domain types shared across Shelfmark crates.
//!
//! Ids, statuses and loan rules. No framework dependencies.

pub mod id;
pub mod loan;
pub mod status;
