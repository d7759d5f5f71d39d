//! Auth types shared across Shelfmark crates.
//!
//! Login sessions live in the fronting gateway; services only see the
//! authenticated identity it forwards. Provides the `AdminIdentity` extractor.

pub mod identity;
