//! Cross-cutting building blocks for Shelfmark services: error bodies,
//! tracing setup, HTTP middleware, serde helpers, health checks and the clock.

pub mod clock;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
