//! Domain types for the AgriTrade backend
//!
//! Re-exports the pure ledger model from the shared crate; the entity
//! records themselves live next to the services that persist them.

pub use shared::models::*;
