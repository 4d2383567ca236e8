//! Shared domain logic for the AgriTrade Management Platform
//!
//! This crate contains the pure ledger model shared between the backend
//! and reporting tooling: per-record valuations, cross-entity rollups and
//! field validations. It performs no I/O; callers feed it current records
//! and get derived figures back.

pub mod aggregation;
pub mod models;
pub mod validation;
pub mod valuation;

pub use aggregation::*;
pub use models::*;
pub use validation::*;
pub use valuation::*;
