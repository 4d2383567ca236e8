//! HTTP handlers for the AgriTrade Management Platform

pub mod buyer;
pub mod health;
pub mod loss;
pub mod payment;
pub mod product_type;
pub mod purchase;
pub mod reporting;
pub mod sale;
pub mod supplier;

pub use buyer::*;
pub use health::*;
pub use loss::*;
pub use payment::*;
pub use product_type::*;
pub use purchase::*;
pub use reporting::*;
pub use sale::*;
pub use supplier::*;
