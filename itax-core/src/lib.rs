//! Indian income-tax computation engine.
//!
//! [`engine::compute`] turns a [`TaxpayerSnapshot`](models::TaxpayerSnapshot)
//! and the [`YearConfig`](models::YearConfig) for its assessment year into a
//! [`ComputationResult`](models::ComputationResult). The engine is a pure
//! function of its inputs.

pub mod calculations;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

#[cfg(test)]
mod test_support;

pub use config::{ConfigSource, InMemoryConfigStore};
pub use engine::{compute, compute_with};
pub use error::{ComputationError, ConfigError};
pub use models::*;
