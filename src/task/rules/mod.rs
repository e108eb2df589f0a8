//! Task rule engine.
//!
//! Applied before every task write: sequential numbering, status
//! derivation from actual dates, and structural validation of dates,
//! category nesting, and the parent chain.

pub mod config;
pub mod derivation;
pub mod engine;
pub mod validation;

pub use config::TaskRulesConfig;
pub use derivation::{STATUS_RULES, StatusDerivation, StatusRule, derive_status};
pub use engine::TaskRuleEngine;
pub use validation::ValidationContext;
