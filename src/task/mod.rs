//! Task identity and status derivation for project schedules.
//!
//! Tasks carry a project-scoped, zero-padded number assigned at first save,
//! a status derived from their actual dates, and optional links to a parent
//! task and a System → Major → Minor category chain. Every write passes
//! through the rule engine before it reaches storage. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Numbering, derivation, and validation rules in [`rules`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod rules;
pub mod services;

#[cfg(test)]
mod tests;
