//! Tasklane: task identity and status rules for project scheduling.
//!
//! This crate assigns project-scoped task numbers, derives task status and
//! progress from actual dates, and rejects structurally invalid tasks
//! before they are persisted.
//!
//! # Architecture
//!
//! Tasklane follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task numbering, status derivation, and validation

pub mod task;
