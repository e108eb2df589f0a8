//! Adapter implementations for task and category ports.

pub mod memory;
pub mod postgres;
