//! Adapter implementations for role assignment ports.

pub mod memory;
pub mod postgres;
