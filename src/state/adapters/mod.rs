//! Adapter implementations for workspace state ports.

pub mod memory;
pub mod postgres;
