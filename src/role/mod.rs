//! Workspace role assignments.
//!
//! Maps `(location, workspace, user)` to one of the `admin`, `manager` or
//! `member` roles and resolves the role of an incoming caller. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
