//! Workspace state synchronisation.
//!
//! Stores one opaque JSON document per workspace and applies the member
//! visibility policy to its `tasks` list on every read and write:
//!
//! - Domain types and the visibility policy in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
