//! Atelier: shared workspace state and roles for multi-tenant task boards.
//!
//! This crate stores one JSON state document and a set of role assignments
//! per workspace, and serves both over HTTP. Users with the `member` role
//! only see, and only change, the tasks assigned to them.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`role`]: Role assignments and caller role resolution
//! - [`state`]: State documents and the member visibility policy
//! - [`http`]: The `axum` endpoints
//! - [`config`]: Process configuration

pub mod config;
pub mod db;
pub mod http;
pub mod role;
pub mod state;
