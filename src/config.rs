//! Server configuration from command-line flags and the environment.

use crate::role::domain::{Role, RoleResolutionPolicy};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Role names accepted by the fallback flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// `admin`
    Admin,
    /// `manager`
    Manager,
    /// `member`
    Member,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Admin => Self::Admin,
            RoleArg::Manager => Self::Manager,
            RoleArg::Member => Self::Member,
        }
    }
}

/// Configuration of the `atelier-server` process.
#[derive(Debug, Clone, Parser)]
#[command(name = "atelier-server", version, about = "Workspace roles and state API")]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "ATELIER_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// `PostgreSQL` connection string. Without it every API request fails
    /// with a configuration error.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "ATELIER_POOL_SIZE", default_value_t = 8)]
    pub pool_size: u32,

    /// Role of a caller that sends no user email.
    #[arg(long, env = "ATELIER_ANONYMOUS_ROLE", value_enum, default_value_t = RoleArg::Admin)]
    pub anonymous_role: RoleArg,

    /// Role of a user without an assignment in the workspace.
    #[arg(long, env = "ATELIER_UNASSIGNED_ROLE", value_enum, default_value_t = RoleArg::Admin)]
    pub unassigned_role: RoleArg,

    /// Role used when the role lookup fails.
    #[arg(
        long,
        env = "ATELIER_LOOKUP_FAILURE_ROLE",
        value_enum,
        default_value_t = RoleArg::Admin
    )]
    pub lookup_failure_role: RoleArg,

    /// Log output format.
    #[arg(long, env = "ATELIER_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Returns the role resolution policy described by the fallback flags.
    #[must_use]
    pub fn resolution_policy(&self) -> RoleResolutionPolicy {
        RoleResolutionPolicy {
            missing_identity: self.anonymous_role.into(),
            unassigned: self.unassigned_role.into(),
            lookup_failure: self.lookup_failure_role.into(),
        }
    }

    /// Returns the database URL when one is set and not blank.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}
