//! Shared test helpers for `PostgreSQL` integration tests.

use atelier::db::PgPool;
use atelier::role::adapters::postgres::PostgresRoleRepository;
use atelier::role::domain::{UserEmail, WorkspaceScope};
use atelier::state::adapters::postgres::PostgresStateRepository;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::fixture;
use tokio::runtime::Runtime;

/// Boxed error type shared by the setup helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SQL creating the workspace tables.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2024-01-01-000000_create_workspace_tables/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "atelier_test_template";

/// Connections per test pool; enough for the concurrent merge tests.
const POOL_SIZE: u32 = 8;

/// Provides the workspace every test writes to.
#[fixture]
pub fn scope() -> WorkspaceScope {
    WorkspaceScope::from_parts("loc-1", "ws-1").expect("valid scope")
}

/// Parses a test email address.
pub fn email(value: &str) -> UserEmail {
    UserEmail::new(value).expect("valid email")
}

/// Creates a single-threaded runtime for driving repository futures.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Creates a multi-threaded runtime for tests that race writers.
pub fn concurrent_runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_SCHEMA_SQL)
                .map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Creates a database from the template and returns a pool connected to it.
///
/// The pool talks to the embedded cluster directly, without the TLS
/// requirement applied by [`atelier::db::build_pool`].
///
/// # Errors
///
/// Returns an error if the database or the pool cannot be created.
pub fn setup_pool(cluster: &TestCluster, db_name: &str) -> Result<PgPool, BoxError> {
    cluster
        .create_database_from_template(db_name, TEMPLATE_DB)
        .map_err(|e| Box::new(e) as BoxError)?;
    let url = cluster.connection().database_url(db_name);
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder()
        .max_size(POOL_SIZE)
        .build(manager)
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(pool)
}

/// Creates a fresh database and a role repository over it.
///
/// # Errors
///
/// Returns an error if the template, database or pool cannot be set up.
pub fn setup_role_repository(
    cluster: &TestCluster,
    db_name: &str,
) -> Result<PostgresRoleRepository, BoxError> {
    ensure_template(cluster)?;
    Ok(PostgresRoleRepository::new(setup_pool(cluster, db_name)?))
}

/// Creates a fresh database and a state repository over it.
///
/// # Errors
///
/// Returns an error if the template, database or pool cannot be set up.
pub fn setup_state_repository(
    cluster: &TestCluster,
    db_name: &str,
) -> Result<PostgresStateRepository, BoxError> {
    ensure_template(cluster)?;
    Ok(PostgresStateRepository::new(setup_pool(cluster, db_name)?))
}

/// Returns a unique database name with the given prefix.
pub fn unique_db_name(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

/// Drops the test database when the test ends, including on panic.
pub struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    /// Registers `db_name` for removal.
    pub const fn new(cluster: &'a TestCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(&*self.db_name) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.db_name);
        }
    }
}
