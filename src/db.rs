//! `PostgreSQL` connection pool shared by the role and state adapters.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool type used by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Returns the connection string with TLS required.
///
/// An explicit `sslmode` already present in the URL is left untouched.
#[must_use]
pub fn require_tls(database_url: &str) -> String {
    if database_url.contains("sslmode=") {
        return database_url.to_owned();
    }
    let separator = if database_url.contains('?') { '&' } else { '?' };
    format!("{database_url}{separator}sslmode=require")
}

/// Builds a connection pool for the given database URL.
///
/// The pool opens its first connection eagerly, so an unreachable database
/// is reported here rather than on the first request.
///
/// # Errors
///
/// Returns [`PoolError`] when no connection can be established.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(require_tls(database_url));
    Pool::builder().max_size(max_size).build(manager)
}
