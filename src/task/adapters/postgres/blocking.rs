//! Blocking operation helpers for the `PostgreSQL` adapters.
//!
//! Diesel connections are synchronous, so every query runs on tokio's
//! blocking pool with a connection checked out from r2d2.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Runs `f` with a pooled connection on the blocking thread pool.
///
/// `pool_err` maps checkout failures and `join_err` maps a panicked or
/// cancelled blocking task into the caller's error type.
pub(super) async fn with_connection<F, T, E, P, J>(
    pool: &TaskPgPool,
    f: F,
    pool_err: P,
    join_err: J,
) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    P: FnOnce(PoolError) -> E + Send + 'static,
    J: FnOnce(tokio::task::JoinError) -> E,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(pool_err)?;
        f(&mut connection)
    })
    .await
    .map_err(join_err)?
}
