use std::ops::{Deref, DerefMut};

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use diesel::{
    SqliteConnection,
    connection::SimpleConnection,
    r2d2::{self, ConnectionManager, CustomizeConnection, Pool, PooledConnection},
};
use tokio::task::spawn_blocking;

use crate::util_resp::FailureResponse;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Applied to every connection the pool hands out. Several handlers may
/// write at once against a file database, so writers wait for the lock
/// instead of failing immediately.
#[derive(Debug)]
pub struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(
            "PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;",
        )
        .map_err(r2d2::Error::QueryError)
    }
}

/// A pooled connection, checked out for the lifetime of one request.
pub struct Conn {
    inner: PooledConnection<ConnectionManager<SqliteConnection>>,
}

impl Deref for Conn {
    type Target = PooledConnection<ConnectionManager<SqliteConnection>>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Conn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Conn
where
    DbPool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = FailureResponse;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let pool = DbPool::from_ref(state);

        let inner = spawn_blocking(move || pool.get())
            .await
            .map_err(|e| {
                tracing::error!("connection task panicked: {e}");
                FailureResponse::ServerError(())
            })??;

        Ok(Conn { inner })
    }
}
