//! Implements a struct that holds the state of the REST server.

use crate::{ConnectionPool, Error, db::initialize};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The pool that every request borrows its database connection from.
    pub pool: ConnectionPool,

    /// The name of the machine serving requests, shown on the home page.
    pub host_name: String,
}

impl AppState {
    /// Create a new [AppState] that serves users from `pool`.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models, so the schema exists before any request is served.
    ///
    /// # Errors
    /// Returns an error if a connection cannot be acquired or the database
    /// cannot be initialized.
    pub async fn new(pool: ConnectionPool, host_name: &str) -> Result<Self, Error> {
        let connection = pool.acquire().await?;
        connection.interact(initialize).await??;

        Ok(Self {
            pool,
            host_name: host_name.to_owned(),
        })
    }
}

#[cfg(test)]
mod app_state_tests {
    use crate::{AppState, ConnectionPool, PoolConfig, count_users};

    #[tokio::test]
    async fn new_initializes_the_database() {
        let pool = ConnectionPool::new(PoolConfig::in_memory()).unwrap();

        let state = AppState::new(pool, "test-host")
            .await
            .expect("Could not create app state");

        let connection = state.pool.acquire().await.unwrap();
        assert_eq!(count_users(&connection), Ok(0));
        assert_eq!(state.host_name, "test-host");
    }

    #[tokio::test]
    async fn new_fails_when_the_pool_is_closed() {
        let pool = ConnectionPool::new(PoolConfig::in_memory()).unwrap();
        pool.close();

        assert!(AppState::new(pool, "test-host").await.is_err());
    }
}
