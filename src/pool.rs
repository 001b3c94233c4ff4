//! A bounded pool of SQLite connections shared by all request handlers.
//!
//! The pool is a [deadpool] managed pool of [rusqlite::Connection]s.
//! Connections are opened lazily, up to [PoolConfig::max_connections], and
//! handed out as [PooledConnection] guards. Dropping a guard returns the
//! connection to the pool, so a connection is returned exactly once on every
//! exit path of the handler that holds it.
//!
//! When every connection is checked out, [ConnectionPool::acquire] suspends
//! until a guard is dropped. This is the only backpressure the server applies.

use std::{fmt::Debug, ops::Deref, path::PathBuf, time::Duration};

use deadpool::{
    Runtime,
    managed::{self, Metrics, Object, Pool, RecycleResult},
};
use rusqlite::Connection;

/// Errors that can occur while setting up the pool or using its connections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// The pool could not be built from its config.
    #[error("could not create the connection pool: {0}")]
    Build(String),

    /// A new connection to the database could not be opened.
    #[error("could not connect to the database: {0}")]
    Connect(String),

    /// No connection became available within the configured timeout.
    #[error("timed out after {0:?} waiting for a database connection")]
    Timeout(Duration),

    /// The pool has been shut down.
    #[error("the connection pool is closed")]
    Closed,

    /// The blocking task running a query panicked or was cancelled.
    #[error("the database task failed: {0}")]
    Interact(String),
}

/// Where the pool opens its connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A database file on disk, created if it does not exist.
    File(PathBuf),
    /// A private in-memory database.
    ///
    /// Every SQLite in-memory connection is its own database, so a pool
    /// with this location never holds more than one connection.
    InMemory,
}

impl DatabaseLocation {
    /// Parse a command line database path, where `:memory:` selects an
    /// in-memory database.
    pub fn from_path(path: &str) -> Self {
        if path == ":memory:" {
            Self::InMemory
        } else {
            Self::File(PathBuf::from(path))
        }
    }

    fn open(&self) -> Result<Connection, rusqlite::Error> {
        match self {
            Self::File(path) => Connection::open(path),
            Self::InMemory => Connection::open_in_memory(),
        }
    }
}

/// Settings for a [ConnectionPool].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Where connections are opened.
    pub location: DatabaseLocation,
    /// The most connections that may be checked out at once.
    pub max_connections: usize,
    /// How long [ConnectionPool::acquire] waits for a free connection.
    ///
    /// `None` waits indefinitely.
    pub acquire_timeout: Option<Duration>,
}

impl PoolConfig {
    /// The default ceiling on concurrent connections.
    pub const DEFAULT_MAX_CONNECTIONS: usize = 10;

    /// The highest ceiling a pool accepts. Larger values are lowered to this.
    pub const MAX_CONNECTIONS_LIMIT: usize = 1024;

    /// Create a config for `location` with the default ceiling and no timeout.
    pub fn new(location: DatabaseLocation) -> Self {
        Self {
            location,
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: None,
        }
    }

    /// Create a config for a single-connection, in-memory database.
    pub fn in_memory() -> Self {
        Self::new(DatabaseLocation::InMemory).with_max_connections(1)
    }

    /// Set the ceiling on concurrent connections.
    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Set how long an acquisition may wait for a free connection.
    pub fn with_acquire_timeout(mut self, acquire_timeout: Option<Duration>) -> Self {
        self.acquire_timeout = acquire_timeout;
        self
    }
}

/// Opens the pool's connections.
#[derive(Debug)]
struct SqliteManager {
    location: DatabaseLocation,
}

impl managed::Manager for SqliteManager {
    type Type = Connection;
    type Error = rusqlite::Error;

    async fn create(&self) -> Result<Connection, rusqlite::Error> {
        tracing::debug!("opening a new database connection");
        self.location.open()
    }

    async fn recycle(&self, _: &mut Connection, _: &Metrics) -> RecycleResult<rusqlite::Error> {
        Ok(())
    }
}

/// A cheaply clonable handle to a shared set of database connections.
#[derive(Clone)]
pub struct ConnectionPool {
    pool: Pool<SqliteManager>,
    max_connections: usize,
    acquire_timeout: Option<Duration>,
}

impl ConnectionPool {
    /// Create a pool from `config`.
    ///
    /// No connection is opened until the first call to [ConnectionPool::acquire].
    /// The ceiling is kept between one and [PoolConfig::MAX_CONNECTIONS_LIMIT],
    /// and an in-memory location is capped at one connection.
    ///
    /// # Errors
    /// Returns [PoolError::Build] if the underlying pool rejects the config.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let max_connections = match config.location {
            DatabaseLocation::InMemory => 1,
            DatabaseLocation::File(_) => config
                .max_connections
                .clamp(1, PoolConfig::MAX_CONNECTIONS_LIMIT),
        };

        if max_connections != config.max_connections {
            tracing::warn!(
                "using a ceiling of {max_connections} connections instead of {}",
                config.max_connections
            );
        }

        let manager = SqliteManager {
            location: config.location,
        };
        let pool = Pool::builder(manager)
            .max_size(max_connections)
            .wait_timeout(config.acquire_timeout)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|error| PoolError::Build(error.to_string()))?;

        Ok(Self {
            pool,
            max_connections,
            acquire_timeout: config.acquire_timeout,
        })
    }

    /// Check out a connection, waiting for a free one if necessary.
    ///
    /// An idle connection is reused when there is one, otherwise a new
    /// connection is opened.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [PoolError::Timeout] if an acquire timeout is configured and no
    ///   connection became free in time,
    /// - [PoolError::Closed] if the pool has been closed,
    /// - [PoolError::Connect] if a new connection could not be opened. The
    ///   slot is released again, and the attempt is not retried.
    pub async fn acquire(&self) -> Result<PooledConnection, PoolError> {
        self.pool
            .get()
            .await
            .map(PooledConnection)
            .map_err(|error| self.pool_error(error))
    }

    /// Shut the pool down.
    ///
    /// Waiting and future acquisitions fail with [PoolError::Closed] and idle
    /// connections are dropped. Connections that are checked out are dropped
    /// when their guard is.
    pub fn close(&self) {
        self.pool.close();
    }

    /// Whether [ConnectionPool::close] has been called.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// The most connections that may be checked out at once.
    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// The number of connections that could be checked out right now.
    pub fn available_slots(&self) -> usize {
        let status = self.pool.status();
        let in_use = status.size.saturating_sub(status.available);

        status.max_size.saturating_sub(in_use)
    }

    /// The number of open connections waiting to be reused.
    pub fn idle_connections(&self) -> usize {
        self.pool.status().available
    }

    fn pool_error(&self, error: managed::PoolError<rusqlite::Error>) -> PoolError {
        match error {
            managed::PoolError::Timeout(_) => {
                PoolError::Timeout(self.acquire_timeout.unwrap_or_default())
            }
            managed::PoolError::Closed => PoolError::Closed,
            managed::PoolError::Backend(error) => {
                tracing::error!("could not open a database connection: {error}");
                PoolError::Connect(error.to_string())
            }
            error => PoolError::Connect(error.to_string()),
        }
    }
}

impl Debug for ConnectionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("available_slots", &self.available_slots())
            .finish()
    }
}

/// A connection checked out from a [ConnectionPool].
///
/// Dereferences to a [rusqlite::Connection]. The connection goes back to the
/// pool when the guard is dropped.
pub struct PooledConnection(Object<SqliteManager>);

impl PooledConnection {
    /// Run `f` with this connection on tokio's blocking thread pool and
    /// return its result.
    ///
    /// The connection goes back to the pool once `f` returns, so a request
    /// handler never blocks an async worker thread while SQLite works or
    /// waits on a lock.
    ///
    /// # Errors
    /// Returns [PoolError::Interact] if `f` panicked.
    pub async fn interact<F, R>(self, f: F) -> Result<R, PoolError>
    where
        F: FnOnce(&Connection) -> R + Send + 'static,
        R: Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            let connection: &Connection = &self;
            f(connection)
        })
            .await
            .map_err(|error| PoolError::Interact(error.to_string()))
    }
}

impl Deref for PooledConnection {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
