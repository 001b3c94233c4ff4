use crate::{
    AppState, ConnectionPool, PoolConfig,
    user::{Email, User, UserName, insert_user},
};

/// A single-connection, in-memory pool with the schema already created.
pub(crate) async fn get_test_pool() -> ConnectionPool {
    let pool = ConnectionPool::new(PoolConfig::in_memory()).expect("Could not create test pool");

    AppState::new(pool, "test-host")
        .await
        .expect("Could not initialize test database")
        .pool
}

pub(crate) async fn insert_test_user(pool: &ConnectionPool, name: &str, email: &str) -> User {
    let connection = pool.acquire().await.expect("Could not acquire connection");

    insert_user(
        UserName::new_unchecked(name),
        Email::new_unchecked(email),
        &connection,
    )
    .expect("Could not create test user")
}
