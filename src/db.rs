use anyhow::Result;
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use std::str::FromStr;
use tower_sessions_sqlx_store::SqliteStore;

/// SQLite database backing the browser session store.
///
/// Accounts live with the auth provider; the only local state is sessions.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        // Configure SQLite to create the database file if it doesn't exist
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Build the session store and make sure its table exists
    pub async fn session_store(&self) -> Result<SqliteStore> {
        let store = SqliteStore::new(self.pool.clone());
        store.migrate().await?;
        Ok(store)
    }
}
