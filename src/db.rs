use std::sync::Arc;

use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::{info, warn};

use crate::config::Config;
use crate::store::{FallbackStore, MemoryStore, MySqlStore, Store};

pub async fn init_db(database_url: &str, config: &Config) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_connect_timeout)
        .connect(database_url)
        .await
}

/// Picks the backend for this process.
///
/// Without `DATABASE_URL`, or when the first connection attempt fails, the
/// seeded in-memory store serves everything. Otherwise MySQL is primary and
/// the in-memory store takes over once MySQL becomes unreachable.
pub async fn build_store(config: &Config) -> Arc<dyn Store> {
    let Some(database_url) = config.database_url.as_deref() else {
        info!("DATABASE_URL not set, serving from in-memory store");
        return Arc::new(MemoryStore::seeded());
    };

    match init_db(database_url, config).await {
        Ok(pool) => {
            info!(
                max_connections = config.db_max_connections,
                "Connected to MySQL"
            );
            let primary: Arc<dyn Store> = Arc::new(MySqlStore::new(pool, config.retry_policy()));
            let fallback: Arc<dyn Store> = Arc::new(MemoryStore::seeded());
            Arc::new(FallbackStore::new(primary, fallback))
        }
        Err(e) => {
            warn!(error = %e, "MySQL connection failed, serving from in-memory store");
            Arc::new(MemoryStore::seeded())
        }
    }
}
