use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::errors::ModelError;

/// Open the pooled connection shared by every request.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if let Some(ns) = &cfg.namespace {
        opt.set_schema_search_path(ns.clone());
    }

    let db = Database::connect(opt).await.map_err(|e| ModelError::Db(e.to_string()))?;
    info!(
        backend = ?db.get_database_backend(),
        max_connections = cfg.max_connections,
        namespace = cfg.namespace.as_deref().unwrap_or("<default>"),
        "ledger store connected"
    );
    Ok(db)
}
