//! Database module
//!
//! This module provides the storage side of the pages:
//! - Schema bootstrap
//! - Row models
//! - Read-only repository queries

pub mod models;
pub mod repository;
pub mod schema;

pub use models::*;
pub use repository::Repository;
pub use schema::initialize_database;

use crate::config::DatabaseSettings;
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::time::Duration;

/// Open the SQLite file, creating it and its directory if needed, and
/// bring the schema up to date before handing the pool out.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<SqlitePool> {
    let path = &settings.path;
    tracing::info!("Opening database at {:?}", path);

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5))
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await?;

    initialize_database(&pool).await?;

    tracing::info!(
        "Database ready ({} connections max)",
        settings.max_connections
    );
    Ok(pool)
}
