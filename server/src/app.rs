//! Application state and initialization
//!
//! Holds the services every request handler shares. Built once in
//! [`setup`] and cloned into the axum router.

use crate::config::Settings;
use crate::database::{create_pool, Repository};
use crate::error::Result;
use crate::services::FeedService;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub feed: FeedService,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(pool: SqlitePool, settings: Settings) -> Self {
        let repo = Repository::new(pool);
        Self {
            feed: FeedService::new(repo),
            settings: Arc::new(settings),
        }
    }

    /// Title for the page header; a failed settings read falls back to the configured title
    pub async fn site_title(&self) -> String {
        let fallback = &self.settings.site.title;
        match self.feed.site_title(fallback).await {
            Ok(title) => title,
            Err(e) => {
                tracing::warn!("Failed to read site_title setting: {}", e);
                fallback.clone()
            }
        }
    }

    pub fn avatar_base_url(&self) -> &str {
        &self.settings.avatar.base_url
    }
}

/// Application setup - called once on startup
pub async fn setup(settings: Settings) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("Database path: {:?}", settings.database.path);

    let pool = create_pool(&settings.database).await?;
    let state = AppState::new(pool, settings);

    tracing::info!("Application initialized successfully");

    Ok(state)
}
