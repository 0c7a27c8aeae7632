//! Application configuration
//!
//! Central location for rendering constants and the runtime settings
//! loaded from defaults, an optional TOML file and the environment.

use crate::error::Result;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ===== Feed Limits =====

/// Number of memos rendered server-side on the home and explore feeds.
/// Further pages are fetched by the client script in steps of this size.
pub const FEED_PAGE_SIZE: i64 = 20;

// ===== Heatmap =====

/// Number of days covered by the activity heatmap, ending today
pub const HEATMAP_DAYS: i64 = 30;

/// Highest heatmap intensity level (level 0 is reserved for empty days)
pub const HEATMAP_MAX_LEVEL: u8 = 4;

/// Legend colours for heatmap levels 0 through 4
pub const HEATMAP_COLORS: [&str; 5] = ["#ebedf0", "#c6e48b", "#7bc96f", "#239a3b", "#196127"];

// ===== Avatars =====

/// Avatar size in pixels next to feed items
pub const FEED_AVATAR_SIZE: u32 = 40;

/// Avatar size in pixels on the user profile header
pub const PROFILE_AVATAR_SIZE: u32 = 80;

// ===== Resources =====

/// Stored paths with one of these prefixes are emitted unchanged
pub const PASSTHROUGH_RESOURCE_PREFIXES: &[&str] = &["http", "/api/"];

// ===== Runtime Settings =====

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_FILE: &str = "memoshare.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    /// Upper bound on pooled SQLite connections
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    /// Title shown in the header when no `site_title` row exists
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvatarSettings {
    /// Gravatar-compatible endpoint, including the trailing slash
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub site: SiteSettings,
    pub avatar: AvatarSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseSettings {
                path: PathBuf::from("memoshare.db"),
                max_connections: 5,
            },
            server: ServerSettings {
                bind: "127.0.0.1:8080".into(),
            },
            site: SiteSettings {
                title: "Memos".into(),
            },
            avatar: AvatarSettings {
                base_url: "https://gravatar.loli.net/avatar/".into(),
            },
        }
    }
}

impl Settings {
    /// Load settings: defaults, then the TOML file if present, then
    /// `MEMOSHARE_*` environment variables (`__` separates sections).
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let file = config_file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let config = Config::builder()
            .set_default(
                "database.path",
                defaults.database.path.to_string_lossy().to_string(),
            )?
            .set_default(
                "database.max_connections",
                i64::from(defaults.database.max_connections),
            )?
            .set_default("server.bind", defaults.server.bind)?
            .set_default("site.title", defaults.site.title)?
            .set_default("avatar.base_url", defaults.avatar.base_url)?
            .add_source(
                File::from(file)
                    .format(FileFormat::Toml)
                    .required(config_file.is_some()),
            )
            .add_source(
                Environment::with_prefix("MEMOSHARE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
