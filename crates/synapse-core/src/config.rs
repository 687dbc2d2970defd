//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default length of each trend window, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 14;

/// Default number of topics kept in a trends report.
pub const DEFAULT_MAX_TOPICS: usize = 7;

/// Paths to all Synapse data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Item store directory (`data/db/`).
    pub db: PathBuf,
    /// Markdown exports (`data/exports/`).
    pub exports: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            db: root.join("db"),
            exports: root.join("exports"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    /// Create all required directories.
    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.db)?;
        std::fs::create_dir_all(&self.exports)?;
        Ok(())
    }
}

/// Defaults applied to trends requests that do not set their own options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendsDefaults {
    #[serde(rename = "windowDays")]
    pub window_days: u32,
    #[serde(rename = "maxTopics")]
    pub max_topics: usize,
}

impl Default for TrendsDefaults {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            max_topics: DEFAULT_MAX_TOPICS,
        }
    }
}

/// Top-level Synapse configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynapseConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Trend radar defaults.
    pub trends: TrendsDefaults,
}

impl SynapseConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(data_dir: impl AsRef<Path>, lookup: F) -> std::io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", 8080);
        let trends = TrendsDefaults {
            window_days: parse_or(&lookup, "SYNAPSE_TRENDS_WINDOW_DAYS", DEFAULT_WINDOW_DAYS),
            max_topics: parse_or(&lookup, "SYNAPSE_TRENDS_MAX_TOPICS", DEFAULT_MAX_TOPICS),
        };

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            port,
            data_paths,
            trends,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}
