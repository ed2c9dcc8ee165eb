use std::{env, path::PathBuf};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_SUBJECT_ID: &str = "local-user";
pub const DEFAULT_TILE_BASE_UNIT: u32 = 4;

/// Settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    /// Tag written on every exported entry. There are no real accounts.
    pub subject_id: String,
    pub tile_base_unit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            subject_id: DEFAULT_SUBJECT_ID.to_string(),
            tile_base_unit: DEFAULT_TILE_BASE_UNIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            data_dir: lookup("APP_DATA_PATH")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            subject_id: lookup("CYCLE_SUBJECT_ID")
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.subject_id),
            tile_base_unit: parse_or("TILE_BASE_UNIT", lookup("TILE_BASE_UNIT"), defaults.tile_base_unit),
        }
    }
}

fn parse_or<T: std::str::FromStr + Copy>(name: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {name}={raw:?}");
            default
        }),
    }
}
