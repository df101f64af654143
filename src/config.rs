//! Runtime configuration.
//!
//! Defaults work with no config file at all. `~/.config/givebox/config.toml`
//! can override the database path, the morning/evening cutoff hour and the
//! summary endpoint; the api key can also come from the environment
//! (GIVEBOX_API_KEY, or GEMINI_API_KEY for the default endpoint).

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_SUMMARY_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Hours before this count as the morning slot.
pub const DEFAULT_MORNING_CUTOFF: u32 = 14;

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    db_path: Option<PathBuf>,
    morning_cutoff_hour: Option<u32>,
    summary_endpoint: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug)]
pub struct Config {
    pub db_path: Option<PathBuf>,
    pub morning_cutoff_hour: u32,
    pub summary_endpoint: String,
    pub api_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let file = match config_file_path() {
            Some(path) if path.is_file() => {
                let raw = std::fs::read_to_string(&path)?;
                toml::from_str(&raw)
                    .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?
            }
            _ => FileConfig::default(),
        };

        let env_key = std::env::var("GIVEBOX_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .ok();

        Ok(Self::resolve(file, env_key))
    }

    fn resolve(file: FileConfig, env_key: Option<String>) -> Self {
        Config {
            db_path: file.db_path,
            morning_cutoff_hour: file.morning_cutoff_hour.unwrap_or(DEFAULT_MORNING_CUTOFF),
            summary_endpoint: file
                .summary_endpoint
                .unwrap_or_else(|| DEFAULT_SUMMARY_ENDPOINT.to_string()),
            // environment wins over the config file
            api_key: env_key.or(file.api_key),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "givebox")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
