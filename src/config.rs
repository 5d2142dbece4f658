use ::config::{builder::DefaultState, ConfigBuilder};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

const CONFIG_PATH: &str = "config/config";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Value every API request must carry in its `Authorization` header.
    pub api_key: String,
    /// Base URL of the song info service; `/info` is appended per request.
    pub song_info_url: String,
    pub song_info_token: Option<String>,
    pub song_info_timeout_secs: u64,
    /// Deadline applied to each storage round trip on its own.
    pub db_timeout_secs: u64,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    /// Layer `config/config.yml` (optional) under environment variables.
    pub fn load() -> Result<Self> {
        let settings = with_defaults()?
            .add_source(::config::File::with_name(CONFIG_PATH).required(false))
            .add_source(::config::Environment::default().try_parsing(true))
            .build()
            .context("Failed to read configuration sources")?;

        settings
            .try_deserialize()
            .context("DATABASE_URL, API_KEY and SONG_INFO_URL must be set")
    }

    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.db_timeout_secs)
    }

    pub fn song_info_timeout(&self) -> Duration {
        Duration::from_secs(self.song_info_timeout_secs)
    }
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(::config::Config::builder()
        .set_default("server_host", "0.0.0.0")?
        .set_default("server_port", 5000)?
        .set_default("song_info_timeout_secs", 30)?
        .set_default("db_timeout_secs", 5)?
        .set_default("log_format", "pretty")?)
}
