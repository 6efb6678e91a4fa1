//! Handles settings for the application. Configuration is read from
//! `settings.toml` (or the file passed with `--config`) and can be
//! overridden with `FINBOARD_*` environment variables, using `__` between
//! sections, e.g. `FINBOARD_SERVER__PORT=8080`.
//!
//! See `settings.example.toml` for the configuration.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    Memory,
    Sqlite(String),
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3001,
            database: Database::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

#[derive(Debug, Parser)]
#[command(name = "finboard", version)]
struct Args {
    /// Optional settings file path (TOML).
    #[arg(long)]
    config: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        Self::load(args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH))
    }

    fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("FINBOARD").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let settings = Settings::load("does/not/exist").unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 3001);
        assert_eq!(settings.server.database.url(), "sqlite::memory:");
    }

    #[test]
    fn sqlite_database_url() {
        let database = Database::Sqlite("data/finboard.db".to_string());
        assert_eq!(database.url(), "sqlite:data/finboard.db?mode=rwc");
    }
}
