use config::{Config, ConfigError, Environment, File};
use sea_orm::Database;
use sea_orm_migration::prelude::*;
use serde::Deserialize;

const DEFAULT_DATABASE_URL: &str = "sqlite:./finboard.db?mode=rwc";
const DEFAULT_SETTINGS_PATH: &str = "settings";

/// The part of the application settings that names the database.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    server: ServerSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServerSettings {
    database: Option<DatabaseSettings>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DatabaseSettings {
    Memory,
    Sqlite(String),
}

/// `DATABASE_URL` wins; otherwise the sqlite file from the settings file and
/// `FINBOARD_*` overrides, the same sources the server reads.
fn database_url(explicit: Option<String>, settings_path: &str) -> Result<String, ConfigError> {
    if let Some(url) = explicit {
        return Ok(url);
    }

    let settings: Settings = Config::builder()
        .add_source(File::with_name(settings_path).required(false))
        .add_source(Environment::with_prefix("FINBOARD").separator("__"))
        .build()?
        .try_deserialize()?;

    Ok(match settings.server.database {
        Some(DatabaseSettings::Sqlite(path)) => format!("sqlite:{path}?mode=rwc"),
        Some(DatabaseSettings::Memory) | None => DEFAULT_DATABASE_URL.to_string(),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut args = std::env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "up".to_string());
    let settings_path = args
        .next()
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());

    let db_url = database_url(std::env::var("DATABASE_URL").ok(), &settings_path)?;
    let db = Database::connect(&db_url).await?;

    match cmd.as_str() {
        "up" => migration::Migrator::up(&db, None).await?,
        "down" => migration::Migrator::down(&db, None).await?,
        "fresh" => migration::Migrator::fresh(&db).await?,
        "status" => {
            migration::Migrator::status(&db).await?;
        }
        _ => {
            eprintln!("Usage: cargo run -p migration -- [up|down|fresh|status] [settings path]");
            std::process::exit(2);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_url_wins() {
        let url = database_url(Some("sqlite::memory:".to_string()), "does/not/exist").unwrap();
        assert_eq!(url, "sqlite::memory:");
    }

    #[test]
    fn missing_settings_use_default_file() {
        let url = database_url(None, "does/not/exist").unwrap();
        assert_eq!(url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn sqlite_path_comes_from_settings_file() {
        let path = std::env::temp_dir().join(format!(
            "finboard-migration-settings-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[server]\nport = 3001\ndatabase = { sqlite = \"data/books.db\" }\n",
        )
        .unwrap();

        let url = database_url(None, path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(url, "sqlite:data/books.db?mode=rwc");
    }
}
