use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "finboard={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let server = settings.server;
    let db = connect(&server.database).await?;
    tracing::info!("database ready");

    let engine = engine::Engine::builder().database(db).build().await?;
    server::run(engine, &server.bind, server.port).await;

    Ok(())
}

async fn connect(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let mut options = sea_orm::ConnectOptions::new(config.url());
    if matches!(config, settings::Database::Memory) {
        // each pooled connection would otherwise see its own empty database
        options.max_connections(1);
    }
    let database = sea_orm::Database::connect(options).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
