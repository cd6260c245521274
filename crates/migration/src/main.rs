use config::{Config, File};
use sea_orm::Database;
use sea_orm_migration::prelude::*;
use serde::Deserialize;

/// The slice of `settings.toml` the migrator cares about: which database
/// the server runs against. Other keys are ignored.
#[derive(Debug, Deserialize)]
struct Settings {
    server: Server,
}

#[derive(Debug, Deserialize)]
struct Server {
    database: DatabaseSetting,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DatabaseSetting {
    Memory,
    Sqlite(String),
}

fn connection_url(settings: Option<Settings>) -> String {
    match settings.map(|settings| settings.server.database) {
        Some(DatabaseSetting::Memory) => "sqlite::memory:".to_string(),
        Some(DatabaseSetting::Sqlite(path)) => format!("sqlite:{path}?mode=rwc"),
        None => "sqlite:./bilancio.db?mode=rwc".to_string(),
    }
}

/// `DATABASE_URL` wins; otherwise the url is derived from `settings.toml`
/// so the migrator targets the same database the server will open.
fn database_url() -> String {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return url;
    }

    let settings = Config::builder()
        .add_source(File::with_name("settings").required(false))
        .build()
        .ok()
        .and_then(|config| config.try_deserialize::<Settings>().ok());
    connection_url(settings)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut args = std::env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "up".to_string());

    let db = Database::connect(database_url()).await?;

    match cmd.as_str() {
        "up" => migration::Migrator::up(&db, None).await?,
        "down" => migration::Migrator::down(&db, None).await?,
        "fresh" => migration::Migrator::fresh(&db).await?,
        "status" => {
            migration::Migrator::status(&db).await?;
        }
        _ => {
            eprintln!("Usage: cargo run -p migration -- [up|down|fresh|status]");
            std::process::exit(2);
        }
    }

    Ok(())
}
