use fiszki_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

pub async fn init_pool_and_migrate(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);
    // An in-memory SQLite database lives and dies with its connection.
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    let db = Database::connect(options).await?;

    Migrator::up(&db, None).await?;
    info!(backend = ?db.get_database_backend(), "database migrated");

    Ok(db)
}
