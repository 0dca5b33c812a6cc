use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

#[derive(Clone)]
pub struct DatabaseService {
    pub(crate) database_connection: DatabaseConnection,
}

impl DatabaseService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(uri.to_string());
        if uri.contains(":memory:") {
            // every pooled connection would otherwise get its own empty database
            options.max_connections(1).min_connections(1);
        }
        options.sqlx_logging(false);

        info!("Connecting to database...");
        let database_connection = Database::connect(options).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Database ready.");
        Ok(Self { database_connection })
    }
}
