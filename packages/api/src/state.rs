use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::schema::ensure_schema;

pub type AppState = Arc<State>;

/// Shared per-process state: the storage handle every operation reads
/// from or writes to. Constructed once at startup and passed into the
/// router; nothing here is reachable through globals.
pub struct State {
    pub db: DatabaseConnection,
}

impl State {
    /// Connects to the backing database and makes sure the sales table
    /// and its indexes exist.
    pub async fn new(database_url: &str) -> Result<Self, DbErr> {
        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(10)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(cfg!(debug_assertions));

        let db = Database::connect(opt).await?;
        ensure_schema(&db).await?;

        Ok(Self { db })
    }
}
