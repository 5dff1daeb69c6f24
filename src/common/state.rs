use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;

/// Shared handler state. The connection is a pool; each request checks out
/// its own connection for the duration of a statement.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}
