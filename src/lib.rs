//! CRUD service over movies, directors and genres backed by SQLite.

pub mod api_docs;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::Config, error::AppResult};

pub struct AppState {
    pub config: Arc<Config>,
    pub db: DatabaseConnection,
}

impl AppState {
    /// Connects to `config.database_url`, creating the schema if needed.
    pub async fn connect(config: Config) -> AppResult<Arc<Self>> {
        let db = db::connect_and_migrate(&config.database_url).await?;
        Ok(Arc::new(Self { config: Arc::new(config), db }))
    }
}

pub use routes::router;
