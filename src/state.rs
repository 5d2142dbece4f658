use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::services::{CatalogService, SongInfoService};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Result<Self> {
        let song_info = SongInfoService::new(
            config.song_info_url.clone(),
            config.song_info_token.clone(),
            config.song_info_timeout(),
        )?;
        let catalog = CatalogService::new(db.clone(), song_info, config.db_timeout());

        Ok(Self {
            db,
            config: Arc::new(config),
            catalog,
        })
    }
}
