//! Shared application state.

use crate::config::{Config, StorageBackend};
use crate::interaction_logger::InteractionLogger;
use crate::token_image::TokenImage;
use bisou_core::{FrameStore, MemoryStore, SqliteStore};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state.
pub struct AppState {
    pub interactions: InteractionLogger,
    pub token_image: TokenImage,
    pub config: Config,
}

impl AppState {
    /// Build state with the store selected by `config.storage`.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn FrameStore> = match config.storage {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Sqlite => Arc::new(SqliteStore::open(&config.db_path)?),
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn FrameStore>) -> anyhow::Result<Self> {
        let token_image = TokenImage::new(
            config.token_image_url.clone(),
            Duration::from_millis(config.image_fetch_timeout_ms),
        )?;

        Ok(Self {
            interactions: InteractionLogger::new(store),
            token_image,
            config,
        })
    }

    pub fn store(&self) -> &Arc<dyn FrameStore> {
        self.interactions.store()
    }
}
