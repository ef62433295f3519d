use std::sync::Arc;

use time::{Date, OffsetDateTime};
use tracing::info;

use crate::config::{AppConfig, DatasetConfig};
use crate::foods::services::FoodCatalog;
use crate::foods::source::{DatasetSource, FileSource, HttpSource, ObjectSource};
use crate::logs::repo::LogBook;
use crate::storage::{Storage, StorageClient};
use crate::store::{KeyValueStore, MemoryStore, PgStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub foods: Arc<FoodCatalog>,
    pub logs: Arc<LogBook>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let store: Arc<dyn KeyValueStore> = match &config.database_url {
            Some(url) => {
                let pg = PgStore::connect(url).await?;
                pg.migrate().await?;
                info!("log store: postgres");
                Arc::new(pg)
            }
            None => {
                info!("log store: in-memory (DATABASE_URL not set)");
                Arc::new(MemoryStore::new())
            }
        };

        let source: Arc<dyn DatasetSource> = match &config.dataset {
            DatasetConfig::File(path) => Arc::new(FileSource { path: path.clone() }),
            DatasetConfig::Url(url) => Arc::new(HttpSource::new(url.clone())),
            DatasetConfig::Object { store, key } => {
                let storage = Arc::new(Storage::new(store).await?) as Arc<dyn StorageClient>;
                Arc::new(ObjectSource {
                    storage,
                    key: key.clone(),
                })
            }
        };
        info!(dataset = %source.describe(), "dataset source configured");

        Ok(Self::from_parts(config, store, source))
    }

    pub fn from_parts(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn DatasetSource>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            foods: Arc::new(FoodCatalog::new(source)),
            logs: Arc::new(LogBook::new(store)),
        }
    }

    /// Current calendar date in the configured local zone.
    pub fn today(&self) -> Date {
        OffsetDateTime::now_utc()
            .to_offset(self.config.utc_offset)
            .date()
    }

    #[cfg(test)]
    pub fn fake(source: Arc<dyn DatasetSource>) -> Self {
        let config = AppConfig {
            database_url: None,
            dataset: DatasetConfig::File("unused.csv".into()),
            utc_offset: time::UtcOffset::UTC,
            preload_dataset: false,
        };
        Self::from_parts(config, Arc::new(MemoryStore::new()), source)
    }
}
