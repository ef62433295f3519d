use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Mutex;
use tracing::{debug, error};

use super::repo_types::{ActivityLogEntry, LogEntry, LogSnapshot, MealLogEntry, VitalLogEntry};
use crate::store::KeyValueStore;

/// Append-only log lists on top of a key-value store. Each list is one
/// serialized JSON array, newest entry first.
pub struct LogBook {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl LogBook {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Corrupted data is logged and read as an empty list.
    pub async fn list<T: LogEntry>(&self) -> anyhow::Result<Vec<T>> {
        let Some(raw) = self
            .store
            .get(T::STORE_KEY)
            .await
            .with_context(|| format!("read {}", T::STORE_KEY))?
        else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                error!(error = %e, key = T::STORE_KEY, "corrupted log list; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Prepends `entry` and rewrites the whole list.
    pub async fn append<T: LogEntry>(&self, entry: T) -> anyhow::Result<T> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.list::<T>().await?;
        entries.insert(0, entry.clone());
        let raw = serde_json::to_string(&entries).context("serialize log list")?;
        self.store
            .set(T::STORE_KEY, raw)
            .await
            .with_context(|| format!("write {}", T::STORE_KEY))?;
        debug!(key = T::STORE_KEY, total = entries.len(), "log appended");
        Ok(entry)
    }

    pub async fn snapshot(&self) -> anyhow::Result<LogSnapshot> {
        Ok(LogSnapshot {
            meals: self.list::<MealLogEntry>().await?,
            vitals: self.list::<VitalLogEntry>().await?,
            activities: self.list::<ActivityLogEntry>().await?,
        })
    }
}
