use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::KeyValueStore;

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("mealLogs").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let store = MemoryStore::new();
        store.set("k", "[1]".into()).await.unwrap();
        store.set("k", "[2,1]".into()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("[2,1]"));
    }
}
