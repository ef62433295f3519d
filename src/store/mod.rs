//! Key-value persistence behind the log lists.

use async_trait::async_trait;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> anyhow::Result<()>;
}
