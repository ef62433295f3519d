use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::KeyValueStore;

#[derive(Clone)]
pub struct PgStore {
    pub db: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for PgStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            r#"
            SELECT value
            FROM kv_entries
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await
        .with_context(|| format!("kv get {}", key))?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_entries (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, updated_at = now()
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.db)
        .await
        .with_context(|| format!("kv set {}", key))?;
        Ok(())
    }
}
