use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;
use time::{macros::format_description, UtcOffset};

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectStoreConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

/// Where the nutrition dataset CSV is fetched from.
#[derive(Debug, Clone, Deserialize)]
pub enum DatasetConfig {
    File(PathBuf),
    Url(String),
    Object { store: ObjectStoreConfig, key: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub dataset: DatasetConfig,
    pub utc_offset: UtcOffset,
    pub preload_dataset: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());

        let dataset = if let Ok(url) = std::env::var("DATASET_URL") {
            DatasetConfig::Url(url)
        } else if let Ok(key) = std::env::var("DATASET_OBJECT_KEY") {
            DatasetConfig::Object {
                store: ObjectStoreConfig {
                    endpoint: std::env::var("MINIO_ENDPOINT").context("MINIO_ENDPOINT")?,
                    bucket: std::env::var("MINIO_BUCKET").context("MINIO_BUCKET")?,
                    access_key: std::env::var("MINIO_ACCESS_KEY").context("MINIO_ACCESS_KEY")?,
                    secret_key: std::env::var("MINIO_SECRET_KEY").context("MINIO_SECRET_KEY")?,
                    region: std::env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".into()),
                },
                key,
            }
        } else {
            DatasetConfig::File(
                std::env::var("DATASET_PATH")
                    .unwrap_or_else(|_| "data/Anuvaad_INDB_2024.11.csv".into())
                    .into(),
            )
        };

        let utc_offset = match std::env::var("LOCAL_UTC_OFFSET") {
            Ok(raw) => parse_utc_offset(&raw)?,
            Err(_) => UtcOffset::UTC,
        };

        let preload_dataset = std::env::var("PRELOAD_DATASET")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);

        Ok(Self {
            database_url,
            dataset,
            utc_offset,
            preload_dataset,
        })
    }
}

/// Parses offsets written as `+05:30`, `-08:00` or `Z`.
pub fn parse_utc_offset(raw: &str) -> anyhow::Result<UtcOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Ok(UtcOffset::UTC);
    }
    UtcOffset::parse(
        raw,
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )
    .with_context(|| format!("invalid LOCAL_UTC_OFFSET {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_offsets() {
        let ist = parse_utc_offset("+05:30").expect("ist");
        assert_eq!(ist.whole_minutes(), 330);
        let pst = parse_utc_offset("-08:00").expect("pst");
        assert_eq!(pst.whole_hours(), -8);
        assert_eq!(parse_utc_offset("Z").unwrap(), UtcOffset::UTC);
    }

    #[test]
    fn rejects_garbage_offset() {
        let err = parse_utc_offset("half past five").unwrap_err();
        assert!(err.to_string().contains("LOCAL_UTC_OFFSET"));
    }
}
