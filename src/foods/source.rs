use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;

use crate::storage::StorageClient;

/// Somewhere the raw nutrition CSV can be fetched from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    fn describe(&self) -> String;
    async fn fetch(&self) -> anyhow::Result<Bytes>;
}

pub struct FileSource {
    pub path: PathBuf,
}

#[async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }

    async fn fetch(&self) -> anyhow::Result<Bytes> {
        let data = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("read {}", self.path.display()))?;
        Ok(Bytes::from(data))
    }
}

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> anyhow::Result<Bytes> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("GET {}", self.url))?
            .error_for_status()
            .with_context(|| format!("GET {}", self.url))?;
        resp.bytes().await.context("read response body")
    }
}

pub struct ObjectSource {
    pub storage: Arc<dyn StorageClient>,
    pub key: String,
}

#[async_trait]
impl DatasetSource for ObjectSource {
    fn describe(&self) -> String {
        format!("object://{}", self.key)
    }

    async fn fetch(&self) -> anyhow::Result<Bytes> {
        self.storage.get_object(&self.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn file_source_reads_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "food_name\nDal\n").unwrap();
        let source = FileSource {
            path: file.path().to_path_buf(),
        };
        let bytes = source.fetch().await.unwrap();
        assert_eq!(&bytes[..], b"food_name\nDal\n");
        assert!(source.describe().starts_with("file://"));
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource {
            path: dir.path().join("absent.csv"),
        };
        let err = source.fetch().await.unwrap_err();
        assert!(format!("{:#}", err).contains("absent.csv"));
    }

    struct FakeStorage;

    #[async_trait]
    impl StorageClient for FakeStorage {
        async fn get_object(&self, key: &str) -> anyhow::Result<Bytes> {
            Ok(Bytes::from(format!("food_name\n{}\n", key)))
        }
    }

    #[tokio::test]
    async fn object_source_delegates_to_storage() {
        let source = ObjectSource {
            storage: Arc::new(FakeStorage),
            key: "datasets/indb.csv".into(),
        };
        let bytes = source.fetch().await.unwrap();
        assert!(std::str::from_utf8(&bytes).unwrap().contains("datasets/indb.csv"));
    }
}
