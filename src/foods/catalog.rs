use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tracing::{error, info, warn};

use super::{dataset::parse_dataset, repo_types::FoodRecord, source::DatasetSource};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to fetch dataset from {source_name}: {message}")]
    Fetch {
        source_name: String,
        message: String,
    },
    #[error("failed to parse dataset: {0}")]
    Parse(String),
    #[error("dataset load was interrupted")]
    Interrupted,
}

/// The loaded, immutable food list in dataset order.
#[derive(Debug, Default)]
pub struct FoodDataset {
    pub foods: Vec<FoodRecord>,
}

impl FoodDataset {
    pub fn new(foods: Vec<FoodRecord>) -> Self {
        Self { foods }
    }

    pub fn find(&self, id: &str) -> Option<&FoodRecord> {
        self.foods.iter().find(|f| f.id == id)
    }

    /// Distinct non-empty categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .foods
            .iter()
            .map(|f| f.category.clone())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Empty,
    Loading,
    Ready,
    Failed,
}

type LoadOutcome = Result<Arc<FoodDataset>, DatasetError>;

enum Slot {
    Empty,
    Loading(watch::Receiver<Option<LoadOutcome>>),
    Ready(Arc<FoodDataset>),
    Failed(DatasetError),
}

/// Memoized dataset loader. Concurrent callers share one in-flight load;
/// a failed load is remembered until the next call retries it.
pub struct DatasetCache {
    source: Arc<dyn DatasetSource>,
    slot: Arc<Mutex<Slot>>,
}

impl DatasetCache {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            source,
            slot: Arc::new(Mutex::new(Slot::Empty)),
        }
    }

    pub async fn state(&self) -> LoadState {
        match &*self.slot.lock().await {
            Slot::Empty => LoadState::Empty,
            Slot::Loading(_) => LoadState::Loading,
            Slot::Ready(_) => LoadState::Ready,
            Slot::Failed(_) => LoadState::Failed,
        }
    }

    pub async fn last_error(&self) -> Option<DatasetError> {
        match &*self.slot.lock().await {
            Slot::Failed(e) => Some(e.clone()),
            _ => None,
        }
    }

    pub async fn ensure_loaded(&self) -> Result<Arc<FoodDataset>, DatasetError> {
        let mut rx = {
            let mut slot = self.slot.lock().await;
            match &*slot {
                Slot::Ready(ds) => return Ok(ds.clone()),
                Slot::Loading(rx) => rx.clone(),
                Slot::Empty | Slot::Failed(_) => {
                    let (tx, rx) = watch::channel(None);
                    *slot = Slot::Loading(rx.clone());
                    self.spawn_load(tx);
                    rx
                }
            }
        };

        let outcome = rx.wait_for(Option::is_some).await.map(|v| v.clone());
        match outcome {
            Ok(Some(outcome)) => outcome,
            _ => {
                // The loader went away without reporting; make the next call start over.
                let mut slot = self.slot.lock().await;
                if let Slot::Loading(current) = &*slot {
                    if current.same_channel(&rx) {
                        warn!("dataset load interrupted; resetting cache");
                        *slot = Slot::Empty;
                    }
                }
                Err(DatasetError::Interrupted)
            }
        }
    }

    fn spawn_load(&self, tx: watch::Sender<Option<LoadOutcome>>) {
        let source = self.source.clone();
        let slot = self.slot.clone();
        tokio::spawn(async move {
            let outcome = load(source.as_ref()).await;
            {
                let mut slot = slot.lock().await;
                *slot = match &outcome {
                    Ok(ds) => {
                        info!(foods = ds.foods.len(), source = %source.describe(), "food dataset loaded");
                        Slot::Ready(ds.clone())
                    }
                    Err(e) => {
                        error!(error = %e, source = %source.describe(), "food dataset load failed");
                        Slot::Failed(e.clone())
                    }
                };
            }
            tx.send_replace(Some(outcome));
        });
    }
}

async fn load(source: &dyn DatasetSource) -> LoadOutcome {
    let bytes = source.fetch().await.map_err(|e| DatasetError::Fetch {
        source_name: source.describe(),
        message: format!("{:#}", e),
    })?;
    let foods = tokio::task::spawn_blocking(move || parse_dataset(&bytes))
        .await
        .map_err(|e| DatasetError::Parse(e.to_string()))??;
    Ok(Arc::new(FoodDataset::new(foods)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    pub(crate) const CSV: &str = "food_code,food_name,energy_kcal,protein_g\nA1,Rice,130,2.7\nA2,Masala tea,40,1\n";

    /// Serves canned CSV, failing the first `fail_times` fetches.
    pub(crate) struct ScriptedSource {
        pub calls: AtomicUsize,
        pub fail_times: usize,
        pub delay: Duration,
        pub body: &'static str,
    }

    impl ScriptedSource {
        pub(crate) fn ok(body: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_times: 0,
                delay: Duration::from_millis(0),
                body,
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                fail_times: usize::MAX,
                ..Self::ok(CSV)
            }
        }
    }

    #[async_trait]
    impl DatasetSource for ScriptedSource {
        fn describe(&self) -> String {
            "scripted".into()
        }

        async fn fetch(&self) -> anyhow::Result<Bytes> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if call < self.fail_times {
                anyhow::bail!("offline");
            }
            Ok(Bytes::from_static(self.body.as_bytes()))
        }
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_load() {
        let source = Arc::new(ScriptedSource {
            delay: Duration::from_millis(50),
            ..ScriptedSource::ok(CSV)
        });
        let cache = Arc::new(DatasetCache::new(source.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.ensure_loaded().await })
            })
            .collect();
        for h in handles {
            let ds = h.await.unwrap().expect("loaded");
            assert_eq!(ds.foods.len(), 2);
        }

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.state().await, LoadState::Ready);

        cache.ensure_loaded().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_is_reported_and_retry_is_allowed() {
        let source = Arc::new(ScriptedSource {
            fail_times: 1,
            ..ScriptedSource::ok(CSV)
        });
        let cache = DatasetCache::new(source.clone());
        assert_eq!(cache.state().await, LoadState::Empty);

        let err = cache.ensure_loaded().await.unwrap_err();
        assert!(matches!(err, DatasetError::Fetch { .. }));
        assert!(err.to_string().contains("offline"));
        assert_eq!(cache.state().await, LoadState::Failed);
        assert_eq!(cache.last_error().await, Some(err));

        let ds = cache.ensure_loaded().await.expect("retry succeeds");
        assert_eq!(ds.foods[0].name, "Rice");
        assert_eq!(cache.state().await, LoadState::Ready);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn categories_are_distinct_and_sorted() {
        let cache = DatasetCache::new(Arc::new(ScriptedSource::ok(
            "food_name\nTea\nRice\nCoffee\nIdli\n",
        )));
        let ds = cache.ensure_loaded().await.unwrap();
        assert_eq!(
            ds.categories(),
            vec!["Beverages", "Grains & Cereals", "Other"]
        );
        assert_eq!(ds.find("csv_1").map(|f| f.name.as_str()), Some("Rice"));
        assert!(ds.find("csv_9").is_none());
    }
}
