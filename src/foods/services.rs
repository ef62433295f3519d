use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::{
    catalog::{DatasetCache, DatasetError, LoadState},
    curated::{find_curated, search_local},
    repo_types::{FoodMatch, FoodRecord, FoodSource},
    search::rank,
    source::DatasetSource,
};

/// Combined result cap for merged searches.
pub const MERGED_LIMIT: usize = 20;
const DATABASE_LIMIT: usize = 15;
pub const DEFAULT_CATEGORY_LIMIT: usize = 50;
pub const DEFAULT_POPULAR_LIMIT: usize = 20;

#[derive(Debug, Serialize)]
pub struct DatasetStats {
    pub total_foods: usize,
    pub total_categories: usize,
    pub categories: Vec<String>,
    pub state: LoadState,
}

/// Load state without triggering a load.
#[derive(Debug, Serialize)]
pub struct DatasetStatus {
    pub state: LoadState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct FoodCatalog {
    cache: DatasetCache,
}

impl FoodCatalog {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            cache: DatasetCache::new(source),
        }
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// Ranked dataset search. Blank queries return early without loading.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<FoodMatch>, DatasetError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let ds = self.cache.ensure_loaded().await?;
        Ok(rank(&ds.foods, query, limit)
            .into_iter()
            .map(|(food, score)| FoodMatch {
                food: food.clone(),
                source: FoodSource::Database,
                score: Some(score),
            })
            .collect())
    }

    /// Dataset results first, then curated foods that are not near-duplicates.
    /// A dataset failure degrades to curated-only results.
    pub async fn search_merged(&self, query: &str) -> Vec<FoodMatch> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let local = search_local(query);
        match self.search(query, DATABASE_LIMIT).await {
            Ok(database) => merge_results(database, local, MERGED_LIMIT),
            Err(e) => {
                warn!(error = %e, query, "dataset search failed; using curated foods only");
                local
                    .into_iter()
                    .map(|food| FoodMatch {
                        food,
                        source: FoodSource::Local,
                        score: None,
                    })
                    .collect()
            }
        }
    }

    pub async fn all_categories(&self) -> Result<Vec<String>, DatasetError> {
        Ok(self.cache.ensure_loaded().await?.categories())
    }

    pub async fn foods_by_category(
        &self,
        category: &str,
        limit: usize,
    ) -> Result<Vec<FoodRecord>, DatasetError> {
        let ds = self.cache.ensure_loaded().await?;
        Ok(ds
            .foods
            .iter()
            .filter(|f| f.category == category)
            .take(limit)
            .cloned()
            .collect())
    }

    pub async fn food_by_id(&self, id: &str) -> Result<Option<FoodRecord>, DatasetError> {
        if let Some(food) = find_curated(id) {
            return Ok(Some(food.clone()));
        }
        Ok(self.cache.ensure_loaded().await?.find(id).cloned())
    }

    /// Foods with energy, densest first.
    pub async fn popular_foods(&self, limit: usize) -> Result<Vec<FoodRecord>, DatasetError> {
        let ds = self.cache.ensure_loaded().await?;
        let mut foods: Vec<&FoodRecord> = ds
            .foods
            .iter()
            .filter(|f| f.calories_per_100_unit > 0.0)
            .collect();
        foods.sort_by(|a, b| b.nutrient_density().total_cmp(&a.nutrient_density()));
        Ok(foods.into_iter().take(limit).cloned().collect())
    }

    pub async fn status(&self) -> DatasetStatus {
        DatasetStatus {
            state: self.cache.state().await,
            error: self.cache.last_error().await.map(|e| e.to_string()),
        }
    }

    pub async fn stats(&self) -> Result<DatasetStats, DatasetError> {
        let ds = self.cache.ensure_loaded().await?;
        let categories = ds.categories();
        Ok(DatasetStats {
            total_foods: ds.foods.len(),
            total_categories: categories.len(),
            categories,
            state: self.cache.state().await,
        })
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Equal names, or one containing the other when the shorter is longer than 3 chars.
pub fn is_near_duplicate(a: &str, b: &str) -> bool {
    a == b
        || (a.contains(b) && b.chars().count() > 3)
        || (b.contains(a) && a.chars().count() > 3)
}

pub fn merge_results(
    database: Vec<FoodMatch>,
    local: Vec<FoodRecord>,
    cap: usize,
) -> Vec<FoodMatch> {
    let mut seen: Vec<String> = Vec::new();
    let mut out: Vec<FoodMatch> = Vec::new();

    for m in database {
        let name = normalize(&m.food.name);
        if !seen.contains(&name) {
            seen.push(name);
            out.push(m);
        }
    }

    for food in local {
        if out.len() >= cap {
            break;
        }
        let name = normalize(&food.name);
        if seen.iter().any(|s| is_near_duplicate(s, &name)) {
            debug!(name = %food.name, "skipping curated near-duplicate");
            continue;
        }
        seen.push(name);
        out.push(FoodMatch {
            food,
            source: FoodSource::Local,
            score: None,
        });
    }

    out.truncate(cap);
    out
}
