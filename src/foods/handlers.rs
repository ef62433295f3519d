use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use super::{
    catalog::DatasetError,
    dto::{LimitParams, SearchParams},
    repo_types::{FoodMatch, FoodRecord},
    search::DEFAULT_LIMIT,
    services::{
        DatasetStats, DatasetStatus, DEFAULT_CATEGORY_LIMIT, DEFAULT_POPULAR_LIMIT, MERGED_LIMIT,
    },
};
use crate::logs::{
    dto::{ParseMealRequest, ParsedMeal},
    services::parse_meal_text,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/foods/search", get(search_foods))
        .route("/foods/search/dataset", get(search_dataset))
        .route("/foods/categories", get(list_categories))
        .route("/foods/categories/:category", get(foods_in_category))
        .route("/foods/popular", get(popular_foods))
        .route("/foods/stats", get(dataset_stats))
        .route("/foods/status", get(dataset_status))
        .route("/foods/parse", post(parse_meal))
        .route("/foods/:id", get(get_food))
}

#[instrument(skip(state))]
pub async fn search_foods(
    State(state): State<AppState>,
    Query(p): Query<SearchParams>,
) -> Json<Vec<FoodMatch>> {
    let mut results = state.foods.search_merged(&p.q).await;
    results.truncate(p.limit.unwrap_or(MERGED_LIMIT));
    Json(results)
}

#[instrument(skip(state))]
pub async fn search_dataset(
    State(state): State<AppState>,
    Query(p): Query<SearchParams>,
) -> Result<Json<Vec<FoodMatch>>, (StatusCode, String)> {
    let results = state
        .foods
        .search(&p.q, p.limit.unwrap_or(DEFAULT_LIMIT))
        .await
        .map_err(unavailable)?;
    Ok(Json(results))
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let categories = state.foods.all_categories().await.map_err(unavailable)?;
    Ok(Json(categories))
}

#[instrument(skip(state))]
pub async fn foods_in_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(p): Query<LimitParams>,
) -> Result<Json<Vec<FoodRecord>>, (StatusCode, String)> {
    let foods = state
        .foods
        .foods_by_category(&category, p.limit.unwrap_or(DEFAULT_CATEGORY_LIMIT))
        .await
        .map_err(unavailable)?;
    Ok(Json(foods))
}

#[instrument(skip(state))]
pub async fn popular_foods(
    State(state): State<AppState>,
    Query(p): Query<LimitParams>,
) -> Result<Json<Vec<FoodRecord>>, (StatusCode, String)> {
    let foods = state
        .foods
        .popular_foods(p.limit.unwrap_or(DEFAULT_POPULAR_LIMIT))
        .await
        .map_err(unavailable)?;
    Ok(Json(foods))
}

#[instrument(skip(state))]
pub async fn dataset_stats(
    State(state): State<AppState>,
) -> Result<Json<DatasetStats>, (StatusCode, String)> {
    let stats = state.foods.stats().await.map_err(unavailable)?;
    Ok(Json(stats))
}

#[instrument(skip(state))]
pub async fn dataset_status(State(state): State<AppState>) -> Json<DatasetStatus> {
    Json(state.foods.status().await)
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FoodRecord>, (StatusCode, String)> {
    match state.foods.food_by_id(&id).await.map_err(unavailable)? {
        Some(food) => Ok(Json(food)),
        None => Err((StatusCode::NOT_FOUND, "Food not found".into())),
    }
}

#[instrument(skip(body))]
pub async fn parse_meal(Json(body): Json<ParseMealRequest>) -> Json<ParsedMeal> {
    Json(parse_meal_text(&body.text))
}

fn unavailable(e: DatasetError) -> (StatusCode, String) {
    warn!(error = %e, "food dataset unavailable");
    (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
}
