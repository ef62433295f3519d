use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, instrument};

use super::{
    dto::{ActivitySuggestion, LogActivityRequest, LogMealRequest, LogVitalsRequest},
    repo_types::{ActivityLogEntry, LogEntry, MealLogEntry, VitalLogEntry},
    services::{self, LogError},
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/logs/meals", get(list_logs::<MealLogEntry>).post(log_meal))
        .route("/logs/meals/recent", get(recent_meals))
        .route("/logs/vitals", get(list_logs::<VitalLogEntry>).post(log_vitals))
        .route(
            "/logs/activities",
            get(list_logs::<ActivityLogEntry>).post(log_activity),
        )
        .route("/activities/suggestions", get(activity_suggestions))
}

#[instrument(skip(state))]
pub async fn list_logs<T: LogEntry + 'static>(
    State(state): State<AppState>,
) -> Result<Json<Vec<T>>, (StatusCode, String)> {
    let entries = state.logs.list::<T>().await.map_err(internal)?;
    Ok(Json(entries))
}

#[instrument(skip(state))]
pub async fn recent_meals(
    State(state): State<AppState>,
) -> Result<Json<Vec<MealLogEntry>>, (StatusCode, String)> {
    let meals = services::recent_meals(&state.logs).await.map_err(internal)?;
    Ok(Json(meals))
}

#[instrument(skip(state, body))]
pub async fn log_meal(
    State(state): State<AppState>,
    Json(body): Json<LogMealRequest>,
) -> Result<(StatusCode, Json<MealLogEntry>), (StatusCode, String)> {
    let entry = services::log_meal(&state.logs, body).await.map_err(rejected)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state, body))]
pub async fn log_vitals(
    State(state): State<AppState>,
    Json(body): Json<LogVitalsRequest>,
) -> Result<(StatusCode, Json<VitalLogEntry>), (StatusCode, String)> {
    let entry = services::log_vitals(&state.logs, body).await.map_err(rejected)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state, body))]
pub async fn log_activity(
    State(state): State<AppState>,
    Json(body): Json<LogActivityRequest>,
) -> Result<(StatusCode, Json<ActivityLogEntry>), (StatusCode, String)> {
    let entry = services::log_activity(&state.logs, body)
        .await
        .map_err(rejected)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn activity_suggestions() -> Json<&'static [ActivitySuggestion]> {
    Json(services::activity_suggestions())
}

fn rejected(e: LogError) -> (StatusCode, String) {
    match e {
        LogError::Invalid(msg) => (StatusCode::BAD_REQUEST, msg),
        LogError::Store(e) => internal(e),
    }
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    let detail = format!("{:#}", e);
    error!(error = %detail, "log store failure");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
}
