use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, instrument};

use super::{
    dto::{Achievement, Progress, Quest},
    services::Scoreboard,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/gamification/achievements", get(achievements))
        .route("/gamification/quests/daily", get(daily_quests))
        .route("/gamification/quests/weekly", get(weekly_quests))
        .route("/gamification/progress", get(progress))
}

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

async fn scoreboard(state: &AppState) -> Result<Scoreboard, (StatusCode, String)> {
    let logs = state.logs.snapshot().await.map_err(|e| {
        let detail = format!("{:#}", e);
        error!(error = %detail, "reading logs failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
    })?;
    Ok(Scoreboard::new(&logs, state.today(), state.config.utc_offset))
}

#[instrument(skip(state))]
pub async fn achievements(State(state): State<AppState>) -> ApiResult<Vec<Achievement>> {
    Ok(Json(scoreboard(&state).await?.achievements()))
}

#[instrument(skip(state))]
pub async fn daily_quests(State(state): State<AppState>) -> ApiResult<Vec<Quest>> {
    Ok(Json(scoreboard(&state).await?.daily_quests()))
}

#[instrument(skip(state))]
pub async fn weekly_quests(State(state): State<AppState>) -> ApiResult<Vec<Quest>> {
    Ok(Json(scoreboard(&state).await?.weekly_quests()))
}

#[instrument(skip(state))]
pub async fn progress(State(state): State<AppState>) -> ApiResult<Progress> {
    Ok(Json(scoreboard(&state).await?.progress()))
}
