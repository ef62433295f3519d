use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use super::{
    correlations::{with_default, Correlation},
    dto::WindowParams,
    insights::Insight,
    risk::RiskTrajectory,
    series::{ActivityPoint, CalorieBalancePoint, CalorieIntakePoint, TrendEngine, VitalsPoint},
};
use crate::logs::repo_types::LogSnapshot;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trends/calories", get(calorie_trend))
        .route("/trends/activity", get(activity_trend))
        .route("/trends/vitals", get(vitals_trend))
        .route("/trends/balance", get(calorie_balance))
        .route("/insights", get(insights))
        .route("/risk", get(risk_trajectory))
        .route("/correlations", get(correlations))
}

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

async fn snapshot(state: &AppState) -> Result<LogSnapshot, (StatusCode, String)> {
    state.logs.snapshot().await.map_err(|e| {
        let detail = format!("{:#}", e);
        error!(error = %detail, "reading logs failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
    })
}

fn engine<'a>(state: &AppState, logs: &'a LogSnapshot) -> TrendEngine<'a> {
    TrendEngine::new(logs, state.today(), state.config.utc_offset)
}

#[instrument(skip(state))]
pub async fn calorie_trend(
    State(state): State<AppState>,
    Query(p): Query<WindowParams>,
) -> ApiResult<Vec<CalorieIntakePoint>> {
    let logs = snapshot(&state).await?;
    Ok(Json(engine(&state, &logs).calorie_intake(p.days())))
}

#[instrument(skip(state))]
pub async fn activity_trend(
    State(state): State<AppState>,
    Query(p): Query<WindowParams>,
) -> ApiResult<Vec<ActivityPoint>> {
    let logs = snapshot(&state).await?;
    Ok(Json(engine(&state, &logs).activity(p.days())))
}

#[instrument(skip(state))]
pub async fn vitals_trend(
    State(state): State<AppState>,
    Query(p): Query<WindowParams>,
) -> ApiResult<Vec<VitalsPoint>> {
    let logs = snapshot(&state).await?;
    Ok(Json(engine(&state, &logs).vitals(p.days())))
}

#[instrument(skip(state))]
pub async fn calorie_balance(
    State(state): State<AppState>,
    Query(p): Query<WindowParams>,
) -> ApiResult<Vec<CalorieBalancePoint>> {
    let logs = snapshot(&state).await?;
    Ok(Json(engine(&state, &logs).calorie_balance(p.days())))
}

#[instrument(skip(state))]
pub async fn insights(State(state): State<AppState>) -> ApiResult<Vec<Insight>> {
    let logs = snapshot(&state).await?;
    Ok(Json(engine(&state, &logs).insights()))
}

#[instrument(skip(state))]
pub async fn risk_trajectory(State(state): State<AppState>) -> ApiResult<RiskTrajectory> {
    let logs = snapshot(&state).await?;
    Ok(Json(engine(&state, &logs).risk_trajectory()))
}

#[instrument(skip(state))]
pub async fn correlations(State(state): State<AppState>) -> ApiResult<Vec<Correlation>> {
    let logs = snapshot(&state).await?;
    Ok(Json(with_default(engine(&state, &logs).correlations())))
}
