//! Day-bucketed series, insights, risk score and correlations derived from
//! the logs.

pub mod buckets;
pub mod correlations;
mod dto;
pub mod handlers;
pub mod insights;
pub mod risk;
pub mod series;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
