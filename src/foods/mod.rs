//! Nutrition dataset loading, ranking and the curated fallback list.

pub mod catalog;
pub mod curated;
pub mod dataset;
mod dto;
pub mod handlers;
pub mod repo_types;
pub mod search;
pub mod services;
pub mod source;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
