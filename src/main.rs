mod app;
mod config;
mod foods;
mod gamification;
mod logs;
mod state;
mod storage;
mod store;
mod trends;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "wellness_tracker=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;

    if app_state.config.preload_dataset {
        let foods = app_state.foods.clone();
        tokio::spawn(async move {
            if let Err(e) = foods.cache().ensure_loaded().await {
                tracing::warn!(error = %e, "dataset preload failed; will retry on first request");
            }
        });
    }

    let app = app::build_app(app_state);
    app::serve(app).await
}
