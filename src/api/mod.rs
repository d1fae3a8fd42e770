//! HTTP API.
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | POST | `/api/tasks/analyze/` | Validate and rank a batch, full [`AnalysisResult`] |
//! | GET | `/api/tasks/suggest/` | Top 3 picks, `?tasks=<json>&strategy=<name>&weights=<json>` |
//! | GET | `/health` | Liveness probe |
//!
//! Paths are served with and without the trailing slash. Handlers are thin:
//! they validate, call into [`crate::scoring`], and serialize the result.

mod error;

pub use error::ApiError;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::models::{AnalysisResult, SuggestionResult, TaskInput};
use crate::scoring::{self, Strategy};
use crate::validation::{validate_options, validate_tasks};

/// Shared, read-only server state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Pins the reference date for every request. `None` = current date.
    pub reference_date: Option<NaiveDate>,
}

impl AppState {
    /// Creates state that pins the reference date.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tasks/analyze/", post(analyze_tasks))
        .route("/api/tasks/analyze", post(analyze_tasks))
        .route("/api/tasks/suggest/", get(suggest_tasks))
        .route("/api/tasks/suggest", get(suggest_tasks))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves the API until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /api/tasks/analyze/`
pub async fn analyze_tasks(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
    run_analysis(&state, &payload).map(Json)
}

/// `GET /api/tasks/suggest/`
pub async fn suggest_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SuggestionResult>, ApiError> {
    run_suggestion(&state, &params).map(Json)
}

/// Validates an analyze payload (`{tasks, options}`) and ranks it.
pub fn run_analysis(state: &AppState, payload: &Value) -> Result<AnalysisResult, ApiError> {
    let Some(body) = payload.as_object() else {
        return Err(ApiError::MalformedBody("expected a JSON object".into()));
    };

    let tasks = match body.get("tasks") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => validate_tasks(items)?,
        Some(_) => return Err(ApiError::MalformedBody("\"tasks\" must be a list".into())),
    };

    let mut options = validate_options(body.get("options")).map_err(ApiError::InvalidOptions)?;
    options.today = state.reference_date;

    let result = scoring::analyze(&tasks, &options);
    info!(
        tasks = tasks.len(),
        strategy = %options.strategy,
        cycles = result.cycles.len(),
        "analyzed tasks"
    );
    Ok(result)
}

/// Parses suggest query parameters and returns the top picks.
///
/// `tasks` must be a valid JSON list when present, but its fields are read
/// leniently (see [`TaskInput`]). An unparseable `weights` value is ignored
/// and `strategy` falls back to `smart_balance`.
pub fn run_suggestion(
    state: &AppState,
    params: &HashMap<String, String>,
) -> Result<SuggestionResult, ApiError> {
    let tasks: Vec<TaskInput> = match params.get("tasks").filter(|s| !s.is_empty()) {
        Some(raw) => serde_json::from_str(raw).map_err(|_| ApiError::InvalidTasksQuery)?,
        None => Vec::new(),
    };

    let weights: HashMap<String, f64> = params
        .get("weights")
        .filter(|s| !s.is_empty())
        .and_then(|raw| match serde_json::from_str(raw) {
            Ok(w) => Some(w),
            Err(err) => {
                warn!(error = %err, "ignoring unparseable weights");
                None
            }
        })
        .unwrap_or_default();

    let strategy = params
        .get("strategy")
        .map(String::as_str)
        .unwrap_or(Strategy::default().name());

    let result = scoring::suggest(&tasks, strategy, &weights, state.reference_date);
    info!(
        tasks = tasks.len(),
        strategy,
        suggestions = result.suggestions.len(),
        "suggested tasks"
    );
    Ok(result)
}
