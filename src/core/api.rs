//! HTTP API for TAS
//!
//! Endpoints:
//! - POST /analyze - Analyze a message against optional topic histories
//! - POST /hedge - Hedge-score one sentence
//! - POST /migration - Detect a migration in one label history
//! - GET /health - Health check

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, info_span};

use crate::core::Analyzer;
use crate::error::TasError;
use crate::types::{AnalysisOutput, HedgeResult, MigrationEvent};

/// App state
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub messages_analyzed: AtomicU64,
}

/// Analyze request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub message: String,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    #[serde(default)]
    pub tense_history: BTreeMap<String, Vec<String>>,
}

/// Analyze response
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub output: AnalysisOutput,
    pub fingerprint: String,
}

/// Hedge request
#[derive(Debug, Deserialize)]
pub struct HedgeRequest {
    pub sentence: String,
}

/// Migration request
#[derive(Debug, Deserialize)]
pub struct MigrationRequest {
    pub history: Vec<String>,
    #[serde(default)]
    pub contrast_present: bool,
    pub window: Option<usize>,
    pub topic: Option<String>,
}

/// Migration response
#[derive(Debug, Serialize)]
pub struct MigrationResponse {
    pub migration: Option<MigrationEvent>,
    pub trending_shift: Option<MigrationEvent>,
    pub window: usize,
    pub interpretation: Option<String>,
    pub recommended_actions: Vec<String>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub messages_analyzed: u64,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// TasError → HTTP status + JSON body
pub struct ApiError(TasError);

impl From<TasError> for ApiError {
    fn from(err: TasError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            TasError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            TasError::AnnotationUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            TasError::Annotation { .. } | TasError::EmptyAnnotation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            code: self.0.code().to_string(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Create the API router
pub fn create_router(analyzer: Arc<Analyzer>) -> Router {
    let state = Arc::new(AppState {
        analyzer,
        messages_analyzed: AtomicU64::new(0),
    });

    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/hedge", post(hedge))
        .route("/migration", post(migration))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        messages_analyzed: state.messages_analyzed.load(Ordering::Relaxed),
    })
}

/// Analyze a message
async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let span = info_span!(
        "analyze",
        user_id = req.user_id.as_deref().unwrap_or("anonymous"),
        session_id = req.session_id.as_deref().unwrap_or("default"),
    );
    let output = span.in_scope(|| state.analyzer.analyze(&req.message, &req.tense_history))?;
    state.messages_analyzed.fetch_add(1, Ordering::Relaxed);

    Ok(Json(AnalyzeResponse {
        fingerprint: output.fingerprint(),
        output,
    }))
}

/// Hedge-score one sentence
async fn hedge(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HedgeRequest>,
) -> Result<Json<HedgeResult>, ApiError> {
    Ok(Json(state.analyzer.score_hedges(&req.sentence)?))
}

/// Detect migration and trending shift in one history
async fn migration(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MigrationRequest>,
) -> Json<MigrationResponse> {
    let detector = state.analyzer.migration_detector();
    let window = req.window.unwrap_or_else(|| detector.trend_window());

    let migration = detector.detect_migration_labels(&req.history, req.contrast_present);
    let trending_shift = detector.detect_trending_shift_labels(&req.history, window);
    let reported = migration.or(trending_shift);

    Json(MigrationResponse {
        migration,
        trending_shift,
        window,
        interpretation: reported.map(|e| e.interpretation(req.topic.as_deref())),
        recommended_actions: reported
            .map(|e| e.recommended_actions().iter().map(|a| a.to_string()).collect())
            .unwrap_or_default(),
    })
}

/// Run the API server
pub async fn run_server(addr: &str, analyzer: Arc<Analyzer>) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(analyzer);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "TAS API listening");
    println!("TAS API running on {}", addr);
    println!("  POST /analyze   - Analyze a message");
    println!("  POST /hedge     - Hedge-score a sentence");
    println!("  POST /migration - Detect tense migration");
    println!("  GET  /health    - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
