//! HTTP transport over `GuessService`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/movies` | Id + title listing |
//! | `POST` | `/api/guess` | Compare a guess against today's target |
//! | `GET`  | `/api/cron/daily` | Trigger today's selection (scheduler only) |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! Successful responses wrap their payload as `{ "data": ... }`. Errors are
//! `{ "error": { "code": "not_found", "message": "Movie 12 not found" } }`.
//!
//! # CORS
//!
//! Any origin may call the API with `GET`, `POST` and `OPTIONS`.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use catalog::{DailyTarget, MovieId, MovieSummary};
use comparison::ComparisonResult;

use crate::config::ServerConfig;
use crate::error::GameError;
use crate::service::GuessService;

/// Header carrying the scheduler's shared secret
pub const CRON_SECRET_HEADER: &str = "x-cron-secret";

/// Source of "today" for guesses and selection
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Calendar date in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Shared state handed to every handler
#[derive(Clone)]
struct AppState {
    service: GuessService,
    clock: Arc<dyn Clock>,
    cron_secret: Option<Arc<str>>,
}

/// Build the application router
pub fn router(service: GuessService, clock: Arc<dyn Clock>, cron_secret: Option<String>) -> Router {
    let state = AppState {
        service,
        clock,
        cron_secret: cron_secret.map(Arc::from),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/api/movies", get(handle_movies))
        .route("/api/guess", post(handle_guess))
        .route("/api/cron/daily", get(handle_cron_daily))
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to `config.bind_addr` and serve until the process stops
pub async fn serve(config: &ServerConfig, service: GuessService) -> anyhow::Result<()> {
    if config.cron_secret.is_none() {
        warn!("CRON_SECRET is not set; the cron route is open to any caller");
    }
    let app = router(service, Arc::new(SystemClock), config.cron_secret.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Responses ============

#[derive(Serialize)]
struct DataResponse<T> {
    data: T,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Error that converts into an HTTP response
#[derive(Debug)]
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl AppError {
    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "unauthorized".to_string(),
            message: "Unauthorized".to_string(),
        }
    }
}

impl From<GameError> for AppError {
    fn from(err: GameError) -> Self {
        let status = match &err {
            GameError::Validation(_) => StatusCode::BAD_REQUEST,
            GameError::NotFound { .. } => StatusCode::NOT_FOUND,
            GameError::NoTargetForToday { .. } => StatusCode::CONFLICT,
            GameError::EmptyCatalog | GameError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("Request failed: {}", err);
        }
        Self {
            status,
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /api/movies ============

async fn handle_movies(State(state): State<AppState>) -> Json<DataResponse<Vec<MovieSummary>>> {
    Json(DataResponse {
        data: state.service.list_movies(),
    })
}

// ============ POST /api/guess ============

/// Guess body; web clients send either spelling of the id
#[derive(Debug, Default, Deserialize)]
struct GuessRequest {
    #[serde(default)]
    movie_id: Option<Value>,
    #[serde(default, rename = "movieId")]
    movie_id_camel: Option<Value>,
}

/// Extract the guessed id, accepting numbers and numeric strings
fn parse_movie_id(request: &GuessRequest) -> Result<MovieId, GameError> {
    let raw = [&request.movie_id, &request.movie_id_camel]
        .into_iter()
        .flatten()
        .find(|v| !v.is_null())
        .ok_or_else(|| GameError::Validation("movie_id is required".to_string()))?;

    let invalid = || GameError::Validation("movie_id must be a valid number".to_string());
    match raw {
        Value::Number(n) => n
            .as_u64()
            .and_then(|id| MovieId::try_from(id).ok())
            .ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<MovieId>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

async fn handle_guess(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DataResponse<Vec<ComparisonResult>>>, AppError> {
    let request: GuessRequest = serde_json::from_slice(&body).map_err(|_| {
        GameError::Validation("request body must be a JSON object".to_string())
    })?;
    let movie_id = parse_movie_id(&request)?;

    let result = state
        .service
        .evaluate_guess(state.clock.today(), movie_id)
        .await?;

    Ok(Json(DataResponse { data: vec![result] }))
}

// ============ GET /api/cron/daily ============

async fn handle_cron_daily(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DataResponse<Vec<DailyTarget>>>, AppError> {
    if let Some(secret) = &state.cron_secret {
        let provided = headers
            .get(CRON_SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if provided != secret.as_ref() {
            warn!("Rejected cron trigger with missing or wrong secret");
            return Err(AppError::unauthorized());
        }
    }

    let target = state
        .service
        .trigger_daily_selection(state.clock.today())
        .await?;

    Ok(Json(DataResponse { data: vec![target] }))
}
