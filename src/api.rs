// Cat Catalog - REST API with Axum
//
// Routes:
//   GET  /health             - health check
//   GET  /gato/:id           - one cat with its birth date
//   GET  /gato               - cats without a birth date
//   GET  /gatos-mais-velhos  - oldest cats
//   POST /buscar-gatos       - search by name   {"nome": "..."}
//   POST /buscar-raca        - search by breed  {"raca": "..."}
//
// Handlers return CatalogResult; CatalogError is the single place that turns
// a failure into a status code and body. Panics become a generic 500.

use crate::catalog::CatRepository;
use crate::error::{CatalogError, CatalogResult, ErrorBody};
use crate::models::{BreedQuery, CatDetail, CatSummary, NameQuery, SearchResults};
use crate::queries;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn CatRepository>,
}

impl AppState {
    pub fn new<R: CatRepository + 'static>(repo: R) -> Self {
        AppState { repo: Arc::new(repo) }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check).fallback(method_not_allowed))
        .route("/gato", get(list_without_birth_date).fallback(method_not_allowed))
        .route("/gato/:id", get(get_cat).fallback(method_not_allowed))
        .route("/gatos-mais-velhos", get(list_oldest).fallback(method_not_allowed))
        .route("/buscar-gatos", post(search_by_name).fallback(method_not_allowed))
        .route("/buscar-raca", post(search_by_breed).fallback(method_not_allowed))
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
    })
}

/// GET /gato/:id - Cat by id, merged with its birth date
async fn get_cat(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> CatalogResult<Json<CatDetail>> {
    let Path(id) = id.map_err(|rejection| CatalogError::unprocessable(rejection.body_text()))?;
    tracing::debug!(id, "get cat by id");

    queries::get_cat_by_id(state.repo.as_ref(), id).map(Json)
}

/// GET /gato - Cats with no birth date (id, name, breed only)
async fn list_without_birth_date(State(state): State<AppState>) -> Json<Vec<CatSummary>> {
    let cats = queries::list_cats_without_birth_date(state.repo.as_ref());
    tracing::debug!(count = cats.len(), "listed cats without birth date");

    Json(cats)
}

/// GET /gatos-mais-velhos - Every cat sharing the maximum age
async fn list_oldest(State(state): State<AppState>) -> CatalogResult<Json<Vec<CatDetail>>> {
    queries::list_oldest_cats(state.repo.as_ref()).map(Json)
}

/// POST /buscar-gatos - Search by name, case-insensitive exact match
async fn search_by_name(
    State(state): State<AppState>,
    body: Result<Json<NameQuery>, JsonRejection>,
) -> CatalogResult<Json<SearchResults>> {
    let Json(query) = body.map_err(reject_body)?;
    tracing::debug!(name = %query.name, "search cats by name");

    queries::search_cats_by_name(state.repo.as_ref(), &query.name).map(Json)
}

/// POST /buscar-raca - Search by breed, case-insensitive exact match
async fn search_by_breed(
    State(state): State<AppState>,
    body: Result<Json<BreedQuery>, JsonRejection>,
) -> CatalogResult<Json<SearchResults>> {
    let Json(query) = body.map_err(reject_body)?;
    tracing::debug!(breed = %query.breed, "search cats by breed");

    queries::search_cats_by_breed(state.repo.as_ref(), &query.breed).map(Json)
}

async fn not_found() -> CatalogError {
    CatalogError::not_found("Not Found")
}

/// Known path, wrong method
async fn method_not_allowed() -> (StatusCode, Json<ErrorBody<'static>>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            detail: "Method Not Allowed",
        }),
    )
}

/// Invalid request bodies are unprocessable, like an invalid path id
fn reject_body(rejection: JsonRejection) -> CatalogError {
    CatalogError::unprocessable(rejection.body_text())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    CatalogError::internal(format!("handler panicked: {}", detail)).into_response()
}

// ============================================================================
// TESTS
// ============================================================================
