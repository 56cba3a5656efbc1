//! JSON HTTP server for the catalog API.
//!
//! Serves assembled catalog views over a small REST surface. Every request
//! loads its own snapshot of the relation tables before assembly, so
//! concurrent requests are independent and a concurrent `import` is never
//! observed mid-rewrite.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/merchants/search` | Filter merchants by name substring |
//! | `GET`  | `/merchants/{id}` | Fetch one merchant |
//! | `GET`  | `/merchants/{id}/menus` | Full assembled menu for a merchant |
//! | `POST` | `/menu/search` | Filter the assembled menu by item name |
//! | `GET`  | `/menu/items` | Full assembled category list |
//! | `GET`  | `/menu/items/{id}` | Fetch one assembled item view |
//! | `GET`  | `/menu/items/{id}/modifier-groups` | Modifier groups of one item |
//! | `GET`  | `/menu/modifiers/{id}` | Fetch one modifier item |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "merchant not found: m9" } }
//! ```
//!
//! Error codes: `not_found` (404), `internal` (500). Dangling join rows are
//! never errors — they are silently excluded during assembly.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};

use crate::assemble;
use crate::config::Config;
use crate::db;
use crate::query;
use crate::store;
use crate::views::{MerchantView, ModifierItemView};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    pool: SqlitePool,
}

/// Starts the catalog HTTP server on the configured bind address. Runs
/// until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let pool = db::connect(config).await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/merchants/search", post(handle_search_merchants))
        .route("/merchants/{id}", get(handle_get_merchant))
        .route("/merchants/{id}/menus", get(handle_get_merchant_menus))
        .route("/menu/search", post(handle_search_menu))
        .route("/menu/items", get(handle_list_menu_items))
        .route("/menu/items/{id}", get(handle_get_menu_item))
        .route(
            "/menu/items/{id}/modifier-groups",
            get(handle_get_item_modifier_groups),
        )
        .route("/menu/modifiers/{id}", get(handle_get_modifier_item))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(AppState { pool });

    println!("catalog server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
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

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

/// Storage failures are fatal for the request; the message passes through
/// unchanged.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal".to_string(),
            message: err.to_string(),
        }
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

// ============ Search request body ============

/// Body for `POST /merchants/search` and `POST /menu/search`. An empty
/// query matches everything.
#[derive(Deserialize)]
struct SearchRequest {
    #[serde(default)]
    query: String,
}

// ============ Merchant routes ============

async fn handle_search_merchants(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let snapshot = store::load_snapshot(&state.pool).await?;
    let merchants = query::search_merchants(&snapshot.merchants, &req.query);
    Ok(Json(json!({ "merchants": merchants })))
}

async fn handle_get_merchant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let merchant = store::get_merchant(&state.pool, &id)
        .await?
        .ok_or_else(|| not_found(format!("merchant not found: {}", id)))?;
    Ok(Json(json!({ "merchant": MerchantView::from(&merchant) })))
}

async fn handle_get_merchant_menus(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    store::get_merchant(&state.pool, &id)
        .await?
        .ok_or_else(|| not_found(format!("merchant not found: {}", id)))?;

    let snapshot = store::load_snapshot(&state.pool).await?;
    let categories = assemble::assemble_categories(&snapshot);
    Ok(Json(json!({ "categories": categories })))
}

// ============ Menu routes ============

async fn handle_search_menu(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let snapshot = store::load_snapshot(&state.pool).await?;
    let categories = query::search_menu(assemble::assemble_categories(&snapshot), &req.query);
    Ok(Json(json!({ "categories": categories })))
}

async fn handle_list_menu_items(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let snapshot = store::load_snapshot(&state.pool).await?;
    let categories = assemble::assemble_categories(&snapshot);
    Ok(Json(json!({ "categories": categories })))
}

async fn handle_get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    store::get_menu_item(&state.pool, &id)
        .await?
        .ok_or_else(|| not_found(format!("menu item not found: {}", id)))?;

    let snapshot = store::load_snapshot(&state.pool).await?;
    let item = assemble::assemble_item_views(&snapshot)
        .remove(&id)
        .ok_or_else(|| not_found(format!("menu item not found: {}", id)))?;
    Ok(Json(json!({ "item": item })))
}

async fn handle_get_item_modifier_groups(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    store::get_menu_item(&state.pool, &id)
        .await?
        .ok_or_else(|| not_found(format!("menu item not found: {}", id)))?;

    let snapshot = store::load_snapshot(&state.pool).await?;
    let groups = assemble::assemble_item_views(&snapshot)
        .remove(&id)
        .and_then(|item| item.modifier_groups)
        .unwrap_or_default();
    Ok(Json(json!({ "modifier_groups": groups })))
}

async fn handle_get_modifier_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let modifier_item = store::get_modifier_item(&state.pool, &id)
        .await?
        .ok_or_else(|| not_found(format!("modifier item not found: {}", id)))?;
    Ok(Json(
        json!({ "modifier_item": ModifierItemView::from(&modifier_item) }),
    ))
}
