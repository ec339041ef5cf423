//! Service-level endpoints outside `/api`: health, index and the 404 fallback.

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use time::OffsetDateTime;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub environment: String,
}

pub fn meta_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Server is running",
        timestamp: OffsetDateTime::now_utc(),
        environment: state.config.environment.clone(),
    })
}

pub async fn index() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Product catalog API server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "products": {
                "GET /api/products": "List products with pagination and filtering",
                "GET /api/products/:id": "Get product by ID",
                "POST /api/products": "Create new product",
                "PUT /api/products/:id": "Update product by ID",
                "DELETE /api/products/:id": "Delete product by ID"
            },
            "categories": {
                "GET /api/categories": "List product categories"
            },
            "health": {
                "GET /health": "Health check"
            }
        }
    }))
}

pub async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Endpoint not found",
            "path": uri.to_string(),
        })),
    )
}
