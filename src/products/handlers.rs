use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{ListParams, ProductPayload};
use super::model::{Product, ProductInput};
use crate::{
    envelope::Envelope,
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/categories", get(list_categories))
}

#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Envelope<Vec<Product>>>> {
    let filter = params.into_filter(state.config.page_limit_max);
    let page = state
        .repo
        .find_all(&filter)
        .await
        .map_err(ApiError::query("Error fetching products"))?;

    Ok(Json(Envelope::paged(
        "Products retrieved successfully",
        page.products,
        page.pagination,
    )))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Product>>> {
    let id = parse_id(&id)?;
    let product = state
        .repo
        .find_by_id(id)
        .await
        .map_err(ApiError::query("Error fetching product"))?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(Envelope::ok("Product retrieved successfully", product)))
}

#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Product>>)> {
    let input = validated(payload)?;
    let product = state
        .repo
        .create(&input)
        .await
        .map_err(ApiError::query("Error creating product"))?;

    info!(product_id = product.id, name = %product.name, "product created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("Product created successfully", product)),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> ApiResult<Json<Envelope<Product>>> {
    let input = validated(payload)?;
    let id = parse_id(&id)?;
    let product = state
        .repo
        .update(id, &input)
        .await
        .map_err(ApiError::query("Error updating product"))?
        .ok_or(ApiError::NotFound)?;

    info!(product_id = product.id, "product updated");
    Ok(Json(Envelope::ok("Product updated successfully", product)))
}

#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    let id = parse_id(&id)?;
    let deleted = state
        .repo
        .delete(id)
        .await
        .map_err(ApiError::query("Error deleting product"))?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    info!(product_id = id, "product deleted");
    Ok(Json(Envelope::empty("Product deleted successfully")))
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<Vec<String>>>> {
    let categories = state
        .repo
        .categories()
        .await
        .map_err(ApiError::query("Error fetching categories"))?;

    Ok(Json(Envelope::ok(
        "Categories retrieved successfully",
        categories,
    )))
}

/// Ids that are not unsigned integers cannot name a row.
fn parse_id(raw: &str) -> ApiResult<u64> {
    raw.trim().parse::<u64>().map_err(|_| ApiError::NotFound)
}

fn validated(payload: Result<Json<ProductPayload>, JsonRejection>) -> ApiResult<ProductInput> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "malformed product body");
        ApiError::validation(rejection.body_text())
    })?;
    payload.validate().map_err(|e| {
        warn!(error = %e, "product validation failed");
        e
    })
}
