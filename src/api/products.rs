//! # Product Handlers

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::Value;

use crate::model::{Product, ProductDraft};
use crate::observability::Logger;
use crate::validation::{validate_id_param, validate_product};

use super::errors::{ApiError, ApiResult};
use super::response::{DeletedResponse, ListResponse, SingleResponse};
use super::server::{business_id, AppState};
use super::views::ProductView;

pub(super) async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<SingleResponse<ProductView>>)> {
    let business = business_id(&headers)?;
    validate_product(&body)?;
    let draft: ProductDraft =
        serde_json::from_value(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let product = Product::create(draft, business)?;
    state.products.insert(product.clone())?;

    let product_id = product.id.to_string();
    Logger::info("product_created", &[("product_id", product_id.as_str())]);

    Ok((
        StatusCode::CREATED,
        Json(SingleResponse::new(ProductView::from(&product))),
    ))
}

pub(super) async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<ProductView>>> {
    let business = business_id(&headers)?;
    let active_only = params.get("includeInactive").map(String::as_str) != Some("true");

    let products = state.products.list(business, active_only)?;
    let views: Vec<ProductView> = products.iter().map(ProductView::from).collect();
    let count = views.len();
    Ok(Json(ListResponse::new(views, 1, count as i64)))
}

pub(super) async fn fetch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<SingleResponse<ProductView>>> {
    let business = business_id(&headers)?;
    let id = validate_id_param("id", &id)?;

    let product = state
        .products
        .find(business, id)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(SingleResponse::new(ProductView::from(&product))))
}

pub(super) async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<SingleResponse<ProductView>>> {
    let business = business_id(&headers)?;
    let id = validate_id_param("id", &id)?;
    validate_product(&body)?;
    let draft: ProductDraft =
        serde_json::from_value(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let mut product = state
        .products
        .find(business, id)?
        .ok_or(ApiError::NotFound)?;
    product.apply(draft)?;
    state.products.update(product.clone())?;

    Ok(Json(SingleResponse::new(ProductView::from(&product))))
}

pub(super) async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    let business = business_id(&headers)?;
    let id = validate_id_param("id", &id)?;

    let mut product = state
        .products
        .find(business, id)?
        .ok_or(ApiError::NotFound)?;
    product.deactivate();
    state.products.update(product)?;

    Ok(Json(DeletedResponse::new()))
}
