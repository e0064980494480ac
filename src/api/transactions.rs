//! # Transaction Handlers
//!
//! Writes run the full chain, fold the counterparty, and recompute the
//! total; listings go through the report-query rules for the date window
//! and page bounds.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::Value;

use crate::model::{Transaction, TransactionDraft, TransactionStatus};
use crate::observability::Logger;
use crate::store::TransactionQuery;
use crate::validation::{validate_id_param, validate_report_query, validate_transaction, BodyChain};

use super::errors::{ApiError, ApiResult};
use super::response::{ListResponse, SingleResponse};
use super::server::{business_id, AppState};
use super::views::TransactionView;

pub(super) async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<SingleResponse<TransactionView>>)> {
    let business = business_id(&headers)?;
    validate_transaction(&body)?;
    let draft: TransactionDraft =
        serde_json::from_value(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let tx = Transaction::create(draft, business)?;
    state.transactions.insert(tx.clone())?;

    let tx_id = tx.id.to_string();
    let total = tx.total_amount.to_string();
    Logger::info(
        "transaction_recorded",
        &[
            ("total_amount", total.as_str()),
            ("transaction_id", tx_id.as_str()),
            ("type", tx.kind().as_str()),
        ],
    );

    Ok((
        StatusCode::CREATED,
        Json(SingleResponse::new(TransactionView::from(&tx))),
    ))
}

pub(super) async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<TransactionView>>> {
    let business = business_id(&headers)?;
    let report = validate_report_query(&params)?;

    let limit = report.limit().min(state.max_limit);
    // Page numbers are only bounded below, so the window math must saturate.
    let offset = report.page().saturating_sub(1).saturating_mul(limit);
    let query = TransactionQuery {
        from: report.start_date,
        to: report.end_date,
        kind: report.kind,
        offset: usize::try_from(offset).unwrap_or(usize::MAX),
        limit: limit as usize,
    };

    let txs = state.transactions.list(business, &query)?;
    let views: Vec<TransactionView> = txs.iter().map(TransactionView::from).collect();
    Ok(Json(ListResponse::new(views, report.page(), limit)))
}

pub(super) async fn fetch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<SingleResponse<TransactionView>>> {
    let business = business_id(&headers)?;
    let id = validate_id_param("id", &id)?;

    let tx = state
        .transactions
        .find(business, id)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(SingleResponse::new(TransactionView::from(&tx))))
}

/// Transactions are never deleted; the status transition is the only
/// lifecycle write.
pub(super) async fn set_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<SingleResponse<TransactionView>>> {
    let business = business_id(&headers)?;
    let id = validate_id_param("id", &id)?;

    let mut chain = BodyChain::new(&body);
    chain.require_one_of(
        "status",
        &["pending", "completed", "cancelled"],
        "Status must be pending, completed or cancelled",
    );
    chain.finish()?;

    let status: TransactionStatus = serde_json::from_value(body["status"].clone())
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let mut tx = state
        .transactions
        .find(business, id)?
        .ok_or(ApiError::NotFound)?;
    tx.set_status(status);
    state.transactions.update(tx.clone())?;

    Ok(Json(SingleResponse::new(TransactionView::from(&tx))))
}
