//! # Contact Handlers
//!
//! Create, list, read, update, and soft-delete contacts, all scoped to the
//! requesting business.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::Value;

use crate::model::{Contact, ContactDraft, ContactKind};
use crate::observability::Logger;
use crate::store::ContactFilter;
use crate::validation::{validate_contact, validate_id_param};

use super::errors::{ApiError, ApiResult};
use super::response::{DeletedResponse, ListResponse, SingleResponse};
use super::server::{business_id, AppState};
use super::views::ContactView;

pub(super) async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<SingleResponse<ContactView>>)> {
    let business = business_id(&headers)?;
    validate_contact(&body)?;
    let draft: ContactDraft =
        serde_json::from_value(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let contact = Contact::create(draft, business)?;
    state.contacts.insert(contact.clone())?;

    let contact_id = contact.id.to_string();
    let business_str = business.to_string();
    Logger::info(
        "contact_created",
        &[
            ("business_id", business_str.as_str()),
            ("contact_id", contact_id.as_str()),
        ],
    );

    Ok((
        StatusCode::CREATED,
        Json(SingleResponse::new(ContactView::from(&contact))),
    ))
}

pub(super) async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<ContactView>>> {
    let business = business_id(&headers)?;

    let filter = ContactFilter {
        kind: match params.get("type").map(String::as_str) {
            Some("customer") => Some(ContactKind::Customer),
            Some("vendor") => Some(ContactKind::Vendor),
            _ => None,
        },
        // Soft-deleted contacts stay hidden unless asked for.
        active_only: params.get("includeInactive").map(String::as_str) != Some("true"),
        search: params.get("search").cloned(),
    };

    let contacts = state.contacts.list(business, &filter)?;
    let views: Vec<ContactView> = contacts.iter().map(ContactView::from).collect();
    let count = views.len();
    Ok(Json(ListResponse::new(views, 1, count as i64)))
}

pub(super) async fn fetch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<SingleResponse<ContactView>>> {
    let business = business_id(&headers)?;
    let id = validate_id_param("id", &id)?;

    let contact = state
        .contacts
        .find(business, id)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(SingleResponse::new(ContactView::from(&contact))))
}

pub(super) async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<SingleResponse<ContactView>>> {
    let business = business_id(&headers)?;
    let id = validate_id_param("id", &id)?;
    validate_contact(&body)?;
    let draft: ContactDraft =
        serde_json::from_value(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let mut contact = state
        .contacts
        .find(business, id)?
        .ok_or(ApiError::NotFound)?;
    contact.apply(draft)?;
    state.contacts.update(contact.clone())?;

    Ok(Json(SingleResponse::new(ContactView::from(&contact))))
}

pub(super) async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    let business = business_id(&headers)?;
    let id = validate_id_param("id", &id)?;

    let mut contact = state
        .contacts
        .find(business, id)?
        .ok_or(ApiError::NotFound)?;
    contact.deactivate();
    state.contacts.update(contact)?;

    Ok(Json(DeletedResponse::new()))
}
