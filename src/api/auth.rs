//! # Signup and Login Handlers
//!
//! Account creation and credential checks. No sessions or tokens are issued
//! here; that layer is the surrounding framework's concern.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::model::{LoginDraft, SignupDraft, User};
use crate::observability::Logger;
use crate::validation::{validate_login, validate_user};

use super::errors::{ApiError, ApiResult};
use super::response::SingleResponse;
use super::server::AppState;
use super::views::UserView;

pub(super) async fn register(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<SingleResponse<UserView>>)> {
    validate_user(&body)?;
    let draft: SignupDraft =
        serde_json::from_value(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let user = User::create(draft)?;
    state.users.create(user.clone())?;

    let user_id = user.id.to_string();
    Logger::info("user_registered", &[("user_id", user_id.as_str())]);

    Ok((
        StatusCode::CREATED,
        Json(SingleResponse::new(UserView::from(&user))),
    ))
}

pub(super) async fn login(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<SingleResponse<UserView>>> {
    validate_login(&body)?;
    let draft: LoginDraft =
        serde_json::from_value(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let email = draft.email.trim().to_lowercase();
    let user = state
        .users
        .find_by_email(&email)?
        .filter(|u| u.verify_password(&draft.password))
        .ok_or_else(|| {
            Logger::warn("login_rejected", &[("email", email.as_str())]);
            ApiError::InvalidCredentials
        })?;

    Ok(Json(SingleResponse::new(UserView::from(&user))))
}
