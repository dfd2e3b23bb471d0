//! Admin-panel sign-in and session endpoints.

use axum::{
    Router,
    extract::{Request, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::user::AppRole;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{
    AppState,
    auth::{self, EditorUser},
    error::ApiError,
};

#[derive(Debug, Clone, Deserialize, TS)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, TS)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
    pub role: Option<AppRole>,
}

#[derive(Debug, Clone, Serialize, TS)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: AppRole,
}

pub async fn login(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<LoginRequest>,
) -> Result<ResponseJson<ApiResponse<LoginResponse>>, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("email and password are required".to_string()));
    }
    let (session, role) = state
        .sessions
        .sign_in(&state.db.pool, payload.email.trim(), &payload.password)
        .await?;
    Ok(ResponseJson(ApiResponse::success(LoginResponse {
        token: session.token,
        user_id: session.user_id,
        email: session.email,
        role,
    })))
}

/// Drop the caller's session. Succeeds for any bearer token, valid or not.
pub async fn logout(
    State(state): State<AppState>,
    request: Request,
) -> ResponseJson<ApiResponse<()>> {
    let (parts, _) = request.into_parts();
    if let Some(token) = auth::bearer_token(&parts) {
        state.sessions.sign_out(token);
    }
    ResponseJson(ApiResponse::success(()))
}

pub async fn me(
    EditorUser(user): EditorUser,
) -> Result<ResponseJson<ApiResponse<CurrentUser>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(CurrentUser {
        user_id: user.user_id,
        email: user.email,
        role: user.role,
    })))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/auth",
        Router::new()
            .route("/login", post(login))
            .route("/logout", post(logout))
            .route("/me", get(me)),
    )
}
