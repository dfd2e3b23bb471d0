//! User management (admin only).

use std::collections::HashMap;

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::user::{AppRole, Profile, UserRole};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, auth::AdminUser, error::ApiError};

#[derive(Debug, Clone, Serialize, TS)]
pub struct UserWithRole {
    #[serde(flatten)]
    #[ts(flatten)]
    pub profile: Profile,
    pub role: Option<AppRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct SetRole {
    /// `None` revokes admin-panel access entirely.
    pub role: Option<AppRole>,
}

pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<ResponseJson<ApiResponse<Vec<UserWithRole>>>, ApiError> {
    let profiles = Profile::find_all(&state.db.pool).await?;
    let roles: HashMap<Uuid, AppRole> = UserRole::find_all(&state.db.pool)
        .await?
        .into_iter()
        .map(|r| (r.user_id, r.role))
        .collect();

    let users = profiles
        .into_iter()
        .map(|profile| {
            let role = roles.get(&profile.user_id).copied();
            UserWithRole { profile, role }
        })
        .collect();
    Ok(ResponseJson(ApiResponse::success(users)))
}

pub async fn set_role(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
    axum::Json(payload): axum::Json<SetRole>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    if admin.user_id == user_id {
        return Err(ApiError::Forbidden("cannot modify your own role"));
    }
    Profile::find_by_user_id(&state.db.pool, user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    UserRole::replace_for_user(&state.db.pool, user_id, payload.role).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/users",
        Router::new()
            .route("/", get(list_users))
            .route("/{user_id}/role", put(set_role)),
    )
}
