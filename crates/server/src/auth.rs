//! Role-gating extractors for admin routes.
//!
//! Every admin handler takes [`EditorUser`] (any assigned role) or
//! [`AdminUser`] (admin only). Requests without a valid session are 401;
//! sessions without the required role are 403. Roles are read from the
//! database per request so revocations apply immediately.

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use db::models::user::{AppRole, UserRole};

use crate::{AppState, error::ApiError};

/// Identity attached to an authenticated request.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub user_id: uuid::Uuid,
    pub email: String,
    pub role: AppRole,
}

/// Any signed-in user with an assigned role.
pub struct EditorUser(pub AuthedUser);

/// A signed-in user with the admin role.
pub struct AdminUser(pub AuthedUser);

impl FromRequestParts<AppState> for EditorUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).await.map(Self)
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, state).await?;
        if user.role != AppRole::Admin {
            return Err(ApiError::Forbidden("user management requires the admin role"));
        }
        Ok(Self(user))
    }
}

async fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthedUser, ApiError> {
    let token = bearer_token(parts).ok_or(ApiError::Unauthorized)?;
    let session = state.sessions.resolve(token).ok_or(ApiError::Unauthorized)?;
    let role = UserRole::find_by_user_id(&state.db.pool, session.user_id)
        .await?
        .map(|r| r.role)
        .ok_or(ApiError::Forbidden("admin access requires an editor or admin role"))?;
    Ok(AuthedUser {
        user_id: session.user_id,
        email: session.email,
        role,
    })
}

pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
