//! Admin CRUD for client logos.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post, put},
};
use db::models::client_logo::{ClientLogo, CreateClientLogo, UpdateClientLogo};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, auth::EditorUser, error::ApiError};

pub async fn list_logos(
    State(state): State<AppState>,
    _user: EditorUser,
) -> Result<ResponseJson<ApiResponse<Vec<ClientLogo>>>, ApiError> {
    let logos = ClientLogo::find_all(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(logos)))
}

pub async fn create_logo(
    State(state): State<AppState>,
    _user: EditorUser,
    axum::Json(payload): axum::Json<CreateClientLogo>,
) -> Result<ResponseJson<ApiResponse<ClientLogo>>, ApiError> {
    if payload.client_name.trim().is_empty() || payload.logo_url.trim().is_empty() {
        return Err(ApiError::Validation("client name and logo are required".to_string()));
    }
    let logo = ClientLogo::create(&state.db.pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(logo)))
}

pub async fn update_logo(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateClientLogo>,
) -> Result<ResponseJson<ApiResponse<ClientLogo>>, ApiError> {
    if payload.client_name.trim().is_empty() || payload.logo_url.trim().is_empty() {
        return Err(ApiError::Validation("client name and logo are required".to_string()));
    }
    let logo = ClientLogo::update(&state.db.pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(logo)))
}

pub async fn toggle_publish(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<ClientLogo>>, ApiError> {
    let logo = ClientLogo::toggle_published(&state.db.pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(logo)))
}

pub async fn delete_logo(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let logo = ClientLogo::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(ApiError::NotFound("client logo"))?;

    state.media.remove_by_url(&logo.logo_url).await;

    ClientLogo::delete(&state.db.pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/clients",
        Router::new()
            .route("/", get(list_logos).post(create_logo))
            .route("/{id}", put(update_logo).delete(delete_logo))
            .route("/{id}/publish", post(toggle_publish)),
    )
}
