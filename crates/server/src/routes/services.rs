//! Admin CRUD for service offerings.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post, put},
};
use db::models::service::{CreateService, Service, UpdateService};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, auth::EditorUser, error::ApiError};

pub async fn list_services(
    State(state): State<AppState>,
    _user: EditorUser,
) -> Result<ResponseJson<ApiResponse<Vec<Service>>>, ApiError> {
    let services = Service::find_all(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(services)))
}

pub async fn create_service(
    State(state): State<AppState>,
    _user: EditorUser,
    axum::Json(payload): axum::Json<CreateService>,
) -> Result<ResponseJson<ApiResponse<Service>>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }
    let service = Service::create(&state.db.pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(service)))
}

pub async fn update_service(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateService>,
) -> Result<ResponseJson<ApiResponse<Service>>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }
    let service = Service::update(&state.db.pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(service)))
}

pub async fn toggle_publish(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Service>>, ApiError> {
    let service = Service::toggle_published(&state.db.pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(service)))
}

pub async fn delete_service(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let service = Service::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(ApiError::NotFound("service"))?;

    if let Some(url) = &service.hero_image {
        state.media.remove_by_url(url).await;
    }

    Service::delete(&state.db.pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/services",
        Router::new()
            .route("/", get(list_services).post(create_service))
            .route("/{id}", put(update_service).delete(delete_service))
            .route("/{id}/publish", post(toggle_publish)),
    )
}
