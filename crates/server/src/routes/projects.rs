//! Admin CRUD for portfolio projects.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post, put},
};
use db::models::project::{CreateProject, Project, UpdateProject};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, auth::EditorUser, error::ApiError};

pub async fn list_projects(
    State(state): State<AppState>,
    _user: EditorUser,
) -> Result<ResponseJson<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = Project::find_all(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(projects)))
}

pub async fn create_project(
    State(state): State<AppState>,
    _user: EditorUser,
    axum::Json(payload): axum::Json<CreateProject>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }
    let project = Project::create(&state.db.pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(project)))
}

pub async fn update_project(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateProject>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }
    let project = Project::update(&state.db.pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(project)))
}

pub async fn toggle_publish(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    let project = Project::toggle_published(&state.db.pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(project)))
}

pub async fn delete_project(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let project = Project::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    // Best-effort cleanup of owned uploads before the row goes away.
    for url in [&project.hero_image, &project.video_url].into_iter().flatten() {
        state.media.remove_by_url(url).await;
    }

    Project::delete(&state.db.pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/projects",
        Router::new()
            .route("/", get(list_projects).post(create_project))
            .route("/{id}", put(update_project).delete(delete_project))
            .route("/{id}/publish", post(toggle_publish)),
    )
}
