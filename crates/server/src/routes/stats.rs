//! Admin CRUD for headline statistics.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::stat::{CreateStat, Stat, UpdateStat};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, auth::EditorUser, error::ApiError};

pub async fn list_stats(
    State(state): State<AppState>,
    _user: EditorUser,
) -> Result<ResponseJson<ApiResponse<Vec<Stat>>>, ApiError> {
    let stats = Stat::find_all(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(stats)))
}

pub async fn create_stat(
    State(state): State<AppState>,
    _user: EditorUser,
    axum::Json(payload): axum::Json<CreateStat>,
) -> Result<ResponseJson<ApiResponse<Stat>>, ApiError> {
    if payload.label.trim().is_empty() || payload.value.trim().is_empty() {
        return Err(ApiError::Validation("label and value are required".to_string()));
    }
    let stat = Stat::create(&state.db.pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(stat)))
}

pub async fn update_stat(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateStat>,
) -> Result<ResponseJson<ApiResponse<Stat>>, ApiError> {
    if payload.label.trim().is_empty() || payload.value.trim().is_empty() {
        return Err(ApiError::Validation("label and value are required".to_string()));
    }
    let stat = Stat::update(&state.db.pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(stat)))
}

pub async fn delete_stat(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Stat::delete(&state.db.pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("stat"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/stats",
        Router::new()
            .route("/", get(list_stats).post(create_stat))
            .route("/{id}", put(update_stat).delete(delete_stat)),
    )
}
