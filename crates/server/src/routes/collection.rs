//! Admin CRUD for the artificial-greenery collection.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post, put},
};
use db::models::collection_item::{CollectionItem, CreateCollectionItem, UpdateCollectionItem};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, auth::EditorUser, error::ApiError};

pub async fn list_items(
    State(state): State<AppState>,
    _user: EditorUser,
) -> Result<ResponseJson<ApiResponse<Vec<CollectionItem>>>, ApiError> {
    let items = CollectionItem::find_all(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(items)))
}

pub async fn create_item(
    State(state): State<AppState>,
    _user: EditorUser,
    axum::Json(payload): axum::Json<CreateCollectionItem>,
) -> Result<ResponseJson<ApiResponse<CollectionItem>>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required".to_string()));
    }
    let item = CollectionItem::create(&state.db.pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateCollectionItem>,
) -> Result<ResponseJson<ApiResponse<CollectionItem>>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required".to_string()));
    }
    let item = CollectionItem::update(&state.db.pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(item)))
}

pub async fn toggle_publish(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<CollectionItem>>, ApiError> {
    let item = CollectionItem::toggle_published(&state.db.pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(item)))
}

pub async fn delete_item(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = CollectionItem::delete(&state.db.pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("collection item"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/collection",
        Router::new()
            .route("/", get(list_items).post(create_item))
            .route("/{id}", put(update_item).delete(delete_item))
            .route("/{id}/publish", post(toggle_publish)),
    )
}
