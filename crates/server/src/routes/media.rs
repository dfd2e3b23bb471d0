//! Media library: multipart uploads, listing, alt text, deletion. Also the
//! upload endpoints that back image/video fields on other entities' forms.

use axum::{
    Router,
    extract::{Multipart, Path, Query, State},
    response::Json as ResponseJson,
    routing::{get, post, put},
};
use db::models::media_asset::MediaAsset;
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, auth::EditorUser, error::ApiError};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UploadedFile {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageUploadQuery {
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "uploads".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateAltText {
    pub alt_text: Option<String>,
}

pub async fn list_assets(
    State(state): State<AppState>,
    _user: EditorUser,
) -> Result<ResponseJson<ApiResponse<Vec<MediaAsset>>>, ApiError> {
    let assets = MediaAsset::find_all(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(assets)))
}

/// Upload one or more files into the library. Each file is validated and
/// stored independently; failures are reported without aborting the batch.
pub async fn upload_assets(
    State(state): State<AppState>,
    _user: EditorUser,
    mut multipart: Multipart,
) -> Result<ResponseJson<ApiResponse<Vec<MediaAsset>>>, ApiError> {
    let mut stored = Vec::new();
    let mut failures = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        match state
            .media
            .store_library_file(&state.db.pool, &file_name, content_type.as_deref(), &bytes)
            .await
        {
            Ok(asset) => stored.push(asset),
            Err(e) => {
                warn!(file_name, error = %e, "library upload rejected");
                failures.push(format!("{file_name}: {e}"));
            }
        }
    }

    if stored.is_empty() && !failures.is_empty() {
        return Err(ApiError::Validation(failures.join("; ")));
    }
    if failures.is_empty() {
        Ok(ResponseJson(ApiResponse::success(stored)))
    } else {
        Ok(ResponseJson(ApiResponse::success_with_message(
            stored,
            failures.join("; "),
        )))
    }
}

/// Single-image upload backing logo/hero-image fields.
pub async fn upload_image(
    State(state): State<AppState>,
    _user: EditorUser,
    Query(query): Query<ImageUploadQuery>,
    mut multipart: Multipart,
) -> Result<ResponseJson<ApiResponse<UploadedFile>>, ApiError> {
    let Some(field) = multipart.next_field().await? else {
        return Err(ApiError::Validation("no file supplied".to_string()));
    };
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await?;

    let url = state
        .media
        .store_image(&query.category, &file_name, content_type.as_deref(), &bytes)
        .await?;
    Ok(ResponseJson(ApiResponse::success(UploadedFile { url })))
}

/// Project-video upload; returns the URL for the `video_url` field.
pub async fn upload_video(
    State(state): State<AppState>,
    _user: EditorUser,
    mut multipart: Multipart,
) -> Result<ResponseJson<ApiResponse<UploadedFile>>, ApiError> {
    let Some(field) = multipart.next_field().await? else {
        return Err(ApiError::Validation("no file supplied".to_string()));
    };
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await?;

    let url = state
        .media
        .store_video(&file_name, content_type.as_deref(), &bytes)
        .await?;
    Ok(ResponseJson(ApiResponse::success(UploadedFile { url })))
}

pub async fn update_asset(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateAltText>,
) -> Result<ResponseJson<ApiResponse<MediaAsset>>, ApiError> {
    let asset =
        MediaAsset::update_alt_text(&state.db.pool, id, payload.alt_text.as_deref()).await?;
    Ok(ResponseJson(ApiResponse::success(asset)))
}

pub async fn delete_asset(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let asset = MediaAsset::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(ApiError::NotFound("media asset"))?;

    state.media.remove_by_url(&asset.file_path).await;

    MediaAsset::delete(&state.db.pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/media",
        Router::new()
            .route("/", get(list_assets).post(upload_assets))
            .route("/images", post(upload_image))
            .route("/videos", post(upload_video))
            .route("/{id}", put(update_asset).delete(delete_asset)),
    )
}
