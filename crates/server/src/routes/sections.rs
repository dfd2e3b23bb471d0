//! Admin editing of free-form page sections.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::section_content::{
    CreateSectionContent, Page, SectionBody, SectionContent,
};
use serde::Serialize;
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, auth::EditorUser, error::ApiError};

/// A section record with its content parsed for the editor.
#[derive(Debug, Clone, Serialize, TS)]
pub struct SectionView {
    pub id: Uuid,
    pub section_key: String,
    pub section_name: String,
    pub page: Page,
    pub content: SectionBody,
    pub is_published: bool,
}

impl From<SectionContent> for SectionView {
    fn from(section: SectionContent) -> Self {
        let content = section.body();
        Self {
            id: section.id,
            section_key: section.section_key,
            section_name: section.section_name,
            page: section.page,
            content,
            is_published: section.is_published,
        }
    }
}

pub async fn list_sections(
    State(state): State<AppState>,
    _user: EditorUser,
) -> Result<ResponseJson<ApiResponse<Vec<SectionView>>>, ApiError> {
    let sections = SectionContent::find_all(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(
        sections.into_iter().map(SectionView::from).collect(),
    )))
}

pub async fn create_section(
    State(state): State<AppState>,
    _user: EditorUser,
    axum::Json(payload): axum::Json<CreateSectionContent>,
) -> Result<ResponseJson<ApiResponse<SectionView>>, ApiError> {
    if payload.section_key.trim().is_empty() || payload.section_name.trim().is_empty() {
        return Err(ApiError::Validation("section key and name are required".to_string()));
    }
    let section = SectionContent::create(&state.db.pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(section.into())))
}

/// Save the whole edited body, as the section editor always does.
pub async fn update_section(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<SectionBody>,
) -> Result<ResponseJson<ApiResponse<SectionView>>, ApiError> {
    let section = SectionContent::update_content(&state.db.pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(section.into())))
}

pub async fn delete_section(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = SectionContent::delete(&state.db.pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("section"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/sections",
        Router::new()
            .route("/", get(list_sections).post(create_section))
            .route("/{id}", put(update_section).delete(delete_section)),
    )
}
