//! Per-collection totals for the admin dashboard.

use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use db::models::{
    client_logo::ClientLogo, collection_item::CollectionItem, media_asset::MediaAsset,
    project::Project, service::Service, testimonial::Testimonial,
};
use serde::Serialize;
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, auth::EditorUser, error::ApiError};

#[derive(Debug, Clone, Serialize, TS)]
pub struct DashboardCounts {
    pub projects: i64,
    pub services: i64,
    pub collection_items: i64,
    pub testimonials: i64,
    pub client_logos: i64,
    pub media_assets: i64,
}

pub async fn get_counts(
    State(state): State<AppState>,
    _user: EditorUser,
) -> Result<ResponseJson<ApiResponse<DashboardCounts>>, ApiError> {
    let pool = &state.db.pool;
    let counts = DashboardCounts {
        projects: Project::count(pool).await?,
        services: Service::count(pool).await?,
        collection_items: CollectionItem::count(pool).await?,
        testimonials: Testimonial::count(pool).await?,
        client_logos: ClientLogo::count(pool).await?,
        media_assets: MediaAsset::count(pool).await?,
    };
    Ok(ResponseJson(ApiResponse::success(counts)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_counts))
}
