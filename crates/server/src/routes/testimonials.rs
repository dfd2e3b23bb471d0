//! Admin CRUD for client testimonials.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post, put},
};
use db::models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, auth::EditorUser, error::ApiError};

pub async fn list_testimonials(
    State(state): State<AppState>,
    _user: EditorUser,
) -> Result<ResponseJson<ApiResponse<Vec<Testimonial>>>, ApiError> {
    let testimonials = Testimonial::find_all(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(testimonials)))
}

pub async fn create_testimonial(
    State(state): State<AppState>,
    _user: EditorUser,
    axum::Json(payload): axum::Json<CreateTestimonial>,
) -> Result<ResponseJson<ApiResponse<Testimonial>>, ApiError> {
    if payload.client_name.trim().is_empty() || payload.quote.trim().is_empty() {
        return Err(ApiError::Validation("client name and quote are required".to_string()));
    }
    let testimonial = Testimonial::create(&state.db.pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(testimonial)))
}

pub async fn update_testimonial(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateTestimonial>,
) -> Result<ResponseJson<ApiResponse<Testimonial>>, ApiError> {
    if payload.client_name.trim().is_empty() || payload.quote.trim().is_empty() {
        return Err(ApiError::Validation("client name and quote are required".to_string()));
    }
    let testimonial = Testimonial::update(&state.db.pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(testimonial)))
}

pub async fn toggle_publish(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Testimonial>>, ApiError> {
    let testimonial = Testimonial::toggle_published(&state.db.pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(testimonial)))
}

pub async fn delete_testimonial(
    State(state): State<AppState>,
    _user: EditorUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let testimonial = Testimonial::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(ApiError::NotFound("testimonial"))?;

    if let Some(url) = &testimonial.client_logo {
        state.media.remove_by_url(url).await;
    }

    Testimonial::delete(&state.db.pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/testimonials",
        Router::new()
            .route("/", get(list_testimonials).post(create_testimonial))
            .route("/{id}", put(update_testimonial).delete(delete_testimonial))
            .route("/{id}/publish", post(toggle_publish)),
    )
}
