//! Read-only API for the marketing site. Only published records leave this
//! surface, ordered by `display_order`. Testimonials and stats fall back to
//! placeholder content when nothing is published yet, so the site never
//! renders an empty section.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::{
    client_logo::ClientLogo,
    collection_item::{CollectionCategory, CollectionItem},
    project::Project,
    section_content::{Page, SectionContent},
    service::Service,
    stat::Stat,
    testimonial::Testimonial,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, routes::sections::SectionView};

#[derive(Debug, Clone, Serialize, TS)]
pub struct PublicTestimonial {
    pub id: Uuid,
    pub quote: String,
    pub client_name: String,
    pub role: Option<String>,
    pub company: Option<String>,
}

impl From<Testimonial> for PublicTestimonial {
    fn from(t: Testimonial) -> Self {
        Self {
            id: t.id,
            quote: t.quote,
            client_name: t.client_name,
            role: t.role,
            company: t.company,
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
pub struct PublicStat {
    pub label: String,
    pub value: String,
    pub unit: Option<String>,
}

impl From<Stat> for PublicStat {
    fn from(s: Stat) -> Self {
        Self {
            label: s.label,
            value: s.value,
            unit: s.unit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CollectionQuery {
    pub category: Option<CollectionCategory>,
}

fn fallback_testimonials() -> Vec<PublicTestimonial> {
    [
        (
            "District transformed our corporate headquarters into a space that employees \
             genuinely want to come to.",
            "Sarah Al-Rashid",
            "Facilities Director",
            "Aramco",
        ),
        (
            "From the initial consultation to the final installation, the professionalism \
             was outstanding. Our hotel lobby has become a talking point for every guest.",
            "Mohammed Al-Faisal",
            "General Manager",
            "Four Seasons Riyadh",
        ),
        (
            "They didn't just add plants, they created an atmosphere. Our restaurant feels \
             completely transformed.",
            "Layla Hassan",
            "Owner",
            "Naya Restaurant",
        ),
    ]
    .into_iter()
    .map(|(quote, client_name, role, company)| PublicTestimonial {
        id: Uuid::new_v4(),
        quote: quote.to_string(),
        client_name: client_name.to_string(),
        role: Some(role.to_string()),
        company: Some(company.to_string()),
    })
    .collect()
}

fn fallback_stats() -> Vec<PublicStat> {
    [
        ("Projects Completed", "500", Some("+")),
        ("Corporate Clients", "120", Some("+")),
        ("Years of Experience", "15", None),
        ("Cities Served", "8", None),
    ]
    .into_iter()
    .map(|(label, value, unit)| PublicStat {
        label: label.to_string(),
        value: value.to_string(),
        unit: unit.map(str::to_string),
    })
    .collect()
}

pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = Project::find_published(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(projects)))
}

pub async fn list_services(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Service>>>, ApiError> {
    let services = Service::find_published(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(services)))
}

pub async fn list_collection(
    State(state): State<AppState>,
    Query(query): Query<CollectionQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<CollectionItem>>>, ApiError> {
    let items = CollectionItem::find_published(&state.db.pool, query.category).await?;
    Ok(ResponseJson(ApiResponse::success(items)))
}

pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<PublicTestimonial>>>, ApiError> {
    let published = Testimonial::find_published(&state.db.pool).await?;
    let testimonials = if published.is_empty() {
        fallback_testimonials()
    } else {
        published.into_iter().map(PublicTestimonial::from).collect()
    };
    Ok(ResponseJson(ApiResponse::success(testimonials)))
}

pub async fn list_client_logos(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<ClientLogo>>>, ApiError> {
    let logos = ClientLogo::find_published(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(logos)))
}

pub async fn list_stats(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<PublicStat>>>, ApiError> {
    let stats = Stat::find_all(&state.db.pool).await?;
    let stats = if stats.is_empty() {
        fallback_stats()
    } else {
        stats.into_iter().map(PublicStat::from).collect()
    };
    Ok(ResponseJson(ApiResponse::success(stats)))
}

pub async fn page_sections(
    State(state): State<AppState>,
    Path(page): Path<Page>,
) -> Result<ResponseJson<ApiResponse<Vec<SectionView>>>, ApiError> {
    let sections = SectionContent::find_published_by_page(&state.db.pool, page).await?;
    Ok(ResponseJson(ApiResponse::success(
        sections.into_iter().map(SectionView::from).collect(),
    )))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects))
        .route("/services", get(list_services))
        .route("/collection", get(list_collection))
        .route("/testimonials", get(list_testimonials))
        .route("/client-logos", get(list_client_logos))
        .route("/stats", get(list_stats))
        .route("/sections/{page}", get(page_sections))
}
