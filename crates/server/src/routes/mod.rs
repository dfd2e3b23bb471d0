pub mod auth;
pub mod clients;
pub mod collection;
pub mod dashboard;
pub mod media;
pub mod projects;
pub mod public;
pub mod sections;
pub mod services;
pub mod stats;
pub mod testimonials;
pub mod users;

use axum::Router;

use crate::AppState;

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(projects::router())
        .merge(services::router())
        .merge(collection::router())
        .merge(testimonials::router())
        .merge(clients::router())
        .merge(stats::router())
        .merge(media::router())
        .merge(sections::router())
        .merge(users::router())
}
