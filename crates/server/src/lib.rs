pub mod auth;
pub mod error;
pub mod routes;

use std::path::Path;

use axum::Router;
use db::DBService;
use services::services::{auth::SessionService, media::MediaService, storage::StorageService};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DBService,
    pub storage: StorageService,
    pub media: MediaService,
    pub sessions: SessionService,
}

/// Assemble the full application: admin and public APIs, the uploaded-file
/// space, and (when configured) the SPA bundle with client-route fallback.
pub fn app(state: AppState, storage_root: &Path, frontend_dist: Option<&Path>) -> Router {
    let api = Router::new()
        .nest("/api/admin", routes::admin_router())
        .nest("/api/public", routes::public::router())
        .with_state(state);

    let mut app = api.nest_service("/storage", ServeDir::new(storage_root));

    if let Some(dist) = frontend_dist {
        // Client-side routes (/, /projects, /admin/..., ...) all resolve to
        // the SPA entry point; real files in the bundle win over fallback.
        let spa = ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html")));
        app = app.fallback_service(spa);
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
