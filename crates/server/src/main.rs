use anyhow::Result;
use db::DBService;
use server::AppState;
use services::services::{
    auth::{self, SessionService},
    config::Config,
    media::MediaService,
    storage::StorageService,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = DBService::new(&config.database_url).await?;
    info!(database_url = %config.database_url, "database ready");

    if let Some(admin) = &config.bootstrap_admin {
        auth::bootstrap_admin(&db.pool, &admin.email, &admin.password).await?;
    }

    let storage = StorageService::new(&config.storage_root, &config.public_base_url);
    let state = AppState {
        db,
        media: MediaService::new(storage.clone()),
        storage,
        sessions: SessionService::new(),
    };

    let app = server::app(state, &config.storage_root, config.frontend_dist.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
