mod config;
mod db;
mod errors;
mod export;
mod models;
mod render;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::export::pdf::pdf_converter;
use crate::render::labels::labels_for;
use crate::render::photo::{photo_embedder, PhotoEmbedder};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting résumé export API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL-backed résumé store
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgResumeStore::new(db));

    let converter = pdf_converter(config.pdf_converter, &config.pdf_converter_bin);
    info!("PDF converter: {}", converter.name());

    let preview_photo: Arc<dyn PhotoEmbedder> = Arc::from(photo_embedder(
        config.photo_strategy,
        &config.media_root,
        &config.media_url,
    ));
    info!(
        "Media root {} served at {} (preview photos: {:?})",
        config.media_root.display(),
        config.media_url,
        config.photo_strategy
    );

    let state = AppState {
        store,
        converter,
        preview_photo,
        labels: labels_for(config.locale),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
