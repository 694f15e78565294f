use axum::ServiceExt;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing_subscriber::EnvFilter;

mod auth;
mod blog;
mod config;
mod error;
mod flash;
mod posts;
mod routes;
mod state;
mod store;
mod templates;
mod upload;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blog_posts=info,tower_http=info")),
        )
        .init();

    let config = config::Config::load().expect("configuration should load");

    tokio::fs::create_dir_all(&config.uploads_path)
        .await
        .expect("uploads directory should be creatable");
    let store = store::file::FileStore::open(&config)
        .await
        .expect("store directories should be creatable");

    let bind_address = config.bind_address;
    let state = Arc::new(state::State::new(config, Arc::new(store)));

    let app = NormalizePathLayer::trim_trailing_slash().layer(routes::app(state));

    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .expect("listen address should be bindable");
    tracing::info!(address = %bind_address, "serving blog");

    axum::serve(
        listener,
        ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .await
    .expect("Error serving app")
}
