use crate::state::State;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod page;
mod session;
mod signup;
mod uploads;

pub fn app(state: Arc<State>) -> axum::Router {
    let upload_limit = state.config.upload_limit_bytes;

    axum::Router::new()
        .merge(page::route())
        .route("/login", get(session::get).post(session::post))
        .route("/logout", post(session::logout))
        .route("/signup", get(signup::get).post(signup::post))
        .route("/uploads/:name", get(uploads::get))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
