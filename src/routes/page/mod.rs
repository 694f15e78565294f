use crate::state::NestedRouter;
use axum::routing::get;

mod create;
mod edit;
mod home;
mod posts;
mod view;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/", get(home::get))
        .route("/posts", get(posts::get))
        .route("/create-post", get(create::get).post(create::post))
        .route("/edit-post/:id", get(edit::get))
        .route("/post/:id", get(view::get))
}
