use crate::error::Result;
use crate::state::session::CurrentUser;
use crate::state::SharedState;
use crate::templates::{render, PageContext, PostsPage};
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

pub(super) async fn get(
    State(state): SharedState,
    CurrentUser(user_id): CurrentUser,
    jar: CookieJar,
) -> Result<Response> {
    let (jar, flash) = crate::flash::take(jar);

    let posts = match crate::posts::list_posts(state.store.as_ref(), &user_id).await {
        Ok(it) => it,
        Err(notice) => return Ok(notice.respond(jar).into_response()),
    };

    let page = PageContext::new("Post Page", "posts")
        .with_flash(flash)
        .signed_in(true);

    Ok((jar, render(&PostsPage { page, posts })?).into_response())
}
