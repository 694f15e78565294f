use crate::error::Result;
use crate::state::session::CurrentUser;
use crate::state::SharedState;
use crate::templates::{render, CreatePostPage, PageContext};
use axum::extract::{Multipart, State};
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::CookieJar;

pub(super) async fn get(_: CurrentUser, jar: CookieJar) -> Result<(CookieJar, Html<String>)> {
    let (jar, flash) = crate::flash::take(jar);
    let page = PageContext::new("Create post", "create_post")
        .with_flash(flash)
        .signed_in(true);

    Ok((jar, render(&CreatePostPage { page })?))
}

/// The upload is stored before the workflow runs; a failure to store it is not
/// turned into a flash.
pub(super) async fn post(
    State(state): SharedState,
    CurrentUser(user_id): CurrentUser,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<(CookieJar, Redirect)> {
    let form = crate::upload::receive(multipart, &state.config.uploads_path).await?;

    Ok(crate::posts::create_post(state.store.as_ref(), &user_id, form)
        .await
        .respond(jar))
}
