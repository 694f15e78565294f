use crate::blog::PostID;
use crate::error::Result;
use crate::state::session::CurrentUser;
use crate::templates::{render, EditPostPage, PageContext};
use axum::extract::Path;
use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

// the id is accepted but nothing is loaded for it yet
pub(super) async fn get(
    _: CurrentUser,
    Path(_post_id): Path<PostID>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>)> {
    let (jar, flash) = crate::flash::take(jar);
    let page = PageContext::new("Edit Post", "edit_post")
        .with_flash(flash)
        .signed_in(true);

    Ok((jar, render(&EditPostPage { page })?))
}
