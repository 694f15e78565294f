use crate::blog::PostID;
use crate::error::Result;
use crate::state::session::CurrentUser;
use crate::templates::{render, PageContext, ViewPostPage};
use axum::extract::Path;
use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

pub(super) async fn get(
    user: Option<CurrentUser>,
    Path(_post_id): Path<PostID>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>)> {
    let (jar, flash) = crate::flash::take(jar);
    let page = PageContext::new("View Post", "view_post")
        .with_flash(flash)
        .signed_in(user.is_some());

    Ok((jar, render(&ViewPostPage { page })?))
}
