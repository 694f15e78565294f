use crate::error::Result;
use crate::state::session::CurrentUser;
use crate::templates::{render, HomePage, PageContext};
use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

pub(super) async fn get(
    user: Option<CurrentUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>)> {
    let (jar, flash) = crate::flash::take(jar);
    let page = PageContext::new("Home", "home")
        .with_flash(flash)
        .signed_in(user.is_some());

    Ok((jar, render(&HomePage { page })?))
}
