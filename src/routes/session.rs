use crate::auth::Auth;
use crate::error::Result;
use crate::flash::Notice;
use crate::state::session::{clear_session_cookie, session_cookie, CurrentUser, SESSION_COOKIE};
use crate::state::SharedState;
use crate::templates::{render, LoginPage, PageContext};
use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

pub const INVALID_LOGIN: &str = "Wrong username or password, try again!";

#[derive(Debug, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

pub(super) async fn get(
    user: Option<CurrentUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>)> {
    let (jar, flash) = crate::flash::take(jar);
    let page = PageContext::new("Log in", "login")
        .with_flash(flash)
        .signed_in(user.is_some());

    Ok((jar, render(&LoginPage { page })?))
}

pub(super) async fn post(
    State(state): SharedState,
    jar: CookieJar,
    Form(login_credentials): Form<LoginCredentials>,
) -> Result<(CookieJar, Redirect)> {
    let auth = match Auth::validate(
        &state.config.logins_path(),
        &login_credentials.username,
        login_credentials.password,
    )
    .await?
    {
        Some(it) => it,
        None => {
            tracing::info!(user = %login_credentials.username, "rejected login");
            return Ok(Notice::error(INVALID_LOGIN, "/login").respond(jar));
        }
    };

    let session_id = state
        .create_session(login_credentials.username.clone(), auth)
        .await;
    tracing::info!(user = %login_credentials.username, "logged in");

    Ok(Notice::success("Welcome back!", "/posts").respond(jar.add(session_cookie(session_id))))
}

pub(super) async fn logout(State(state): SharedState, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Some(session) = state.remove_session(cookie.value()).await {
            tracing::info!(user = %session.for_user, "logged out");
        }
    }

    Notice::success("You have been logged out.", "/").respond(clear_session_cookie(jar))
}
