use crate::blog::User;
use crate::error::Result;
use crate::flash::Notice;
use crate::state::session::{session_cookie, CurrentUser};
use crate::state::SharedState;
use crate::templates::{render, PageContext, SignupPage};
use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

pub const INVALID_SIGNUP: &str =
    "Usernames may only contain letters, digits, - and _, and every field is required.";
pub const USERNAME_TAKEN: &str = "That username is taken, try another one!";

#[derive(Debug, Deserialize)]
pub struct SignupOptions {
    username: String,
    name: String,
    password: String,
}

pub(super) async fn get(
    user: Option<CurrentUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>)> {
    let (jar, flash) = crate::flash::take(jar);
    let page = PageContext::new("Sign up", "signup")
        .with_flash(flash)
        .signed_in(user.is_some());

    Ok((jar, render(&SignupPage { page })?))
}

pub(super) async fn post(
    State(state): SharedState,
    jar: CookieJar,
    Form(request): Form<SignupOptions>,
) -> Result<(CookieJar, Redirect)> {
    if !request.is_valid() {
        return Ok(Notice::error(INVALID_SIGNUP, "/signup").respond(jar));
    }

    let auth = match state
        .register_login(&request.username, request.password)
        .await?
    {
        Some(auth) => auth,
        None => return Ok(Notice::error(USERNAME_TAKEN, "/signup").respond(jar)),
    };

    let new_user = User::new(request.username.clone(), request.name);
    if !state.store.insert_user(&new_user).await? {
        tracing::warn!(user = %new_user.id, "login created for an already stored user");
    }

    let session_id = state.create_session(request.username, auth).await;
    tracing::info!(user = %new_user.id, "signed up");

    Ok(Notice::success("Welcome!", "/posts").respond(jar.add(session_cookie(session_id))))
}

impl SignupOptions {
    fn is_valid(&self) -> bool {
        static USERNAME_PATTERN: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();

        let username_pattern = USERNAME_PATTERN.get_or_init(|| {
            regex::Regex::new(r"^[a-zA-Z0-9-_]+$").expect("constant pattern should parse")
        });

        if !username_pattern.is_match(&self.username) {
            return false;
        }

        !self.name.trim().is_empty() && !self.password.is_empty()
    }
}
