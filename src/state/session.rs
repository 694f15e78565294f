use crate::blog::{SessionID, UserID};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

pub const SESSION_COOKIE: &str = "session";
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone)]
pub struct Session {
    pub for_user: UserID,
    pub expires_at: std::time::Instant,
}

impl Session {
    pub fn is_valid(&self) -> bool {
        std::time::Instant::now() < self.expires_at
    }
}

/// The authenticated caller. Requests without a live session are sent to the login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub UserID);

#[axum::async_trait]
impl FromRequestParts<Arc<super::State>> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<super::State>,
    ) -> Result<Self, Self::Rejection> {
        match state.authenticate(&parts.headers).await {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(Redirect::to(LOGIN_PATH)),
        }
    }
}

impl super::State {
    pub async fn get_session(&self, session_id: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(session_id)?;

        session.is_valid().then(|| session.clone())
    }

    pub async fn create_session(&self, for_user: UserID, _auth: crate::auth::Auth) -> SessionID {
        let session_id: SessionID =
            crate::blog::get_random_hex_string::<{ crate::blog::SESSION_ID_BYTES }>();
        let new_session = Session {
            for_user,
            expires_at: std::time::Instant::now() + self.config.session_ttl(),
        };

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| session.is_valid());
        sessions.insert(session_id.clone(), new_session);

        session_id
    }

    pub async fn remove_session(&self, session_id: &str) -> Option<Session> {
        self.sessions.write().await.remove(session_id)
    }
}

pub fn session_cookie(session_id: SessionID) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
