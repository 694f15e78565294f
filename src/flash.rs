use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Success,
    Error,
}

/// A one-shot message shown by the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

/// A flash message together with where to send the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub flash: Flash,
    pub target: &'static str,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
        }
    }
}

impl Notice {
    pub fn success(message: impl Into<String>, target: &'static str) -> Notice {
        Notice {
            flash: Flash {
                level: Level::Success,
                message: message.into(),
            },
            target,
        }
    }

    pub fn error(message: impl Into<String>, target: &'static str) -> Notice {
        Notice {
            flash: Flash {
                level: Level::Error,
                message: message.into(),
            },
            target,
        }
    }

    pub fn respond(self, jar: CookieJar) -> (CookieJar, Redirect) {
        (put(jar, &self.flash), Redirect::to(self.target))
    }
}

pub fn put(jar: CookieJar, flash: &Flash) -> CookieJar {
    let value = serde_json::to_string(flash).expect("flash should serialize");

    jar.add(
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Reads the pending flash, if any, and clears it.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let flash = match serde_json::from_str::<Flash>(cookie.value()) {
        Ok(it) => Some(it),
        Err(err) => {
            tracing::debug!(error = %err, "discarding unreadable flash cookie");
            None
        }
    };

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
}

#[cfg(test)]
pub(crate) fn from_set_cookie(headers: &axum::http::HeaderMap) -> Option<Flash> {
    let mut request_headers = axum::http::HeaderMap::new();
    for set_cookie in headers.get_all(axum::http::header::SET_COOKIE) {
        let pair = set_cookie.to_str().ok()?.split(';').next()?.to_owned();
        request_headers.append(axum::http::header::COOKIE, pair.parse().ok()?);
    }

    take(CookieJar::from_headers(&request_headers)).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn notice_sets_cookie_and_redirects() {
        let response = Notice::error("User not found, try again!", "/")
            .respond(CookieJar::new())
            .into_response();

        assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[axum::http::header::LOCATION], "/");
        assert_eq!(
            from_set_cookie(response.headers()),
            Some(Flash {
                level: Level::Error,
                message: "User not found, try again!".into()
            })
        );
    }

    #[test]
    fn take_clears_the_cookie() {
        let flash = Flash {
            level: Level::Success,
            message: "Post created successfully!".into(),
        };
        let jar = put(CookieJar::new(), &flash);

        let (jar, taken) = take(jar);
        assert_eq!(taken, Some(flash));
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn garbage_cookie_is_ignored() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(axum::http::header::COOKIE, "flash=nonsense".parse().unwrap());

        let (_, taken) = take(CookieJar::from_headers(&headers));
        assert_eq!(taken, None);
    }

    #[test]
    fn cookie_value_is_percent_encoded() {
        let response = Notice::success("Post created successfully!", "/posts")
            .respond(CookieJar::new())
            .into_response();

        let set_cookie = response.headers()[axum::http::header::SET_COOKIE]
            .to_str()
            .unwrap();
        let value = set_cookie
            .split(';')
            .next()
            .unwrap()
            .strip_prefix("flash=")
            .unwrap();

        assert!(!value.contains(['"', ',', ' ']), "raw cookie value {value}");
    }
}
