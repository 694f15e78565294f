use crate::auth::Auth;
use crate::blog::{SessionID, UserID};
use crate::config::Config;
use crate::error::Result;
use crate::store::Store;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub mod session;

pub type SharedState = axum::extract::State<Arc<State>>;
pub type NestedRouter = axum::Router<Arc<State>>;

pub struct State {
    pub config: Config,
    pub store: Arc<dyn Store>,
    pub sessions: RwLock<HashMap<SessionID, session::Session>>,
    // held across the duplicate check and the append to logins.txt
    login_writes: Mutex<()>,
}

impl State {
    pub fn new(config: Config, store: Arc<dyn Store>) -> State {
        State {
            config,
            store,
            sessions: RwLock::new(HashMap::new()),
            login_writes: Mutex::new(()),
        }
    }

    /// Registers a login. Of two signups racing for one username, only one gets an `Auth`.
    pub async fn register_login(&self, username: &str, password: String) -> Result<Option<Auth>> {
        let _guard = self.login_writes.lock().await;

        Auth::write_entry(&self.config.logins_path(), username, password).await
    }

    /// The user behind the request's session cookie, if it names a live session.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Option<UserID> {
        let jar = CookieJar::from_headers(headers);
        let session_id = jar.get(session::SESSION_COOKIE)?.value();

        self.get_session(session_id)
            .await
            .map(|session| session.for_user)
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_signups_register_one_login() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::rooted_at(dir.path());
        tokio::fs::create_dir_all(&config.store_path).await.unwrap();
        let logins_path = config.logins_path();
        let state = Arc::new(State::new(config, Arc::new(MemoryStore::default())));

        let mut set = tokio::task::JoinSet::new();
        for n in 0..4 {
            let state = state.clone();
            set.spawn(async move { state.register_login("alice", format!("pw{n}")).await });
        }

        let mut registered = 0;
        while let Some(result) = set.join_next().await {
            if result.unwrap().unwrap().is_some() {
                registered += 1;
            }
        }

        assert_eq!(registered, 1);
        let logins = tokio::fs::read_to_string(&logins_path).await.unwrap();
        assert_eq!(logins.lines().count(), 1);
    }
}
