use ::config::builder::DefaultState;
use ::config::{ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "BLOG";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Root of the document store: `user/`, `post/` and `logins.txt`
    pub store_path: PathBuf,
    pub uploads_path: PathBuf,
    pub session_ttl_secs: u64,
    pub upload_limit_bytes: usize,
}

impl Config {
    /// Defaults overridden by `BLOG_*` environment variables, after loading `.env` if present.
    pub fn load() -> Result<Config, ConfigError> {
        let _ = dotenvy::dotenv();

        Self::builder()?
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        ::config::Config::builder()
            .set_default("bind_address", "0.0.0.0:8010")?
            .set_default("store_path", "store")?
            .set_default("uploads_path", "uploads")?
            .set_default("session_ttl_secs", 60 * 60 * 24)?
            .set_default("upload_limit_bytes", 10 * 1024 * 1024)
    }

    pub fn session_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.session_ttl_secs)
    }

    pub fn users_path(&self) -> PathBuf {
        self.store_path.join("user")
    }

    pub fn posts_path(&self) -> PathBuf {
        self.store_path.join("post")
    }

    pub fn logins_path(&self) -> PathBuf {
        self.store_path.join("logins.txt")
    }

    /// Configuration rooted in a scratch directory, for tests.
    #[cfg(test)]
    pub fn rooted_at(root: &std::path::Path) -> Config {
        Config {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 0)),
            store_path: root.join("store"),
            uploads_path: root.join("uploads"),
            session_ttl_secs: 60,
            upload_limit_bytes: 1024 * 1024,
        }
    }
}
