use crate::error::Result;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use rand::SeedableRng;
use std::collections::HashMap;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Proof that a password was just checked or registered. Only this module can make one.
pub struct Auth(());

/// `username<TAB>hash` lines. Lines without a tab are skipped and the first
/// entry for a username wins. A missing file holds no logins.
async fn read_logins(logins_path: &Path) -> std::io::Result<HashMap<String, String>> {
    let contents = match tokio::fs::read_to_string(logins_path).await {
        Ok(it) => it,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(err) => return Err(err),
    };

    let mut logins = HashMap::new();
    for (username, hash) in contents.lines().filter_map(|line| line.split_once('\t')) {
        logins
            .entry(username.to_owned())
            .or_insert_with(|| hash.to_owned());
    }

    Ok(logins)
}

fn hash_password(password: &str) -> argon2::password_hash::Result<String> {
    let mut rng = rand_chacha::ChaCha20Rng::from_entropy();
    let salt = SaltString::generate(&mut rng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

fn verify_password(password: &str, hash: &str) -> argon2::password_hash::Result<bool> {
    let hash = PasswordHash::new(hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &hash) {
        Err(argon2::password_hash::Error::Password) => Ok(false),
        other => other.map(|()| true),
    }
}

impl Auth {
    /// `None` for an unknown username or a wrong password.
    pub async fn validate(
        logins_path: &Path,
        username: &str,
        password: String,
    ) -> Result<Option<Auth>> {
        let logins_file = read_logins(logins_path).await?;

        let Some(hash) = logins_file.get(username).cloned() else {
            return Ok(None);
        };

        let password_is_valid =
            tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;

        if password_is_valid {
            Ok(Some(Auth(())))
        } else {
            Ok(None)
        }
    }

    /// Appends a login, or `None` when the username is already registered.
    ///
    /// The check and the append are not atomic; callers serialize registrations
    /// (see `State::register_login`).
    pub async fn write_entry(
        logins_path: &Path,
        username: &str,
        password: String,
    ) -> Result<Option<Auth>> {
        let logins_file = read_logins(logins_path).await?;
        if logins_file.contains_key(username) {
            return Ok(None);
        }

        let hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(logins_path)
            .await?
            .write_all(format!("{username}\t{hash}\n").as_bytes())
            .await?;

        Ok(Some(Auth(())))
    }

    #[cfg(test)]
    pub fn for_tests() -> Auth {
        Auth(())
    }
}
