use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub type PostID = String;
pub type UserID = String;
pub type SessionID = String;

pub const POST_ID_BYTES: usize = 12;
pub const SESSION_ID_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserID,
    pub name: String,
    // in the order they were linked
    pub posts: Vec<PostID>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostID,
    pub title: String,
    pub content: String,
    pub slug: String,
    /// File name of the image under the uploads directory
    pub image: String,
    pub user: UserID,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn new(id: UserID, name: String) -> User {
        User {
            id,
            name,
            posts: Vec::new(),
        }
    }
}

impl Post {
    pub fn new(title: String, content: String, image: String, user: UserID) -> Post {
        Post {
            id: get_random_hex_string::<POST_ID_BYTES>(),
            slug: slugify(&title),
            title,
            content,
            image,
            user,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Replaces every run of whitespace with a single `_` and lowercases the
/// result. Nothing else is escaped, so different titles can share a slug.
pub fn slugify(title: &str) -> String {
    static WHITESPACE_PATTERN: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();

    let whitespace_pattern = WHITESPACE_PATTERN
        .get_or_init(|| regex::Regex::new(r"\s+").expect("constant pattern should parse"));

    whitespace_pattern.replace_all(title, "_").to_lowercase()
}

pub fn get_random_hex_string<const LEN: usize>() -> String {
    let mut bytes = [0u8; LEN];
    rand_chacha::ChaCha20Rng::from_entropy().fill_bytes(&mut bytes);

    bytes.iter().fold(String::new(), |mut output, b| {
        let _ = write!(output, "{b:02x}");
        output
    })
}
