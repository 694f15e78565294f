use crate::blog::{Post, PostID, User, UserID};
use crate::error::Result;
use async_trait::async_trait;

pub mod file;
#[cfg(test)]
pub mod memory;

/// Document persistence for users and their posts.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user(&self, id: &UserID) -> Result<Option<User>>;

    /// Loads posts in the order of `ids`, silently skipping ids with no stored post.
    async fn find_posts(&self, ids: &[PostID]) -> Result<Vec<Post>>;

    /// `Ok(false)` if a user with the same id already exists.
    async fn insert_user(&self, user: &User) -> Result<bool>;

    /// Appends `post` to the user's collection. Atomic per user, no duplicate check.
    async fn push_user_post(&self, user: &UserID, post: &PostID) -> Result<()>;

    /// Removes every occurrence of `post` from the user's collection.
    async fn pull_user_post(&self, user: &UserID, post: &PostID) -> Result<()>;

    async fn insert_post(&self, post: &Post) -> Result<()>;
}
