use crate::blog::{Post, PostID, User, UserID};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// In-memory store with switches to make individual operations fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub users: RwLock<HashMap<UserID, User>>,
    pub posts: RwLock<HashMap<PostID, Post>>,
    pub fail_find_user: AtomicBool,
    pub fail_find_posts: AtomicBool,
    pub fail_insert_post: AtomicBool,
    pub fail_pull_user_post: AtomicBool,
}

fn injected_failure(operation: &str) -> AppError {
    AppError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("injected {operation} failure"),
    ))
}

impl MemoryStore {
    pub async fn with_user(id: &str) -> MemoryStore {
        let store = MemoryStore::default();
        store
            .users
            .write()
            .await
            .insert(id.into(), User::new(id.into(), id.to_uppercase()));
        store
    }

    pub async fn user(&self, id: &str) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }
}

#[async_trait]
impl super::Store for MemoryStore {
    async fn find_user(&self, id: &UserID) -> Result<Option<User>> {
        if self.fail_find_user.load(Ordering::SeqCst) {
            return Err(injected_failure("find_user"));
        }
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_posts(&self, ids: &[PostID]) -> Result<Vec<Post>> {
        if self.fail_find_posts.load(Ordering::SeqCst) {
            return Err(injected_failure("find_posts"));
        }
        let posts = self.posts.read().await;
        Ok(ids.iter().filter_map(|id| posts.get(id).cloned()).collect())
    }

    async fn insert_user(&self, user: &User) -> Result<bool> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Ok(false);
        }
        users.insert(user.id.clone(), user.clone());
        Ok(true)
    }

    async fn push_user_post(&self, user: &UserID, post: &PostID) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user)
            .ok_or_else(|| AppError::NotFound(format!("user {user}")))?;
        user.posts.push(post.clone());
        Ok(())
    }

    async fn pull_user_post(&self, user: &UserID, post: &PostID) -> Result<()> {
        if self.fail_pull_user_post.load(Ordering::SeqCst) {
            return Err(injected_failure("pull_user_post"));
        }
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user)
            .ok_or_else(|| AppError::NotFound(format!("user {user}")))?;
        user.posts.retain(|id| id != post);
        Ok(())
    }

    async fn insert_post(&self, post: &Post) -> Result<()> {
        if self.fail_insert_post.load(Ordering::SeqCst) {
            return Err(injected_failure("insert_post"));
        }
        self.posts
            .write()
            .await
            .insert(post.id.clone(), post.clone());
        Ok(())
    }
}
