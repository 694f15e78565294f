use crate::blog::{Post, PostID, User, UserID};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const TEMP_SUFFIX_BYTES: usize = 8;

/// One JSON document per user (`user/<id>.json`) and per post (`post/<id>.json`).
#[derive(Debug)]
pub struct FileStore {
    users_path: PathBuf,
    posts_path: PathBuf,
    // serializes read-modify-write and creation of user documents
    user_writes: Mutex<()>,
}

impl FileStore {
    pub async fn open(config: &crate::config::Config) -> std::io::Result<FileStore> {
        let store = FileStore {
            users_path: config.users_path(),
            posts_path: config.posts_path(),
            user_writes: Mutex::new(()),
        };

        tokio::fs::create_dir_all(&store.users_path).await?;
        tokio::fs::create_dir_all(&store.posts_path).await?;

        Ok(store)
    }

    fn user_path(&self, id: &UserID) -> PathBuf {
        self.users_path.join(format!("{id}.json"))
    }

    fn post_path(&self, id: &PostID) -> PathBuf {
        self.posts_path.join(format!("{id}.json"))
    }

    async fn update_user(&self, id: &UserID, update: impl FnOnce(&mut User)) -> Result<()> {
        let _guard = self.user_writes.lock().await;

        let Some(mut user) = read_document::<User>(&self.user_path(id)).await? else {
            return Err(AppError::NotFound(format!("user {id}")));
        };
        update(&mut user);

        write_document(&self.user_path(id), &user).await
    }
}

async fn read_document<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let file = match tokio::fs::read(path).await {
        Ok(it) => it,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    Ok(Some(serde_json::from_slice(&file)?))
}

/// Writes a sibling temp file and renames it over `path`, so readers never see a partial document.
async fn write_document<T: serde::Serialize>(path: &Path, document: &T) -> Result<()> {
    let temp_path = path.with_extension(format!(
        "tmp-{}",
        crate::blog::get_random_hex_string::<{ TEMP_SUFFIX_BYTES }>()
    ));

    tokio::fs::write(&temp_path, serde_json::to_vec(document)?).await?;
    if let Err(err) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(err.into());
    }

    Ok(())
}

#[async_trait]
impl super::Store for FileStore {
    async fn find_user(&self, id: &UserID) -> Result<Option<User>> {
        read_document(&self.user_path(id)).await
    }

    async fn find_posts(&self, ids: &[PostID]) -> Result<Vec<Post>> {
        let mut posts = Vec::with_capacity(ids.len());

        for id in ids {
            match read_document::<Post>(&self.post_path(id)).await? {
                Some(post) => posts.push(post),
                None => tracing::warn!(post = %id, "skipping reference to missing post"),
            }
        }

        Ok(posts)
    }

    async fn insert_user(&self, user: &User) -> Result<bool> {
        let _guard = self.user_writes.lock().await;

        let path = self.user_path(&user.id);
        if tokio::fs::try_exists(&path).await? {
            return Ok(false);
        }

        write_document(&path, user).await?;
        Ok(true)
    }

    async fn push_user_post(&self, user: &UserID, post: &PostID) -> Result<()> {
        self.update_user(user, |user| user.posts.push(post.clone()))
            .await
    }

    async fn pull_user_post(&self, user: &UserID, post: &PostID) -> Result<()> {
        self.update_user(user, |user| user.posts.retain(|id| id != post))
            .await
    }

    async fn insert_post(&self, post: &Post) -> Result<()> {
        write_document(&self.post_path(&post.id), post).await
    }
}
