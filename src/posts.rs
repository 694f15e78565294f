use crate::blog::{Post, UserID};
use crate::error::{AppError, Result};
use crate::flash::Notice;
use crate::store::Store;
use crate::upload::PostForm;

pub const USER_NOT_FOUND: &str = "User not found, try again!";
pub const FETCH_FAILED: &str = "An error occurred while fetching your posts, try again!";
pub const CREATED: &str = "Post created successfully!";
pub const CREATE_FAILED: &str = "Something went wrong, try again!";

/// The user's posts in collection order, or where to send them instead.
pub async fn list_posts(
    store: &dyn Store,
    user_id: &UserID,
) -> std::result::Result<Vec<Post>, Notice> {
    let user = match store.find_user(user_id).await {
        Ok(Some(it)) => it,
        Ok(None) => {
            tracing::warn!(user = %user_id, "listing posts for missing user");
            return Err(Notice::error(USER_NOT_FOUND, "/"));
        }
        Err(err) => {
            tracing::error!(user = %user_id, error = %err, "error loading user");
            return Err(Notice::error(FETCH_FAILED, "/posts"));
        }
    };

    match store.find_posts(&user.posts).await {
        Ok(posts) => Ok(posts),
        Err(err) => {
            tracing::error!(user = %user_id, error = %err, "error loading posts");
            Err(Notice::error(FETCH_FAILED, "/posts"))
        }
    }
}

/// Runs the creation steps and turns the outcome into a flash and redirect.
pub async fn create_post(store: &dyn Store, user_id: &UserID, form: PostForm) -> Notice {
    match try_create_post(store, user_id, form).await {
        Ok(post) => {
            tracing::info!(user = %user_id, post = %post.id, slug = %post.slug, "created post");
            Notice::success(CREATED, "/posts")
        }
        Err(err) => {
            tracing::error!(user = %user_id, error = %err, "error creating post");
            Notice::error(CREATE_FAILED, "/create-post")
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(AppError::InvalidForm(field))
}

pub async fn try_create_post(
    store: &dyn Store,
    user_id: &UserID,
    form: PostForm,
) -> Result<Post> {
    let title = required(form.title, "title")?;
    let content = required(form.content, "content")?;
    let image = form.image.ok_or(AppError::InvalidForm("image"))?;

    let Some(user) = store.find_user(user_id).await? else {
        return Err(AppError::NotFound(format!("user {user_id}")));
    };

    let post = Post::new(title, content, image, user.id.clone());

    // linked before it is saved, so a failed save has to be unlinked again
    store.push_user_post(&user.id, &post.id).await?;

    if let Err(err) = store.insert_post(&post).await {
        if let Err(unlink_err) = store.pull_user_post(&user.id, &post.id).await {
            tracing::error!(
                user = %user.id,
                post = %post.id,
                error = %unlink_err,
                "could not unlink unsaved post, user now references a missing post"
            );
        }
        return Err(err);
    }

    Ok(post)
}
