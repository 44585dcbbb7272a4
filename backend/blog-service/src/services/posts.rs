/// Post service - reading posts and admin management
use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::models::post::POST_DATE_FORMAT;
use crate::models::{Post, PostForm, PostSummary};
use chrono::Local;
use sqlx::SqlitePool;

pub const DUPLICATE_TITLE_MESSAGE: &str = "A post with this title already exists.";

pub struct PostService {
    pool: SqlitePool,
}

impl PostService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All posts, newest first
    pub async fn list_posts(&self) -> Result<Vec<PostSummary>> {
        Ok(post_repo::list_posts(&self.pool).await?)
    }

    /// Get a post or fail with `NotFound`
    pub async fn get_post(&self, post_id: i64) -> Result<Post> {
        post_repo::get_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} does not exist", post_id)))
    }

    /// Create a post dated today. A taken title yields `Conflict`.
    pub async fn create_post(&self, author_id: i64, form: &PostForm) -> Result<i64> {
        let date = Local::now().format(POST_DATE_FORMAT).to_string();

        let post_id = post_repo::create_post(
            &self.pool,
            author_id,
            &form.title,
            &form.subtitle,
            &date,
            &form.body,
            &form.img_url,
        )
        .await
        .map_err(duplicate_title)?;

        tracing::info!(post_id, author_id, "Post created");
        Ok(post_id)
    }

    /// Replace title, subtitle, image and body; author and date are kept
    pub async fn update_post(&self, post_id: i64, form: &PostForm) -> Result<()> {
        let updated = post_repo::update_post(
            &self.pool,
            post_id,
            &form.title,
            &form.subtitle,
            &form.body,
            &form.img_url,
        )
        .await
        .map_err(duplicate_title)?;

        if !updated {
            return Err(AppError::NotFound(format!("Post {} does not exist", post_id)));
        }

        tracing::info!(post_id, "Post updated");
        Ok(())
    }

    /// Delete a post together with its comments
    pub async fn delete_post(&self, post_id: i64) -> Result<()> {
        if !post_repo::delete_post(&self.pool, post_id).await? {
            return Err(AppError::NotFound(format!("Post {} does not exist", post_id)));
        }

        tracing::info!(post_id, "Post deleted");
        Ok(())
    }
}

fn duplicate_title(err: sqlx::Error) -> AppError {
    match AppError::from(err) {
        AppError::Conflict(_) => AppError::Conflict(DUPLICATE_TITLE_MESSAGE.to_string()),
        other => other,
    }
}
