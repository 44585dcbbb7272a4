/// Comment service - adding comments and admin moderation
use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentView};
use sqlx::SqlitePool;

pub struct CommentService {
    pool: SqlitePool,
}

impl CommentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Comments of a post with their authors, oldest first
    pub async fn get_post_comments(&self, post_id: i64) -> Result<Vec<CommentView>> {
        Ok(comment_repo::get_comments_by_post(&self.pool, post_id).await?)
    }

    /// Add a comment to an existing post
    pub async fn create_comment(
        &self,
        post_id: i64,
        author_id: i64,
        comment_text: &str,
    ) -> Result<Comment> {
        if post_repo::get_post_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Post {} does not exist", post_id)));
        }

        let comment =
            comment_repo::create_comment(&self.pool, post_id, author_id, comment_text).await?;

        tracing::info!(comment_id = comment.id, post_id, author_id, "Comment added");
        Ok(comment)
    }

    /// Delete a comment of the given post
    pub async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<()> {
        if !comment_repo::delete_comment(&self.pool, post_id, comment_id).await? {
            return Err(AppError::NotFound(format!(
                "Comment {} does not exist on post {}",
                comment_id, post_id
            )));
        }

        tracing::info!(comment_id, post_id, "Comment deleted");
        Ok(())
    }

    pub async fn count_post_comments(&self, post_id: i64) -> Result<i64> {
        Ok(comment_repo::count_comments_by_post(&self.pool, post_id).await?)
    }
}
