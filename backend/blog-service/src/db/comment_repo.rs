use crate::models::{Comment, CommentView};
use sqlx::SqlitePool;

/// Create a new comment on a post
pub async fn create_comment(
    pool: &SqlitePool,
    post_id: i64,
    author_id: i64,
    comment_text: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (author_id, post_id, comment_text)
        VALUES (?, ?, ?)
        RETURNING id, author_id, post_id, comment_text
        "#,
    )
    .bind(author_id)
    .bind(post_id)
    .bind(comment_text)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Comments of a post in the order they were written, with author details
pub async fn get_comments_by_post(
    pool: &SqlitePool,
    post_id: i64,
) -> Result<Vec<CommentView>, sqlx::Error> {
    let comments = sqlx::query_as::<_, CommentView>(
        r#"
        SELECT c.id, c.post_id, c.comment_text, u.name AS author_name, u.email AS author_email
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = ?
        ORDER BY c.id ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Delete a comment only if it belongs to the given post
pub async fn delete_comment(
    pool: &SqlitePool,
    post_id: i64,
    comment_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ? AND post_id = ?")
        .bind(comment_id)
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_comments_by_post(pool: &SqlitePool, post_id: i64) -> Result<i64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
