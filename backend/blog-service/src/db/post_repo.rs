use crate::models::{Post, PostSummary};
use sqlx::SqlitePool;

/// All posts, newest first
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<PostSummary>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostSummary>(
        r#"
        SELECT p.id, p.title, p.subtitle, p.date, u.name AS author_name
        FROM blog_posts p
        LEFT JOIN users u ON u.id = p.author_id
        ORDER BY p.id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Get a single post with its author's name
pub async fn get_post_by_id(pool: &SqlitePool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.author_id, p.title, p.subtitle, p.date, p.body, p.img_url,
               u.name AS author_name
        FROM blog_posts p
        LEFT JOIN users u ON u.id = p.author_id
        WHERE p.id = ?
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Insert a post and return its id
pub async fn create_post(
    pool: &SqlitePool,
    author_id: i64,
    title: &str,
    subtitle: &str,
    date: &str,
    body: &str,
    img_url: &str,
) -> Result<i64, sqlx::Error> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO blog_posts (author_id, title, subtitle, date, body, img_url)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(author_id)
    .bind(title)
    .bind(subtitle)
    .bind(date)
    .bind(body)
    .bind(img_url)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Update the editable fields of a post. Returns false when the post does not exist.
pub async fn update_post(
    pool: &SqlitePool,
    post_id: i64,
    title: &str,
    subtitle: &str,
    body: &str,
    img_url: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE blog_posts
        SET title = ?, subtitle = ?, body = ?, img_url = ?
        WHERE id = ?
        "#,
    )
    .bind(title)
    .bind(subtitle)
    .bind(body)
    .bind(img_url)
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a post; its comments go with it (ON DELETE CASCADE)
pub async fn delete_post(pool: &SqlitePool, post_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM blog_posts WHERE id = ?")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
