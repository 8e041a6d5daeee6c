use crate::models::Comment;
use crate::pagination::Pagination;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::OWNER_CARD_COLUMNS;

/// Comment row joined with its (possibly absent) owner.
#[derive(Debug, sqlx::FromRow)]
pub struct CommentOwnerRow {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub owner_id: Option<Uuid>,
    pub owner_username: Option<String>,
    pub owner_full_name: Option<String>,
    pub owner_avatar_url: Option<String>,
}

/// Create a new comment on a video.
pub async fn insert(
    pool: &PgPool,
    video_id: Uuid,
    owner_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (video_id, owner_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, content, owner_id, video_id, created_at, updated_at
        "#,
    )
    .bind(video_id)
    .bind(owner_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

pub async fn find_by_id(pool: &PgPool, comment_id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, content, owner_id, video_id, created_at, updated_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

pub async fn exists(pool: &PgPool, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1)")
            .bind(comment_id)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

/// Paginated comments of a video, newest first, with owner cards.
pub async fn list_by_video(
    pool: &PgPool,
    video_id: Uuid,
    pagination: Pagination,
) -> Result<(Vec<CommentOwnerRow>, i64), sqlx::Error> {
    let sql = format!(
        r#"
        SELECT c.id, c.content, c.created_at, {OWNER_CARD_COLUMNS}
        FROM comments c
        LEFT JOIN users u ON u.id = c.owner_id
        WHERE c.video_id = $1
        ORDER BY c.created_at DESC
        LIMIT $2 OFFSET $3
        "#
    );

    let rows = sqlx::query_as::<_, CommentOwnerRow>(&sql)
        .bind(video_id)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(pool)
        .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE video_id = $1")
        .bind(video_id)
        .fetch_one(pool)
        .await?;

    Ok((rows, total))
}

pub async fn update_content(
    pool: &PgPool,
    comment_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET content = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, content, owner_id, video_id, created_at, updated_at
        "#,
    )
    .bind(comment_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Delete a comment and every like targeting it in one transaction.
pub async fn delete_with_likes(pool: &PgPool, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM likes WHERE comment_id = $1")
        .bind(comment_id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}
