use crate::db::{VideoOwnerRow, OWNER_CARD_COLUMNS};
use sqlx::PgPool;
use uuid::Uuid;

/// Record a watch. Re-watching bumps the entry to the front of the history.
pub async fn record(pool: &PgPool, user_id: Uuid, video_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO watch_history (user_id, video_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, video_id) DO UPDATE SET watched_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(video_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Watched videos, most recent first, with owner cards.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<VideoOwnerRow>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT v.id, v.title, v.description, v.thumbnail_url, v.video_url,
               v.duration_secs, v.views, v.is_published, v.created_at,
               {OWNER_CARD_COLUMNS}
        FROM watch_history h
        JOIN videos v ON v.id = h.video_id
        LEFT JOIN users u ON u.id = v.owner_id
        WHERE h.user_id = $1
        ORDER BY h.watched_at DESC
        "#
    );

    sqlx::query_as::<_, VideoOwnerRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
}
