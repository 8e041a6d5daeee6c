use crate::db::{VideoOwnerRow, OWNER_CARD_COLUMNS};
use crate::models::LikeTarget;
use sqlx::PgPool;
use uuid::Uuid;

/// Atomic insert-if-absent for the `(user, target)` like row. Returns true
/// when a row was inserted. The ON CONFLICT arm targets the partial unique
/// index for the kind, so concurrent toggles cannot produce duplicates.
pub async fn insert_if_absent(
    pool: &PgPool,
    user_id: Uuid,
    target: LikeTarget,
    target_id: Uuid,
) -> Result<bool, sqlx::Error> {
    // target.column() comes from a fixed enum, never from request input
    let column = target.column();
    let sql = format!(
        r#"
        INSERT INTO likes (user_id, {column})
        VALUES ($1, $2)
        ON CONFLICT (user_id, {column}) WHERE {column} IS NOT NULL DO NOTHING
        RETURNING id
        "#
    );

    let inserted: Option<Uuid> = sqlx::query_scalar(&sql)
        .bind(user_id)
        .bind(target_id)
        .fetch_optional(pool)
        .await?;

    Ok(inserted.is_some())
}

/// Delete-if-present for the `(user, target)` like row.
pub async fn delete(
    pool: &PgPool,
    user_id: Uuid,
    target: LikeTarget,
    target_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let sql = format!(
        "DELETE FROM likes WHERE user_id = $1 AND {} = $2",
        target.column()
    );

    let result = sqlx::query(&sql)
        .bind(user_id)
        .bind(target_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Total like rows for one target.
pub async fn count_for_target(
    pool: &PgPool,
    target: LikeTarget,
    target_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM likes WHERE {} = $1", target.column());

    sqlx::query_scalar(&sql).bind(target_id).fetch_one(pool).await
}

/// Videos liked by a user, most recently liked first. The like→video join is
/// inner (a like whose video vanished has nothing to render); the owner join
/// preserves empty.
pub async fn list_liked_videos(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<VideoOwnerRow>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT v.id, v.title, v.description, v.thumbnail_url, v.video_url,
               v.duration_secs, v.views, v.is_published, v.created_at,
               {OWNER_CARD_COLUMNS}
        FROM likes l
        JOIN videos v ON v.id = l.video_id
        LEFT JOIN users u ON u.id = v.owner_id
        WHERE l.user_id = $1 AND l.video_id IS NOT NULL
        ORDER BY l.created_at DESC
        "#
    );

    sqlx::query_as::<_, VideoOwnerRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
}
