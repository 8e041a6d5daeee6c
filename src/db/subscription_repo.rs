use crate::db::UserCardRow;
use sqlx::PgPool;
use uuid::Uuid;

/// Atomic insert-if-absent for the `(subscriber, channel)` row. Returns true
/// when a row was inserted.
pub async fn insert_if_absent(
    pool: &PgPool,
    subscriber_id: Uuid,
    channel_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let inserted: Option<Uuid> = sqlx::query_scalar(
        r#"
        INSERT INTO subscriptions (subscriber_id, channel_id)
        VALUES ($1, $2)
        ON CONFLICT (subscriber_id, channel_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(subscriber_id)
    .bind(channel_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

/// Delete-if-present for the `(subscriber, channel)` row.
pub async fn delete(
    pool: &PgPool,
    subscriber_id: Uuid,
    channel_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM subscriptions
        WHERE subscriber_id = $1 AND channel_id = $2
        "#,
    )
    .bind(subscriber_id)
    .bind(channel_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Subscriber count of a channel.
pub async fn count_channel_subscribers(
    pool: &PgPool,
    channel_id: Uuid,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE channel_id = $1")
        .bind(channel_id)
        .fetch_one(pool)
        .await
}

/// Subscriber cards of a channel, newest subscription first.
pub async fn list_subscribers(
    pool: &PgPool,
    channel_id: Uuid,
) -> Result<Vec<UserCardRow>, sqlx::Error> {
    sqlx::query_as::<_, UserCardRow>(
        r#"
        SELECT u.id, u.username, u.full_name, u.avatar_url
        FROM subscriptions s
        JOIN users u ON u.id = s.subscriber_id
        WHERE s.channel_id = $1
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(channel_id)
    .fetch_all(pool)
    .await
}

/// Channel cards a user is subscribed to, newest subscription first.
pub async fn list_subscribed_channels(
    pool: &PgPool,
    subscriber_id: Uuid,
) -> Result<Vec<UserCardRow>, sqlx::Error> {
    sqlx::query_as::<_, UserCardRow>(
        r#"
        SELECT u.id, u.username, u.full_name, u.avatar_url
        FROM subscriptions s
        JOIN users u ON u.id = s.channel_id
        WHERE s.subscriber_id = $1
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(subscriber_id)
    .fetch_all(pool)
    .await
}
