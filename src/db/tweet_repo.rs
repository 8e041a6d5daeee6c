use crate::models::Tweet;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::OWNER_CARD_COLUMNS;

/// Tweet row joined with its (possibly absent) owner.
#[derive(Debug, sqlx::FromRow)]
pub struct TweetOwnerRow {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_id: Option<Uuid>,
    pub owner_username: Option<String>,
    pub owner_full_name: Option<String>,
    pub owner_avatar_url: Option<String>,
}

pub async fn insert(pool: &PgPool, owner_id: Uuid, content: &str) -> Result<Tweet, sqlx::Error> {
    let tweet = sqlx::query_as::<_, Tweet>(
        r#"
        INSERT INTO tweets (owner_id, content)
        VALUES ($1, $2)
        RETURNING id, content, owner_id, created_at, updated_at
        "#,
    )
    .bind(owner_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(tweet)
}

pub async fn find_by_id(pool: &PgPool, tweet_id: Uuid) -> Result<Option<Tweet>, sqlx::Error> {
    let tweet = sqlx::query_as::<_, Tweet>(
        r#"
        SELECT id, content, owner_id, created_at, updated_at
        FROM tweets
        WHERE id = $1
        "#,
    )
    .bind(tweet_id)
    .fetch_optional(pool)
    .await?;

    Ok(tweet)
}

pub async fn exists(pool: &PgPool, tweet_id: Uuid) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tweets WHERE id = $1)")
        .bind(tweet_id)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// All tweets of a user, newest first, with owner cards.
pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<TweetOwnerRow>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT t.id, t.content, t.created_at, t.updated_at, {OWNER_CARD_COLUMNS}
        FROM tweets t
        LEFT JOIN users u ON u.id = t.owner_id
        WHERE t.owner_id = $1
        ORDER BY t.created_at DESC
        "#
    );

    sqlx::query_as::<_, TweetOwnerRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn update_content(
    pool: &PgPool,
    tweet_id: Uuid,
    content: &str,
) -> Result<Tweet, sqlx::Error> {
    let tweet = sqlx::query_as::<_, Tweet>(
        r#"
        UPDATE tweets
        SET content = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, content, owner_id, created_at, updated_at
        "#,
    )
    .bind(tweet_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(tweet)
}

pub async fn delete(pool: &PgPool, tweet_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tweets WHERE id = $1")
        .bind(tweet_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
