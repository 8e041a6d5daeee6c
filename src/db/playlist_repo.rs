use crate::db::{VideoOwnerRow, OWNER_CARD_COLUMNS};
use crate::models::Playlist;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Playlist row with its derived membership count.
#[derive(Debug, sqlx::FromRow)]
pub struct PlaylistCountRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub video_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub async fn insert(
    pool: &PgPool,
    owner_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Playlist, sqlx::Error> {
    let playlist = sqlx::query_as::<_, Playlist>(
        r#"
        INSERT INTO playlists (owner_id, name, description)
        VALUES ($1, $2, $3)
        RETURNING id, name, description, owner_id, created_at, updated_at
        "#,
    )
    .bind(owner_id)
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(playlist)
}

pub async fn find_by_id(pool: &PgPool, playlist_id: Uuid) -> Result<Option<Playlist>, sqlx::Error> {
    let playlist = sqlx::query_as::<_, Playlist>(
        r#"
        SELECT id, name, description, owner_id, created_at, updated_at
        FROM playlists
        WHERE id = $1
        "#,
    )
    .bind(playlist_id)
    .fetch_optional(pool)
    .await?;

    Ok(playlist)
}

/// Playlists of a user with video counts, newest first.
pub async fn list_by_user(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<PlaylistCountRow>, sqlx::Error> {
    sqlx::query_as::<_, PlaylistCountRow>(
        r#"
        SELECT p.id, p.name, p.description,
               (SELECT COUNT(*) FROM playlist_videos pv WHERE pv.playlist_id = p.id) AS video_count,
               p.created_at, p.updated_at
        FROM playlists p
        WHERE p.owner_id = $1
        ORDER BY p.created_at DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

pub async fn update_meta(
    pool: &PgPool,
    playlist_id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<Playlist, sqlx::Error> {
    let playlist = sqlx::query_as::<_, Playlist>(
        r#"
        UPDATE playlists
        SET name = COALESCE($2, name),
            description = COALESCE($3, description),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, name, description, owner_id, created_at, updated_at
        "#,
    )
    .bind(playlist_id)
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(playlist)
}

pub async fn delete(pool: &PgPool, playlist_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
        .bind(playlist_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Add a video to the playlist. Returns false when it was already a
/// member; the compound primary key makes a concurrent double-add collapse
/// to a single row.
pub async fn add_video(
    pool: &PgPool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let inserted: Option<Uuid> = sqlx::query_scalar(
        r#"
        INSERT INTO playlist_videos (playlist_id, video_id)
        VALUES ($1, $2)
        ON CONFLICT (playlist_id, video_id) DO NOTHING
        RETURNING video_id
        "#,
    )
    .bind(playlist_id)
    .bind(video_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

pub async fn remove_video(
    pool: &PgPool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM playlist_videos WHERE playlist_id = $1 AND video_id = $2",
    )
    .bind(playlist_id)
    .bind(video_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Member videos with their owner cards, newest video first.
pub async fn list_videos(
    pool: &PgPool,
    playlist_id: Uuid,
) -> Result<Vec<VideoOwnerRow>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT v.id, v.title, v.description, v.thumbnail_url, v.video_url,
               v.duration_secs, v.views, v.is_published, v.created_at,
               {OWNER_CARD_COLUMNS}
        FROM playlist_videos pv
        JOIN videos v ON v.id = pv.video_id
        LEFT JOIN users u ON u.id = v.owner_id
        WHERE pv.playlist_id = $1
        ORDER BY v.created_at DESC
        "#
    );

    sqlx::query_as::<_, VideoOwnerRow>(&sql)
        .bind(playlist_id)
        .fetch_all(pool)
        .await
}
