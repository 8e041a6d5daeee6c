use crate::db::{VideoOwnerRow, OWNER_CARD_COLUMNS};
use crate::models::Video;
use crate::pagination::{Pagination, SortDirection, VideoSortKey};
use sqlx::PgPool;
use uuid::Uuid;

/// Filter for the public video listing.
#[derive(Debug, Default)]
pub struct VideoListFilter {
    /// Free-text match against title/description
    pub query: Option<String>,
    pub owner_id: Option<Uuid>,
    pub sort: Option<VideoSortKey>,
    pub direction: Option<SortDirection>,
}

/// Create a new video document.
#[allow(clippy::too_many_arguments)]
pub async fn insert(
    pool: &PgPool,
    owner_id: Uuid,
    title: &str,
    description: &str,
    thumbnail_url: &str,
    video_url: &str,
    duration_secs: f64,
) -> Result<Video, sqlx::Error> {
    let video = sqlx::query_as::<_, Video>(
        r#"
        INSERT INTO videos (owner_id, title, description, thumbnail_url, video_url, duration_secs)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, description, thumbnail_url, video_url, duration_secs,
                  views, is_published, owner_id, created_at, updated_at
        "#,
    )
    .bind(owner_id)
    .bind(title)
    .bind(description)
    .bind(thumbnail_url)
    .bind(video_url)
    .bind(duration_secs)
    .fetch_one(pool)
    .await?;

    Ok(video)
}

pub async fn find_by_id(pool: &PgPool, video_id: Uuid) -> Result<Option<Video>, sqlx::Error> {
    let video = sqlx::query_as::<_, Video>(
        r#"
        SELECT id, title, description, thumbnail_url, video_url, duration_secs,
               views, is_published, owner_id, created_at, updated_at
        FROM videos
        WHERE id = $1
        "#,
    )
    .bind(video_id)
    .fetch_optional(pool)
    .await?;

    Ok(video)
}

pub async fn exists(pool: &PgPool, video_id: Uuid) -> Result<bool, sqlx::Error> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM videos WHERE id = $1)")
            .bind(video_id)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

/// Single video joined with its owner card, preserve-empty on the join.
pub async fn find_view_by_id(
    pool: &PgPool,
    video_id: Uuid,
) -> Result<Option<VideoOwnerRow>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT v.id, v.title, v.description, v.thumbnail_url, v.video_url,
               v.duration_secs, v.views, v.is_published, v.created_at,
               {OWNER_CARD_COLUMNS}
        FROM videos v
        LEFT JOIN users u ON u.id = v.owner_id
        WHERE v.id = $1
        "#
    );

    sqlx::query_as::<_, VideoOwnerRow>(&sql)
        .bind(video_id)
        .fetch_optional(pool)
        .await
}

/// Paginated listing of published videos with owner cards.
///
/// Filter and pagination values are bound; only the whitelisted sort column
/// and direction are interpolated.
pub async fn list_published(
    pool: &PgPool,
    filter: &VideoListFilter,
    pagination: Pagination,
) -> Result<(Vec<VideoOwnerRow>, i64), sqlx::Error> {
    let pattern = format!("%{}%", filter.query.as_deref().unwrap_or(""));
    let sort = filter.sort.unwrap_or(VideoSortKey::CreatedAt);
    let direction = filter.direction.unwrap_or(SortDirection::Desc);

    let sql = format!(
        r#"
        SELECT v.id, v.title, v.description, v.thumbnail_url, v.video_url,
               v.duration_secs, v.views, v.is_published, v.created_at,
               {columns}
        FROM videos v
        LEFT JOIN users u ON u.id = v.owner_id
        WHERE v.is_published = TRUE
          AND (v.title ILIKE $1 OR v.description ILIKE $1)
          AND ($2::uuid IS NULL OR v.owner_id = $2)
        ORDER BY {sort_col} {dir}
        LIMIT $3 OFFSET $4
        "#,
        columns = OWNER_CARD_COLUMNS,
        sort_col = sort.column(),
        dir = direction.keyword(),
    );

    let rows = sqlx::query_as::<_, VideoOwnerRow>(&sql)
        .bind(&pattern)
        .bind(filter.owner_id)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(pool)
        .await?;

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM videos v
        WHERE v.is_published = TRUE
          AND (v.title ILIKE $1 OR v.description ILIKE $1)
          AND ($2::uuid IS NULL OR v.owner_id = $2)
        "#,
    )
    .bind(&pattern)
    .bind(filter.owner_id)
    .fetch_one(pool)
    .await?;

    Ok((rows, total))
}

/// Published videos of one channel, newest first, with owner cards.
pub async fn list_channel_videos(
    pool: &PgPool,
    channel_id: Uuid,
) -> Result<Vec<VideoOwnerRow>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT v.id, v.title, v.description, v.thumbnail_url, v.video_url,
               v.duration_secs, v.views, v.is_published, v.created_at,
               {OWNER_CARD_COLUMNS}
        FROM videos v
        LEFT JOIN users u ON u.id = v.owner_id
        WHERE v.owner_id = $1 AND v.is_published = TRUE
        ORDER BY v.created_at DESC
        "#
    );

    sqlx::query_as::<_, VideoOwnerRow>(&sql)
        .bind(channel_id)
        .fetch_all(pool)
        .await
}

/// Update title/description/thumbnail; absent fields keep their value.
pub async fn update_meta(
    pool: &PgPool,
    video_id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
    thumbnail_url: Option<&str>,
) -> Result<Video, sqlx::Error> {
    let video = sqlx::query_as::<_, Video>(
        r#"
        UPDATE videos
        SET title = COALESCE($2, title),
            description = COALESCE($3, description),
            thumbnail_url = COALESCE($4, thumbnail_url),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, title, description, thumbnail_url, video_url, duration_secs,
                  views, is_published, owner_id, created_at, updated_at
        "#,
    )
    .bind(video_id)
    .bind(title)
    .bind(description)
    .bind(thumbnail_url)
    .fetch_one(pool)
    .await?;

    Ok(video)
}

/// Flip the published flag, returning the new state.
pub async fn toggle_published(pool: &PgPool, video_id: Uuid) -> Result<bool, sqlx::Error> {
    let published: bool = sqlx::query_scalar(
        r#"
        UPDATE videos
        SET is_published = NOT is_published, updated_at = NOW()
        WHERE id = $1
        RETURNING is_published
        "#,
    )
    .bind(video_id)
    .fetch_one(pool)
    .await?;

    Ok(published)
}

pub async fn increment_views(pool: &PgPool, video_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE videos SET views = views + 1 WHERE id = $1")
        .bind(video_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Hard delete. Dependent likes/comments/playlist rows go with it via FKs.
pub async fn delete(pool: &PgPool, video_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM videos WHERE id = $1")
        .bind(video_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Per-channel aggregates for the dashboard: video count, view sum and like
/// count over that channel's videos. Zeros when the channel has none.
pub async fn channel_video_stats(
    pool: &PgPool,
    channel_id: Uuid,
) -> Result<(i64, i64, i64), sqlx::Error> {
    let row: (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM videos WHERE owner_id = $1),
            (SELECT COALESCE(SUM(views), 0)::BIGINT FROM videos WHERE owner_id = $1),
            (SELECT COUNT(*)
             FROM likes l
             JOIN videos v ON v.id = l.video_id
             WHERE v.owner_id = $1)
        "#,
    )
    .bind(channel_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
