/// Database access layer
///
/// Connection pooling plus one repository module per table. View queries
/// return flat row structs here; the nullable owner columns every join
/// selects are shared through [`OWNER_CARD_COLUMNS`] so no query can drift
/// into exposing more of the user row than the trimmed card.
use crate::config::DatabaseConfig;
use crate::models::{OwnerCard, VideoView};
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

pub mod comment_repo;
pub mod like_repo;
pub mod playlist_repo;
pub mod subscription_repo;
pub mod tweet_repo;
pub mod user_repo;
pub mod video_repo;
pub mod watch_history_repo;

/// Create the process-wide connection pool.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await
}

/// The one projection of joined user data any view query may select.
/// Aliased so every row struct maps the same four nullable columns.
pub(crate) const OWNER_CARD_COLUMNS: &str = "u.id AS owner_id, \
     u.username AS owner_username, \
     u.full_name AS owner_full_name, \
     u.avatar_url AS owner_avatar_url";

/// Video row joined with its (possibly absent) owner.
#[derive(Debug, sqlx::FromRow)]
pub struct VideoOwnerRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub duration_secs: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub owner_id: Option<Uuid>,
    pub owner_username: Option<String>,
    pub owner_full_name: Option<String>,
    pub owner_avatar_url: Option<String>,
}

impl VideoOwnerRow {
    pub fn into_view(self) -> VideoView {
        VideoView {
            id: self.id,
            title: self.title,
            description: self.description,
            thumbnail_url: self.thumbnail_url,
            video_url: self.video_url,
            duration_secs: self.duration_secs,
            views: self.views,
            is_published: self.is_published,
            created_at: self.created_at,
            owner: OwnerCard::from_parts(
                self.owner_id,
                self.owner_username,
                self.owner_full_name,
                self.owner_avatar_url,
            ),
        }
    }
}

/// User card row for subscriber/channel lists (FK-backed, never null).
#[derive(Debug, sqlx::FromRow)]
pub struct UserCardRow {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar_url: String,
}

impl UserCardRow {
    pub fn into_card(self) -> OwnerCard {
        OwnerCard {
            id: self.id,
            username: self.username,
            full_name: self.full_name,
            avatar_url: self.avatar_url,
        }
    }
}
