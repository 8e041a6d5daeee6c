/// Data models
///
/// Entities mirror the persisted tables; view models are the denormalized
/// projections list endpoints return. View models never carry credential
/// fields, which also never leave the user repository.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity, minus credentials. Queries outside the user repository must
/// not select the credential columns.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub duration_secs: f64,
    pub views: i64,
    pub is_published: bool,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub owner_id: Uuid,
    pub video_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tweet {
    pub id: Uuid,
    pub content: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Playlist {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Which entity type a like row points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeTarget {
    Video,
    Comment,
    Tweet,
}

impl LikeTarget {
    /// Column holding the target ID in the likes table.
    pub fn column(&self) -> &'static str {
        match self {
            LikeTarget::Video => "video_id",
            LikeTarget::Comment => "comment_id",
            LikeTarget::Tweet => "tweet_id",
        }
    }

    pub fn entity_name(&self) -> &'static str {
        match self {
            LikeTarget::Video => "video",
            LikeTarget::Comment => "comment",
            LikeTarget::Tweet => "tweet",
        }
    }
}

/// Trimmed user projection attached to joined view rows. This is the only
/// shape of user data a join may expose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerCard {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar_url: String,
}

impl OwnerCard {
    /// Assemble from nullable LEFT JOIN columns. A missing owner yields
    /// `None` without dropping the base row.
    pub fn from_parts(
        id: Option<Uuid>,
        username: Option<String>,
        full_name: Option<String>,
        avatar_url: Option<String>,
    ) -> Option<Self> {
        Some(OwnerCard {
            id: id?,
            username: username?,
            full_name: full_name?,
            avatar_url: avatar_url?,
        })
    }
}

/// Video joined with its owner card.
#[derive(Debug, Clone, Serialize)]
pub struct VideoView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub duration_secs: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub owner: Option<OwnerCard>,
}

/// Comment joined with its owner card.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub owner: Option<OwnerCard>,
}

/// Tweet joined with its owner card.
#[derive(Debug, Clone, Serialize)]
pub struct TweetView {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: Option<OwnerCard>,
}

/// Result of a like/subscription toggle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToggleResult {
    /// true iff the relation row exists after the toggle
    pub active: bool,
    /// total relation rows for the target after the toggle
    pub count: i64,
}

/// Channel dashboard statistics.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ChannelStats {
    pub total_videos: i64,
    pub total_views: i64,
    pub total_likes: i64,
    pub total_subscribers: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub video_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner: Option<OwnerCard>,
    pub videos: Vec<VideoView>,
    pub video_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_card_preserves_empty_joins() {
        assert_eq!(OwnerCard::from_parts(None, None, None, None), None);

        let id = Uuid::new_v4();
        let card = OwnerCard::from_parts(
            Some(id),
            Some("chai".into()),
            Some("Chai Aur Code".into()),
            Some("https://cdn/avatar.png".into()),
        )
        .unwrap();
        assert_eq!(card.id, id);
        assert_eq!(card.username, "chai");
    }

    #[test]
    fn like_target_columns() {
        assert_eq!(LikeTarget::Video.column(), "video_id");
        assert_eq!(LikeTarget::Comment.column(), "comment_id");
        assert_eq!(LikeTarget::Tweet.column(), "tweet_id");
    }

    #[test]
    fn channel_stats_start_at_zero() {
        let stats = ChannelStats::default();
        assert_eq!(stats.total_videos, 0);
        assert_eq!(stats.total_views, 0);
        assert_eq!(stats.total_likes, 0);
        assert_eq!(stats.total_subscribers, 0);
    }

    #[test]
    fn toggle_result_serializes_active_and_count() {
        let json = serde_json::to_value(ToggleResult {
            active: true,
            count: 3,
        })
        .unwrap();
        assert_eq!(json["active"], true);
        assert_eq!(json["count"], 3);
    }
}
