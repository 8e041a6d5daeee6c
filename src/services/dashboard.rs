/// Channel dashboard - aggregate statistics and the channel's own video list
use crate::db::{subscription_repo, user_repo, video_repo};
use crate::error::{AppError, Result};
use crate::models::{ChannelStats, VideoView};
use sqlx::PgPool;
use uuid::Uuid;

pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fold the channel's videos into totals. A channel with no videos (or
    /// an unknown ID) reports zeros rather than an error.
    pub async fn channel_stats(&self, channel_id: Uuid) -> Result<ChannelStats> {
        let (total_videos, total_views, total_likes) =
            video_repo::channel_video_stats(&self.pool, channel_id).await?;
        let total_subscribers =
            subscription_repo::count_channel_subscribers(&self.pool, channel_id).await?;

        Ok(ChannelStats {
            total_videos,
            total_views,
            total_likes,
            total_subscribers,
        })
    }

    /// Published videos of the channel with owner cards.
    pub async fn channel_videos(&self, channel_id: Uuid) -> Result<Vec<VideoView>> {
        if !user_repo::exists(&self.pool, channel_id).await? {
            return Err(AppError::NotFound("channel not found".to_string()));
        }

        let rows = video_repo::list_channel_videos(&self.pool, channel_id).await?;
        Ok(rows.into_iter().map(|r| r.into_view()).collect())
    }
}
