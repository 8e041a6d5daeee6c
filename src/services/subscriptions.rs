/// Subscription service - the channel-follow toggle and its two list views
use crate::db::{subscription_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{OwnerCard, ToggleResult};
use sqlx::PgPool;
use uuid::Uuid;

pub struct SubscriptionService {
    pool: PgPool,
}

impl SubscriptionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Flip the `(subscriber, channel)` row and report the new state plus
    /// the channel's subscriber count. Subscribing to yourself is rejected.
    pub async fn toggle(&self, subscriber_id: Uuid, channel_id: Uuid) -> Result<ToggleResult> {
        if subscriber_id == channel_id {
            return Err(AppError::BadRequest(
                "cannot subscribe to your own channel".to_string(),
            ));
        }

        if !user_repo::exists(&self.pool, subscriber_id).await? {
            return Err(AppError::Unauthorized("user not found".to_string()));
        }
        if !user_repo::exists(&self.pool, channel_id).await? {
            return Err(AppError::NotFound("channel not found".to_string()));
        }

        let inserted =
            subscription_repo::insert_if_absent(&self.pool, subscriber_id, channel_id).await?;
        let active = if inserted {
            true
        } else {
            subscription_repo::delete(&self.pool, subscriber_id, channel_id).await?;
            false
        };

        let count = subscription_repo::count_channel_subscribers(&self.pool, channel_id).await?;

        Ok(ToggleResult { active, count })
    }

    /// Subscriber cards of a channel.
    pub async fn subscribers(&self, channel_id: Uuid) -> Result<Vec<OwnerCard>> {
        if !user_repo::exists(&self.pool, channel_id).await? {
            return Err(AppError::NotFound("channel not found".to_string()));
        }

        let rows = subscription_repo::list_subscribers(&self.pool, channel_id).await?;
        Ok(rows.into_iter().map(|r| r.into_card()).collect())
    }

    /// Channel cards a user is subscribed to.
    pub async fn subscribed_channels(&self, user_id: Uuid) -> Result<Vec<OwnerCard>> {
        if !user_repo::exists(&self.pool, user_id).await? {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let rows = subscription_repo::list_subscribed_channels(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(|r| r.into_card()).collect())
    }
}
