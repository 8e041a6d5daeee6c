/// Like service - presence toggles over the three target kinds
use crate::db::{comment_repo, like_repo, tweet_repo, user_repo, video_repo};
use crate::error::{AppError, Result};
use crate::models::{LikeTarget, ToggleResult, VideoView};
use sqlx::PgPool;
use uuid::Uuid;

pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Flip the like row for `(actor, target)` and report the new state plus
    /// the recomputed total for the target.
    ///
    /// The flip itself is insert-if-absent / delete-if-present against the
    /// partial unique indexes, so concurrent toggles settle on one row or
    /// none, never duplicates.
    pub async fn toggle(
        &self,
        actor_id: Uuid,
        target: LikeTarget,
        target_id: Uuid,
    ) -> Result<ToggleResult> {
        if !user_repo::exists(&self.pool, actor_id).await? {
            return Err(AppError::Unauthorized("user not found".to_string()));
        }

        let target_exists = match target {
            LikeTarget::Video => video_repo::exists(&self.pool, target_id).await?,
            LikeTarget::Comment => comment_repo::exists(&self.pool, target_id).await?,
            LikeTarget::Tweet => tweet_repo::exists(&self.pool, target_id).await?,
        };
        if !target_exists {
            return Err(AppError::NotFound(format!(
                "{} not found",
                target.entity_name()
            )));
        }

        let inserted = like_repo::insert_if_absent(&self.pool, actor_id, target, target_id).await?;
        let active = if inserted {
            true
        } else {
            like_repo::delete(&self.pool, actor_id, target, target_id).await?;
            false
        };

        let count = like_repo::count_for_target(&self.pool, target, target_id).await?;

        Ok(ToggleResult { active, count })
    }

    /// Videos the user has liked, most recently liked first.
    pub async fn liked_videos(&self, user_id: Uuid) -> Result<Vec<VideoView>> {
        let rows = like_repo::list_liked_videos(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(|r| r.into_view()).collect())
    }
}
