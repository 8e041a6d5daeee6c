/// Tweet service - short text posts with the same ownership rules as comments
use crate::db::{tweet_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{OwnerCard, Tweet, TweetView};
use crate::services::require_content;
use sqlx::PgPool;
use uuid::Uuid;

pub struct TweetService {
    pool: PgPool,
}

impl TweetService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, actor_id: Uuid, content: &str) -> Result<Tweet> {
        let content = require_content(content, "content")?;

        if !user_repo::exists(&self.pool, actor_id).await? {
            return Err(AppError::Unauthorized("user not found".to_string()));
        }

        Ok(tweet_repo::insert(&self.pool, actor_id, &content).await?)
    }

    /// All tweets of a user, newest first, with owner cards.
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<TweetView>> {
        if !user_repo::exists(&self.pool, user_id).await? {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let rows = tweet_repo::list_by_user(&self.pool, user_id).await?;
        Ok(rows
            .into_iter()
            .map(|r| TweetView {
                id: r.id,
                content: r.content,
                created_at: r.created_at,
                updated_at: r.updated_at,
                owner: OwnerCard::from_parts(
                    r.owner_id,
                    r.owner_username,
                    r.owner_full_name,
                    r.owner_avatar_url,
                ),
            })
            .collect())
    }

    pub async fn update(&self, actor_id: Uuid, tweet_id: Uuid, content: &str) -> Result<Tweet> {
        let content = require_content(content, "content")?;
        self.owned_tweet(actor_id, tweet_id).await?;

        Ok(tweet_repo::update_content(&self.pool, tweet_id, &content).await?)
    }

    pub async fn delete(&self, actor_id: Uuid, tweet_id: Uuid) -> Result<()> {
        self.owned_tweet(actor_id, tweet_id).await?;
        tweet_repo::delete(&self.pool, tweet_id).await?;
        Ok(())
    }

    async fn owned_tweet(&self, actor_id: Uuid, tweet_id: Uuid) -> Result<Tweet> {
        let tweet = tweet_repo::find_by_id(&self.pool, tweet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("tweet not found".to_string()))?;

        if tweet.owner_id != actor_id {
            return Err(AppError::Forbidden(
                "user unauthorized to perform this action".to_string(),
            ));
        }

        Ok(tweet)
    }
}
