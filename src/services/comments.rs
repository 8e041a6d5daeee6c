/// Comment service - listing, creation and owner-gated edits
use crate::db::{comment_repo, user_repo, video_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentView, OwnerCard};
use crate::pagination::{Page, Pagination};
use crate::services::require_content;
use sqlx::PgPool;
use uuid::Uuid;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Paginated comments of a video, newest first, with owner cards.
    pub async fn list_for_video(
        &self,
        video_id: Uuid,
        pagination: Pagination,
    ) -> Result<Page<CommentView>> {
        if !video_repo::exists(&self.pool, video_id).await? {
            return Err(AppError::NotFound("video not found".to_string()));
        }

        let (rows, total) = comment_repo::list_by_video(&self.pool, video_id, pagination).await?;
        let items = rows
            .into_iter()
            .map(|r| CommentView {
                id: r.id,
                content: r.content,
                created_at: r.created_at,
                owner: OwnerCard::from_parts(
                    r.owner_id,
                    r.owner_username,
                    r.owner_full_name,
                    r.owner_avatar_url,
                ),
            })
            .collect();

        Ok(Page::new(items, pagination, total))
    }

    pub async fn create(&self, actor_id: Uuid, video_id: Uuid, content: &str) -> Result<Comment> {
        let content = require_content(content, "content")?;

        if !user_repo::exists(&self.pool, actor_id).await? {
            return Err(AppError::Unauthorized("user not found".to_string()));
        }
        if !video_repo::exists(&self.pool, video_id).await? {
            return Err(AppError::NotFound("video not found".to_string()));
        }

        Ok(comment_repo::insert(&self.pool, video_id, actor_id, &content).await?)
    }

    pub async fn update(&self, actor_id: Uuid, comment_id: Uuid, content: &str) -> Result<Comment> {
        let content = require_content(content, "content")?;
        self.owned_comment(actor_id, comment_id).await?;

        Ok(comment_repo::update_content(&self.pool, comment_id, &content).await?)
    }

    /// Delete a comment and cascade its likes.
    pub async fn delete(&self, actor_id: Uuid, comment_id: Uuid) -> Result<()> {
        self.owned_comment(actor_id, comment_id).await?;
        comment_repo::delete_with_likes(&self.pool, comment_id).await?;
        Ok(())
    }

    async fn owned_comment(&self, actor_id: Uuid, comment_id: Uuid) -> Result<Comment> {
        let comment = comment_repo::find_by_id(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;

        if comment.owner_id != actor_id {
            return Err(AppError::Forbidden(
                "user unauthorized to perform this action".to_string(),
            ));
        }

        Ok(comment)
    }
}
