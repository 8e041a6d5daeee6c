/// Video service - publish, retrieval, edit, teardown and the public listing
use crate::db::{user_repo, video_repo, watch_history_repo};
use crate::error::{AppError, Result};
use crate::models::{Video, VideoView};
use crate::pagination::{Page, Pagination};
use crate::services::require_content;
use crate::storage::{extension_for, media_key, ObjectStorage, UploadRollback};
use sqlx::PgPool;
use uuid::Uuid;

/// One buffered multipart file.
pub struct UploadedFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Validated publish request.
pub struct PublishRequest {
    pub title: String,
    pub description: String,
    pub duration_secs: f64,
    pub thumbnail: UploadedFile,
    pub video: UploadedFile,
}

pub struct VideoService {
    pool: PgPool,
    storage: ObjectStorage,
}

impl VideoService {
    pub fn new(pool: PgPool, storage: ObjectStorage) -> Self {
        Self { pool, storage }
    }

    /// Public paginated listing of published videos.
    pub async fn list(
        &self,
        filter: video_repo::VideoListFilter,
        pagination: Pagination,
    ) -> Result<Page<VideoView>> {
        let (rows, total) = video_repo::list_published(&self.pool, &filter, pagination).await?;
        let items = rows.into_iter().map(|r| r.into_view()).collect();
        Ok(Page::new(items, pagination, total))
    }

    /// Single video with owner card. An authenticated viewer counts as a
    /// watch: the view counter bumps and the video lands in their history.
    pub async fn get(&self, video_id: Uuid, viewer: Option<Uuid>) -> Result<VideoView> {
        let row = video_repo::find_view_by_id(&self.pool, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("video not found".to_string()))?;

        let mut view = row.into_view();

        if let Some(viewer_id) = viewer {
            video_repo::increment_views(&self.pool, video_id).await?;
            watch_history_repo::record(&self.pool, viewer_id, video_id).await?;
            view.views += 1;
        }

        Ok(view)
    }

    /// Upload both assets and create the video document. Any failure after
    /// the first upload rolls the already-stored objects back.
    pub async fn publish(&self, owner_id: Uuid, req: PublishRequest) -> Result<Video> {
        let title = require_content(&req.title, "title")?;
        let description = require_content(&req.description, "description")?;

        if !user_repo::exists(&self.pool, owner_id).await? {
            return Err(AppError::Unauthorized("user not found".to_string()));
        }

        let mut rollback = UploadRollback::new();

        let thumb_key = media_key("thumbnails", extension_for(&req.thumbnail.content_type));
        let thumbnail_url = self
            .storage
            .put(&thumb_key, req.thumbnail.bytes, &req.thumbnail.content_type)
            .await?;
        rollback.track(thumb_key);

        let video_key = media_key("videos", extension_for(&req.video.content_type));
        let video_url = match self
            .storage
            .put(&video_key, req.video.bytes, &req.video.content_type)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                rollback.abort(&self.storage).await;
                return Err(e);
            }
        };
        rollback.track(video_key);

        let video = match video_repo::insert(
            &self.pool,
            owner_id,
            &title,
            &description,
            &thumbnail_url,
            &video_url,
            req.duration_secs,
        )
        .await
        {
            Ok(video) => video,
            Err(e) => {
                rollback.abort(&self.storage).await;
                return Err(e.into());
            }
        };

        rollback.disarm();
        Ok(video)
    }

    /// Edit title/description and optionally replace the thumbnail. The old
    /// thumbnail object is removed only after the row points at the new one.
    pub async fn update(
        &self,
        actor_id: Uuid,
        video_id: Uuid,
        title: Option<String>,
        description: Option<String>,
        new_thumbnail: Option<UploadedFile>,
    ) -> Result<Video> {
        let existing = self.owned_video(actor_id, video_id).await?;

        let title = match title {
            Some(t) => Some(require_content(&t, "title")?),
            None => None,
        };
        let description = match description {
            Some(d) => Some(require_content(&d, "description")?),
            None => None,
        };

        let mut new_thumbnail_url = None;
        if let Some(file) = new_thumbnail {
            let key = media_key("thumbnails", extension_for(&file.content_type));
            let url = self.storage.put(&key, file.bytes, &file.content_type).await?;
            new_thumbnail_url = Some(url);
        }

        let updated = match video_repo::update_meta(
            &self.pool,
            video_id,
            title.as_deref(),
            description.as_deref(),
            new_thumbnail_url.as_deref(),
        )
        .await
        {
            Ok(video) => video,
            Err(e) => {
                if let Some(url) = &new_thumbnail_url {
                    if let Some(key) = self.storage.key_from_url(url) {
                        let mut rollback = UploadRollback::new();
                        rollback.track(key);
                        rollback.abort(&self.storage).await;
                    }
                }
                return Err(e.into());
            }
        };

        if new_thumbnail_url.is_some() {
            if let Some(old_key) = self.storage.key_from_url(&existing.thumbnail_url) {
                if let Err(e) = self.storage.delete(&old_key).await {
                    tracing::warn!(key = old_key, "stale thumbnail cleanup failed: {}", e);
                }
            }
        }

        Ok(updated)
    }

    /// Remove the media objects first, then the row. FKs cascade the
    /// dependent likes, comments and playlist memberships.
    pub async fn delete(&self, actor_id: Uuid, video_id: Uuid) -> Result<()> {
        let video = self.owned_video(actor_id, video_id).await?;

        if let Some(key) = self.storage.key_from_url(&video.thumbnail_url) {
            self.storage.delete(&key).await?;
        }
        if let Some(key) = self.storage.key_from_url(&video.video_url) {
            self.storage.delete(&key).await?;
        }

        video_repo::delete(&self.pool, video_id).await?;
        Ok(())
    }

    /// Flip the published flag, returning the new state.
    pub async fn toggle_publish(&self, actor_id: Uuid, video_id: Uuid) -> Result<bool> {
        self.owned_video(actor_id, video_id).await?;
        Ok(video_repo::toggle_published(&self.pool, video_id).await?)
    }

    /// Watch history of a user, most recent first.
    pub async fn watch_history(&self, user_id: Uuid) -> Result<Vec<VideoView>> {
        let rows = watch_history_repo::list_for_user(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(|r| r.into_view()).collect())
    }

    /// Fetch the video and enforce the ownership gate.
    async fn owned_video(&self, actor_id: Uuid, video_id: Uuid) -> Result<Video> {
        let video = video_repo::find_by_id(&self.pool, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("video not found".to_string()))?;

        if video.owner_id != actor_id {
            return Err(AppError::Forbidden(
                "user unauthorized to perform this action".to_string(),
            ));
        }

        Ok(video)
    }
}
