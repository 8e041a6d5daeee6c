/// Playlist service - CRUD plus duplicate-free membership management
use crate::db::{playlist_repo, user_repo, video_repo};
use crate::error::{AppError, Result};
use crate::models::{OwnerCard, Playlist, PlaylistDetail, PlaylistSummary};
use crate::services::require_content;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PlaylistService {
    pool: PgPool,
}

impl PlaylistService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, actor_id: Uuid, name: &str, description: &str) -> Result<Playlist> {
        let name = require_content(name, "name")?;
        let description = require_content(description, "description")?;

        if !user_repo::exists(&self.pool, actor_id).await? {
            return Err(AppError::Unauthorized("user not found".to_string()));
        }

        Ok(playlist_repo::insert(&self.pool, actor_id, &name, &description).await?)
    }

    /// Playlists of a user with derived video counts.
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<PlaylistSummary>> {
        if !user_repo::exists(&self.pool, user_id).await? {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let rows = playlist_repo::list_by_user(&self.pool, user_id).await?;
        Ok(rows
            .into_iter()
            .map(|r| PlaylistSummary {
                id: r.id,
                name: r.name,
                description: r.description,
                video_count: r.video_count,
                created_at: r.created_at,
                updated_at: r.updated_at,
            })
            .collect())
    }

    /// Playlist with owner card and member videos (each carrying its own
    /// owner card), newest video first.
    pub async fn detail(&self, playlist_id: Uuid) -> Result<PlaylistDetail> {
        let playlist = playlist_repo::find_by_id(&self.pool, playlist_id)
            .await?
            .ok_or_else(|| AppError::NotFound("playlist not found".to_string()))?;

        let owner = user_repo::find_by_id(&self.pool, playlist.owner_id)
            .await?
            .map(|u| OwnerCard {
                id: u.id,
                username: u.username,
                full_name: u.full_name,
                avatar_url: u.avatar_url,
            });

        let videos: Vec<_> = playlist_repo::list_videos(&self.pool, playlist_id)
            .await?
            .into_iter()
            .map(|r| r.into_view())
            .collect();
        let video_count = videos.len() as i64;

        Ok(PlaylistDetail {
            id: playlist.id,
            name: playlist.name,
            description: playlist.description,
            owner,
            videos,
            video_count,
            created_at: playlist.created_at,
            updated_at: playlist.updated_at,
        })
    }

    /// Add a video; a video already in the playlist is rejected.
    pub async fn add_video(&self, actor_id: Uuid, playlist_id: Uuid, video_id: Uuid) -> Result<()> {
        self.owned_playlist(actor_id, playlist_id).await?;

        if !video_repo::exists(&self.pool, video_id).await? {
            return Err(AppError::NotFound("video not found".to_string()));
        }

        let inserted = playlist_repo::add_video(&self.pool, playlist_id, video_id).await?;
        if !inserted {
            return Err(AppError::BadRequest(
                "video already exists in this playlist".to_string(),
            ));
        }

        Ok(())
    }

    pub async fn remove_video(
        &self,
        actor_id: Uuid,
        playlist_id: Uuid,
        video_id: Uuid,
    ) -> Result<()> {
        self.owned_playlist(actor_id, playlist_id).await?;

        if !video_repo::exists(&self.pool, video_id).await? {
            return Err(AppError::NotFound("video not found".to_string()));
        }

        let removed = playlist_repo::remove_video(&self.pool, playlist_id, video_id).await?;
        if !removed {
            return Err(AppError::BadRequest(
                "video does not exist in this playlist".to_string(),
            ));
        }

        Ok(())
    }

    pub async fn update(
        &self,
        actor_id: Uuid,
        playlist_id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Playlist> {
        self.owned_playlist(actor_id, playlist_id).await?;

        let name = match name {
            Some(n) => Some(require_content(&n, "name")?),
            None => None,
        };
        let description = match description {
            Some(d) => Some(require_content(&d, "description")?),
            None => None,
        };

        Ok(playlist_repo::update_meta(
            &self.pool,
            playlist_id,
            name.as_deref(),
            description.as_deref(),
        )
        .await?)
    }

    pub async fn delete(&self, actor_id: Uuid, playlist_id: Uuid) -> Result<()> {
        self.owned_playlist(actor_id, playlist_id).await?;
        playlist_repo::delete(&self.pool, playlist_id).await?;
        Ok(())
    }

    async fn owned_playlist(&self, actor_id: Uuid, playlist_id: Uuid) -> Result<Playlist> {
        let playlist = playlist_repo::find_by_id(&self.pool, playlist_id)
            .await?
            .ok_or_else(|| AppError::NotFound("playlist not found".to_string()))?;

        if playlist.owner_id != actor_id {
            return Err(AppError::Forbidden(
                "user unauthorized to perform this action".to_string(),
            ));
        }

        Ok(playlist)
    }
}
