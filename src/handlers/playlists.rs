/// Playlist endpoints: CRUD plus membership management.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::response::ApiResponse;
use crate::services::PlaylistService;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistBody {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlaylistBody {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// POST /api/v1/playlists
pub async fn create_playlist(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    body: web::Json<CreatePlaylistBody>,
) -> Result<HttpResponse> {
    let service = PlaylistService::new(pool.get_ref().clone());
    let playlist = service.create(auth.id, &body.name, &body.description).await?;

    Ok(ApiResponse::created(playlist, "playlist created successfully"))
}

/// GET /api/v1/users/{id}/playlists
pub async fn list_user_playlists(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PlaylistService::new(pool.get_ref().clone());
    let playlists = service.list_by_user(path.into_inner()).await?;

    Ok(ApiResponse::ok(playlists, "playlists fetched successfully"))
}

/// GET /api/v1/playlists/{id}
pub async fn get_playlist(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PlaylistService::new(pool.get_ref().clone());
    let playlist = service.detail(path.into_inner()).await?;

    Ok(ApiResponse::ok(playlist, "playlist fetched successfully"))
}

/// POST /api/v1/playlists/{id}/videos/{videoId}
pub async fn add_video_to_playlist(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (playlist_id, video_id) = path.into_inner();
    let service = PlaylistService::new(pool.get_ref().clone());
    service.add_video(auth.id, playlist_id, video_id).await?;

    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "video added to playlist successfully",
    ))
}

/// DELETE /api/v1/playlists/{id}/videos/{videoId}
pub async fn remove_video_from_playlist(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (playlist_id, video_id) = path.into_inner();
    let service = PlaylistService::new(pool.get_ref().clone());
    service.remove_video(auth.id, playlist_id, video_id).await?;

    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "video removed from playlist successfully",
    ))
}

/// PATCH /api/v1/playlists/{id}
pub async fn update_playlist(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePlaylistBody>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let service = PlaylistService::new(pool.get_ref().clone());
    let playlist = service
        .update(auth.id, path.into_inner(), body.name, body.description)
        .await?;

    Ok(ApiResponse::ok(playlist, "playlist updated successfully"))
}

/// DELETE /api/v1/playlists/{id}
pub async fn delete_playlist(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PlaylistService::new(pool.get_ref().clone());
    service.delete(auth.id, path.into_inner()).await?;

    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "playlist deleted successfully",
    ))
}
