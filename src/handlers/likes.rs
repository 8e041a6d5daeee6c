/// Like endpoints: one toggle route per target kind, plus liked videos.
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::LikeTarget;
use crate::response::ApiResponse;
use crate::services::LikeService;

async fn toggle(
    pool: &PgPool,
    actor_id: Uuid,
    target: LikeTarget,
    target_id: Uuid,
) -> Result<HttpResponse> {
    let service = LikeService::new(pool.clone());
    let result = service.toggle(actor_id, target, target_id).await?;

    let message = if result.active {
        format!("{} liked successfully", target.entity_name())
    } else {
        format!("{} unliked successfully", target.entity_name())
    };
    Ok(ApiResponse::ok(result, message))
}

/// POST /api/v1/likes/video/{id}
pub async fn toggle_video_like(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    toggle(pool.get_ref(), auth.id, LikeTarget::Video, path.into_inner()).await
}

/// POST /api/v1/likes/comment/{id}
pub async fn toggle_comment_like(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    toggle(
        pool.get_ref(),
        auth.id,
        LikeTarget::Comment,
        path.into_inner(),
    )
    .await
}

/// POST /api/v1/likes/tweet/{id}
pub async fn toggle_tweet_like(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    toggle(pool.get_ref(), auth.id, LikeTarget::Tweet, path.into_inner()).await
}

/// GET /api/v1/likes/videos
pub async fn liked_videos(pool: web::Data<PgPool>, auth: AuthUser) -> Result<HttpResponse> {
    let service = LikeService::new(pool.get_ref().clone());
    let videos = service.liked_videos(auth.id).await?;

    Ok(ApiResponse::ok(videos, "liked videos fetched successfully"))
}
