/// Channel dashboard endpoints.
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::response::ApiResponse;
use crate::services::DashboardService;

/// GET /api/v1/dashboard/{channelId}/stats
pub async fn channel_stats(
    pool: web::Data<PgPool>,
    _auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = DashboardService::new(pool.get_ref().clone());
    let stats = service.channel_stats(path.into_inner()).await?;

    Ok(ApiResponse::ok(stats, "channel stats fetched successfully"))
}

/// GET /api/v1/dashboard/{channelId}/videos
pub async fn channel_videos(
    pool: web::Data<PgPool>,
    _auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = DashboardService::new(pool.get_ref().clone());
    let videos = service.channel_videos(path.into_inner()).await?;

    Ok(ApiResponse::ok(videos, "channel videos fetched successfully"))
}
