/// Subscription endpoints: the channel-follow toggle and its two list views.
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::response::ApiResponse;
use crate::services::SubscriptionService;

/// POST /api/v1/subscriptions/{channelId}
pub async fn toggle_subscription(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = SubscriptionService::new(pool.get_ref().clone());
    let result = service.toggle(auth.id, path.into_inner()).await?;

    let message = if result.active {
        "subscribed successfully"
    } else {
        "unsubscribed successfully"
    };
    Ok(ApiResponse::ok(result, message))
}

/// GET /api/v1/channels/{id}/subscribers
pub async fn list_subscribers(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = SubscriptionService::new(pool.get_ref().clone());
    let subscribers = service.subscribers(path.into_inner()).await?;

    Ok(ApiResponse::ok(
        serde_json::json!({
            "total": subscribers.len(),
            "subscribers": subscribers,
        }),
        "subscribers fetched successfully",
    ))
}

/// GET /api/v1/users/{id}/subscriptions
pub async fn list_subscribed_channels(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = SubscriptionService::new(pool.get_ref().clone());
    let channels = service.subscribed_channels(path.into_inner()).await?;

    Ok(ApiResponse::ok(
        serde_json::json!({
            "total": channels.len(),
            "channels": channels,
        }),
        "subscribed channels fetched successfully",
    ))
}
