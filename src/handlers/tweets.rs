/// Tweet endpoints: short text posts tied to a user.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::response::ApiResponse;
use crate::services::TweetService;

#[derive(Debug, Deserialize)]
pub struct TweetBody {
    pub content: String,
}

/// POST /api/v1/tweets
pub async fn create_tweet(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    body: web::Json<TweetBody>,
) -> Result<HttpResponse> {
    let service = TweetService::new(pool.get_ref().clone());
    let tweet = service.create(auth.id, &body.content).await?;

    Ok(ApiResponse::created(tweet, "tweet created successfully"))
}

/// GET /api/v1/users/{id}/tweets
pub async fn list_user_tweets(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = TweetService::new(pool.get_ref().clone());
    let tweets = service.list_by_user(path.into_inner()).await?;

    Ok(ApiResponse::ok(tweets, "tweets fetched successfully"))
}

/// PATCH /api/v1/tweets/{id}
pub async fn update_tweet(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<TweetBody>,
) -> Result<HttpResponse> {
    let service = TweetService::new(pool.get_ref().clone());
    let tweet = service
        .update(auth.id, path.into_inner(), &body.content)
        .await?;

    Ok(ApiResponse::ok(tweet, "tweet updated successfully"))
}

/// DELETE /api/v1/tweets/{id}
pub async fn delete_tweet(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = TweetService::new(pool.get_ref().clone());
    service.delete(auth.id, path.into_inner()).await?;

    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "tweet deleted successfully",
    ))
}
