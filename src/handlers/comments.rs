/// Comment endpoints: per-video listing plus owner-gated create/edit/delete.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::pagination::{PageQuery, Pagination};
use crate::response::ApiResponse;
use crate::services::CommentService;

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub content: String,
}

/// GET /api/v1/videos/{id}/comments
pub async fn list_comments(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let pagination = Pagination::from_query(&query);
    let service = CommentService::new(pool.get_ref().clone());
    let page = service.list_for_video(path.into_inner(), pagination).await?;

    Ok(ApiResponse::ok(page, "comments fetched successfully"))
}

/// POST /api/v1/videos/{id}/comments
pub async fn create_comment(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<CommentBody>,
) -> Result<HttpResponse> {
    let service = CommentService::new(pool.get_ref().clone());
    let comment = service
        .create(auth.id, path.into_inner(), &body.content)
        .await?;

    Ok(ApiResponse::created(comment, "comment added successfully"))
}

/// PATCH /api/v1/comments/{id}
pub async fn update_comment(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<CommentBody>,
) -> Result<HttpResponse> {
    let service = CommentService::new(pool.get_ref().clone());
    let comment = service
        .update(auth.id, path.into_inner(), &body.content)
        .await?;

    Ok(ApiResponse::ok(comment, "comment updated successfully"))
}

/// DELETE /api/v1/comments/{id}
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new(pool.get_ref().clone());
    service.delete(auth.id, path.into_inner()).await?;

    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "comment deleted successfully",
    ))
}
