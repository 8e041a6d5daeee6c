/// Video endpoints: public listing and retrieval, multipart publish,
/// owner-gated edit/teardown, publish toggle and watch history.
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::config::Config;
use crate::db::video_repo::VideoListFilter;
use crate::error::{AppError, Result};
use crate::pagination::{PageQuery, Pagination, SortDirection, VideoSortKey};
use crate::response::ApiResponse;
use crate::services::videos::{PublishRequest, UploadedFile};
use crate::services::VideoService;
use crate::storage::ObjectStorage;

#[derive(Debug, Deserialize)]
pub struct VideoListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Free-text search over title/description
    pub query: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortType")]
    pub sort_type: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
}

/// The parsed multipart form of a publish or edit request. Text fields and
/// buffered files, nothing written to disk.
#[derive(Default)]
struct VideoForm {
    title: Option<String>,
    description: Option<String>,
    duration_secs: Option<f64>,
    thumbnail: Option<UploadedFile>,
    video: Option<UploadedFile>,
}

/// Buffer one multipart field up to `cap` bytes.
async fn read_field_bytes(field: &mut Field, cap: usize, what: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        if bytes.len() + chunk.len() > cap {
            return Err(AppError::BadRequest(format!(
                "{what} exceeds the maximum upload size of {cap} bytes"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn read_text_field(field: &mut Field, what: &str) -> Result<String> {
    // 64 KiB is far beyond any legitimate text field
    let bytes = read_field_bytes(field, 64 * 1024, what).await?;
    String::from_utf8(bytes).map_err(|_| AppError::BadRequest(format!("{what} must be UTF-8")))
}

async fn read_file_field(field: &mut Field, cap: usize, what: &str) -> Result<UploadedFile> {
    let content_type = field
        .content_type()
        .map(|m| m.to_string())
        .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());
    let bytes = read_field_bytes(field, cap, what).await?;
    if bytes.is_empty() {
        return Err(AppError::BadRequest(format!("{what} file is empty")));
    }
    Ok(UploadedFile {
        bytes,
        content_type,
    })
}

/// Walk the multipart stream into a [`VideoForm`]. Unknown fields are
/// drained and ignored.
async fn parse_video_form(mut payload: Multipart, config: &Config) -> Result<VideoForm> {
    let mut form = VideoForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = Some(read_text_field(&mut field, "title").await?),
            "description" => {
                form.description = Some(read_text_field(&mut field, "description").await?)
            }
            "duration" => {
                let raw = read_text_field(&mut field, "duration").await?;
                let secs: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| AppError::BadRequest("duration must be a number".to_string()))?;
                if secs < 0.0 {
                    return Err(AppError::BadRequest(
                        "duration must not be negative".to_string(),
                    ));
                }
                form.duration_secs = Some(secs);
            }
            "thumbnail" => {
                form.thumbnail = Some(
                    read_file_field(
                        &mut field,
                        config.storage.max_image_upload_bytes,
                        "thumbnail",
                    )
                    .await?,
                )
            }
            "video" => {
                form.video = Some(
                    read_file_field(&mut field, config.storage.max_video_upload_bytes, "video")
                        .await?,
                )
            }
            _ => {
                // Drain so the stream can advance past the unknown part.
                while field
                    .try_next()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
                    .is_some()
                {}
            }
        }
    }

    Ok(form)
}

fn required<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| AppError::BadRequest(format!("{what} is required")))
}

/// GET /api/v1/videos
pub async fn list_videos(
    pool: web::Data<PgPool>,
    storage: web::Data<ObjectStorage>,
    query: web::Query<VideoListQuery>,
) -> Result<HttpResponse> {
    let pagination = Pagination::from_query(&PageQuery {
        page: query.page,
        limit: query.limit,
    });
    let filter = VideoListFilter {
        query: query.query.clone(),
        owner_id: query.user_id,
        sort: Some(VideoSortKey::from_param(query.sort_by.as_deref())),
        direction: Some(SortDirection::from_param(query.sort_type.as_deref())),
    };

    let service = VideoService::new(pool.get_ref().clone(), storage.get_ref().clone());
    let page = service.list(filter, pagination).await?;

    Ok(ApiResponse::ok(page, "videos fetched successfully"))
}

/// GET /api/v1/videos/{id}
///
/// Public. An authenticated viewer counts as a watch.
pub async fn get_video(
    pool: web::Data<PgPool>,
    storage: web::Data<ObjectStorage>,
    path: web::Path<Uuid>,
    viewer: Option<AuthUser>,
) -> Result<HttpResponse> {
    let service = VideoService::new(pool.get_ref().clone(), storage.get_ref().clone());
    let video = service
        .get(path.into_inner(), viewer.map(|v| v.id))
        .await?;

    Ok(ApiResponse::ok(video, "video fetched successfully"))
}

/// POST /api/v1/videos (multipart)
pub async fn publish_video(
    pool: web::Data<PgPool>,
    storage: web::Data<ObjectStorage>,
    config: web::Data<Config>,
    auth: AuthUser,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = parse_video_form(payload, config.get_ref()).await?;

    let request = PublishRequest {
        title: required(form.title, "title")?,
        description: required(form.description, "description")?,
        duration_secs: form.duration_secs.unwrap_or(0.0),
        thumbnail: required(form.thumbnail, "thumbnail")?,
        video: required(form.video, "video")?,
    };

    let service = VideoService::new(pool.get_ref().clone(), storage.get_ref().clone());
    let video = service.publish(auth.id, request).await?;

    tracing::info!(video_id = %video.id, owner_id = %auth.id, "video published");
    Ok(ApiResponse::created(video, "video published successfully"))
}

/// PATCH /api/v1/videos/{id} (multipart)
///
/// Title, description and thumbnail are each optional; absent fields keep
/// their value.
pub async fn update_video(
    pool: web::Data<PgPool>,
    storage: web::Data<ObjectStorage>,
    config: web::Data<Config>,
    auth: AuthUser,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = parse_video_form(payload, config.get_ref()).await?;

    let service = VideoService::new(pool.get_ref().clone(), storage.get_ref().clone());
    let video = service
        .update(
            auth.id,
            path.into_inner(),
            form.title,
            form.description,
            form.thumbnail,
        )
        .await?;

    Ok(ApiResponse::ok(video, "video updated successfully"))
}

/// DELETE /api/v1/videos/{id}
pub async fn delete_video(
    pool: web::Data<PgPool>,
    storage: web::Data<ObjectStorage>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let video_id = path.into_inner();
    let service = VideoService::new(pool.get_ref().clone(), storage.get_ref().clone());
    service.delete(auth.id, video_id).await?;

    tracing::info!(video_id = %video_id, owner_id = %auth.id, "video deleted");
    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "video deleted successfully",
    ))
}

/// PATCH /api/v1/videos/{id}/publish
pub async fn toggle_publish(
    pool: web::Data<PgPool>,
    storage: web::Data<ObjectStorage>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = VideoService::new(pool.get_ref().clone(), storage.get_ref().clone());
    let is_published = service.toggle_publish(auth.id, path.into_inner()).await?;

    Ok(ApiResponse::ok(
        serde_json::json!({ "is_published": is_published }),
        "publish status toggled successfully",
    ))
}

/// GET /api/v1/users/me/history
pub async fn watch_history(
    pool: web::Data<PgPool>,
    storage: web::Data<ObjectStorage>,
    auth: AuthUser,
) -> Result<HttpResponse> {
    let service = VideoService::new(pool.get_ref().clone(), storage.get_ref().clone());
    let videos = service.watch_history(auth.id).await?;

    Ok(ApiResponse::ok(videos, "watch history fetched successfully"))
}
