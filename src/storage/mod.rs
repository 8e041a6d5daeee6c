/// Object storage client for media assets
///
/// Wraps the S3 SDK with the small surface the API needs: bounded-retry
/// uploads, deletes, key derivation and public URL composition. Multi-asset
/// requests pair it with [`UploadRollback`] so a failure after the first
/// upload never leaves orphaned objects behind.
use crate::config::StorageConfig;
use crate::error::AppError;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::time::Duration;
use uuid::Uuid;

const MAX_PUT_ATTEMPTS: u32 = 3;
const RETRY_BASE_BACKOFF_MS: u64 = 200;

#[derive(Clone)]
pub struct ObjectStorage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl ObjectStorage {
    pub async fn connect(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if config.endpoint.is_some() {
            // S3-compatible stores (MinIO etc.) want path-style addressing
            builder = builder.force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Upload an object, retrying transient failures with exponential
    /// backoff. Returns the public URL of the stored object.
    pub async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let mut last_err = String::new();

        for attempt in 0..MAX_PUT_ATTEMPTS {
            if attempt > 0 {
                let backoff = RETRY_BASE_BACKOFF_MS * (1 << attempt);
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }

            match self
                .client
                .put_object()
                .bucket(&self.bucket)
                .key(key)
                .content_type(content_type)
                .body(ByteStream::from(bytes.clone()))
                .send()
                .await
            {
                Ok(_) => return Ok(self.url_for(key)),
                Err(e) => {
                    last_err = e.to_string();
                    tracing::warn!(key, attempt, "object upload failed: {}", last_err);
                }
            }
        }

        Err(AppError::Storage(format!(
            "upload of {key} failed after {MAX_PUT_ATTEMPTS} attempts: {last_err}"
        )))
    }

    /// Delete an object. Deleting a key that no longer exists succeeds.
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("delete of {key} failed: {e}")))?;

        Ok(())
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    /// Recover the object key from a stored public URL.
    pub fn key_from_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(self.public_base_url.as_str())
            .map(|rest| rest.trim_start_matches('/').to_string())
            .filter(|key| !key.is_empty())
    }
}

/// Fresh object key under a kind prefix (`videos/`, `thumbnails/`).
pub fn media_key(prefix: &str, extension: &str) -> String {
    format!("{}/{}.{}", prefix, Uuid::new_v4(), extension)
}

/// File extension for the media content types the API accepts.
pub fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/jpeg" | "image/jpg" => "jpg",
        "video/webm" => "webm",
        _ => "mp4",
    }
}

/// Compensating-action guard for multi-asset requests: keys uploaded so far
/// are tracked and deleted if a later step of the same request fails.
#[derive(Debug, Default)]
pub struct UploadRollback {
    keys: Vec<String>,
}

impl UploadRollback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, key: String) {
        self.keys.push(key);
    }

    /// The request succeeded; keep the uploaded objects.
    pub fn disarm(&mut self) {
        self.keys.clear();
    }

    pub fn tracked(&self) -> &[String] {
        &self.keys
    }

    /// Delete everything uploaded so far. Cleanup failures are logged, not
    /// propagated: the original error is the one the client should see.
    pub async fn abort(mut self, storage: &ObjectStorage) {
        for key in self.keys.drain(..) {
            if let Err(e) = storage.delete(&key).await {
                tracing::warn!(key, "rollback delete failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_keys_are_unique_and_prefixed() {
        let a = media_key("videos", "mp4");
        let b = media_key("videos", "mp4");
        assert_ne!(a, b);
        assert!(a.starts_with("videos/"));
        assert!(a.ends_with(".mp4"));
    }

    #[test]
    fn extension_mapping() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("video/webm"), "webm");
        assert_eq!(extension_for("application/octet-stream"), "mp4");
    }

    #[test]
    fn rollback_tracks_until_disarmed() {
        let mut guard = UploadRollback::new();
        guard.track("videos/a.mp4".to_string());
        guard.track("thumbnails/b.jpg".to_string());
        assert_eq!(guard.tracked().len(), 2);

        guard.disarm();
        assert!(guard.tracked().is_empty());
    }
}
