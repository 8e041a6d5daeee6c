/// Configuration management
///
/// Loads configuration from environment variables with development defaults.
/// Production deployments must provide real values for the guarded settings.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Bearer-token validation settings. Token issuance happens in the external
/// identity service; this API only validates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Object storage (S3 or S3-compatible) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible stores (MinIO etc.)
    pub endpoint: Option<String>,
    /// Base URL media URLs are composed from
    pub public_base_url: String,
    pub max_video_upload_bytes: usize,
    pub max_image_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(value) => value,
            Err(_) if production => {
                return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
            }
            Err(_) => "http://localhost:3000".to_string(),
        };
        if production && allowed_origins.trim() == "*" {
            return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
        }

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(value) if !value.trim().is_empty() => value,
            Ok(_) | Err(_) if production => {
                return Err("JWT_SECRET must be set in production".to_string())
            }
            _ => "vidshare-dev-secret".to_string(),
        };

        let bucket = std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "vidshare-media".to_string());
        let region = std::env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let endpoint = std::env::var("STORAGE_ENDPOINT").ok().filter(|e| !e.is_empty());
        let public_base_url = std::env::var("STORAGE_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("https://{bucket}.s3.{region}.amazonaws.com"));

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("VIDSHARE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env_parse("VIDSHARE_PORT", 8080),
            },
            cors: CorsConfig { allowed_origins },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/vidshare".to_string()),
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 10),
            },
            auth: AuthConfig { jwt_secret },
            storage: StorageConfig {
                bucket,
                region,
                endpoint,
                public_base_url,
                max_video_upload_bytes: env_parse("MAX_VIDEO_UPLOAD_BYTES", 200 * 1024 * 1024),
                max_image_upload_bytes: env_parse("MAX_IMAGE_UPLOAD_BYTES", 5 * 1024 * 1024),
            },
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_parse_falls_back_on_missing_or_garbage() {
        assert_eq!(env_parse("VIDSHARE_TEST_UNSET_KEY", 42u32), 42);

        std::env::set_var("VIDSHARE_TEST_GARBAGE_KEY", "not-a-number");
        assert_eq!(env_parse("VIDSHARE_TEST_GARBAGE_KEY", 7u16), 7);
        std::env::remove_var("VIDSHARE_TEST_GARBAGE_KEY");
    }

    #[test]
    fn development_defaults_load_without_env() {
        // from_env only hard-fails in production mode
        let cfg = Config::from_env().expect("dev config should load");
        assert_eq!(cfg.app.env, "development");
        assert!(!cfg.auth.jwt_secret.is_empty());
        assert!(cfg.storage.public_base_url.starts_with("https://"));
    }
}
