/// Vidshare API
///
/// Backend for a video-sharing platform: videos, comments, tweets, likes,
/// playlists, subscriptions and channel dashboards.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Entities and denormalized view models
/// - `services`: Business logic layer (view assembly, toggles, ownership gates)
/// - `db`: Database access layer and repositories
/// - `storage`: Object storage client for media assets
/// - `auth`: Bearer-token request extractor
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod response;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};
