/// HTTP layer
///
/// Handlers parse the request (path, query, body, multipart), pull the
/// acting user out of the bearer token where required, and delegate to the
/// service layer. All success bodies go through the shared envelope.
pub mod comments;
pub mod dashboard;
pub mod health;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod videos;
