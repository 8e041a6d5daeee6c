/// Business logic layer
///
/// Each service owns the precondition checks (existence, ownership,
/// validation) for its resource, the toggle orchestration, and the view
/// assembly that joins owner cards onto list rows. Handlers stay thin.
pub mod comments;
pub mod dashboard;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod videos;

pub use comments::CommentService;
pub use dashboard::DashboardService;
pub use likes::LikeService;
pub use playlists::PlaylistService;
pub use subscriptions::SubscriptionService;
pub use tweets::TweetService;
pub use videos::VideoService;

/// Shared validation for user-authored text: required, and whitespace-only
/// input counts as empty.
pub(crate) fn require_content(content: &str, what: &str) -> crate::Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(crate::AppError::BadRequest(format!(
            "{what} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;

    #[test]
    fn content_is_trimmed_and_required() {
        assert_eq!(require_content("  hello  ", "content").unwrap(), "hello");
        assert!(matches!(
            require_content("   ", "content"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            require_content("", "content"),
            Err(AppError::BadRequest(_))
        ));
    }
}
