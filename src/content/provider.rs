use std::fmt;

use async_trait::async_trait;

use super::types::{Course, CourseSummary, ImageInfo};

/// Errors that can occur while fetching content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentError {
    /// Source misconfigured (missing access token, unreadable file). Fatal at start-up.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The content API returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the source's response.
    Parse(String),
    /// The requested course (or lesson) does not exist.
    NotFound(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Config(msg) => write!(f, "config error: {msg}"),
            ContentError::Network(msg) => write!(f, "network error: {msg}"),
            ContentError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ContentError::Parse(msg) => write!(f, "parse error: {msg}"),
            ContentError::NotFound(what) => write!(f, "{what} not found."),
        }
    }
}

impl std::error::Error for ContentError {}

/// A source of course content.
///
/// Every call resolves exactly once: `Ok` is the success path, `Err` with
/// [`ContentError::NotFound`] the not-found path.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Short human-readable name, shown in the title bar.
    fn name(&self) -> &str;

    /// Fetch a fully populated course by its slug.
    async fn fetch_course_by_slug(&self, slug: &str) -> Result<Course, ContentError>;

    /// Fetch summaries of every available course.
    async fn fetch_courses(&self) -> Result<Vec<CourseSummary>, ContentError>;
}

/// Loads images referenced by lesson modules.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<ImageInfo, ContentError>;
}
