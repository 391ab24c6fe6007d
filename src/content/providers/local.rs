//! Local content source: a JSON file of courses, read once at start-up.
//!
//! ```json
//! { "courses": [ { "slug": "...", "title": "...", "lessons": [ ... ] } ] }
//! ```

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use log::info;
use serde::Deserialize;

use crate::content::{ContentError, ContentProvider, Course, CourseSummary};

#[derive(Deserialize)]
struct ContentFile {
    #[serde(default)]
    courses: Vec<Course>,
}

pub struct LocalProvider {
    courses: Vec<Course>,
}

impl LocalProvider {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Parse a content file from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let file: ContentFile =
            serde_json::from_str(json).map_err(|e| ContentError::Parse(e.to_string()))?;
        Ok(Self::new(file.courses))
    }

    /// Load a content file from disk. An unreadable file is a config error.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let json = fs::read_to_string(path)
            .map_err(|e| ContentError::Config(format!("{}: {e}", path.display())))?;
        let provider = Self::from_json(&json)?;
        info!(
            "Loaded {} courses from {}",
            provider.courses.len(),
            path.display()
        );
        Ok(provider)
    }
}

#[async_trait]
impl ContentProvider for LocalProvider {
    fn name(&self) -> &str {
        "local"
    }

    async fn fetch_course_by_slug(&self, slug: &str) -> Result<Course, ContentError> {
        self.courses
            .iter()
            .find(|c| c.slug == slug)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(format!("Course \"{slug}\"")))
    }

    async fn fetch_courses(&self) -> Result<Vec<CourseSummary>, ContentError> {
        Ok(self.courses.iter().map(Course::summary).collect())
    }
}
