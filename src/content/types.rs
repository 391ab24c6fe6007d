//! # Content Model
//!
//! Courses as delivered by a content source. Everything here is plain data:
//! fetched once per screen visit, never mutated afterwards.
//!
//! ```text
//! Course
//! ├── slug, title, description, duration, skill_level
//! └── lessons: Vec<Lesson>          // ordered
//!     └── modules: Vec<LessonModule> // ordered, render order
//!         ├── CodeSnippet  (one source per Language)
//!         ├── Image        (url + caption)
//!         └── Copy         (markdown body)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::language::Language;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub skill_level: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Course {
    /// Position of the lesson with the given slug.
    pub fn lesson_index(&self, lesson_slug: &str) -> Option<usize> {
        self.lessons.iter().position(|l| l.slug == lesson_slug)
    }

    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            short_description: self.short_description.clone(),
            lesson_count: self.lessons.len(),
            updated_at: self.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Lesson {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub modules: Vec<LessonModule>,
}

/// One renderable unit of lesson content.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LessonModule {
    CodeSnippet(CodeSnippet),
    Image(ImageModule),
    Copy(CopyModule),
}

/// Source code for the same snippet in every supported language.
/// Missing languages deserialize as empty strings.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeSnippet {
    pub title: Option<String>,
    pub curl: String,
    pub dot_net: String,
    pub javascript: String,
    pub java: String,
    pub java_android: String,
    pub php: String,
    pub python: String,
    pub ruby: String,
    pub swift: String,
}

impl CodeSnippet {
    pub fn source(&self, language: Language) -> &str {
        match language {
            Language::Curl => &self.curl,
            Language::DotNet => &self.dot_net,
            Language::JavaScript => &self.javascript,
            Language::Java => &self.java,
            Language::JavaAndroid => &self.java_android,
            Language::Php => &self.php,
            Language::Python => &self.python,
            Language::Ruby => &self.ruby,
            Language::Swift => &self.swift,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ImageModule {
    pub title: Option<String>,
    pub url: String,
    pub caption: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CopyModule {
    pub title: Option<String>,
    pub copy: String,
}

/// What the course list needs to know about a course.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CourseSummary {
    pub slug: String,
    pub title: String,
    pub short_description: Option<String>,
    pub lesson_count: usize,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Result of probing an image URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub url: String,
    pub content_type: Option<String>,
    pub bytes: usize,
}
