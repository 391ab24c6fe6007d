//! # Content
//!
//! Everything that talks to a content source: the data model, the provider
//! traits, and the concrete providers (Contentful, local JSON, HTTP images).

pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{ContentError, ContentProvider, ImageLoader};
pub use providers::{ContentfulProvider, HttpImageLoader, LocalProvider};
pub use types::{
    CodeSnippet, CopyModule, Course, CourseSummary, ImageInfo, ImageModule, Lesson, LessonModule,
};
