//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use ratatui::text::Text;

use crate::content::{
    CodeSnippet, CopyModule, Course, ImageModule, Lesson, LessonModule,
};
use crate::core::services::MarkdownRenderer;
use crate::core::state::App;

/// A renderer that keeps markdown source as-is, so tests can compare text.
pub struct PlainMarkdown;

impl MarkdownRenderer for PlainMarkdown {
    fn parse(&self, text: &str) -> Text<'static> {
        Text::raw(text.to_string())
    }
}

/// Flattens styled text back into a plain string, one line per `\n`.
pub fn text_of(text: &Text) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A snippet whose source in each language names that language.
pub fn sample_snippet() -> CodeSnippet {
    CodeSnippet {
        title: Some("Fetch an entry".to_string()),
        curl: "curl()".to_string(),
        dot_net: "dotnet()".to_string(),
        javascript: "javascript()".to_string(),
        java: "java()".to_string(),
        java_android: "android()".to_string(),
        php: "php()".to_string(),
        python: "python()".to_string(),
        ruby: "ruby()".to_string(),
        swift: "swift()".to_string(),
    }
}

/// A course with `lessons` lessons named `lesson-{i}`, each holding a copy,
/// a code and an image module in that order.
pub fn sample_course(slug: &str, lessons: usize) -> Course {
    Course {
        slug: slug.to_string(),
        title: format!("Course {slug}"),
        short_description: Some(format!("Short description of {slug}")),
        description: format!("Everything about *{slug}*."),
        duration: 25,
        skill_level: "beginner".to_string(),
        lessons: (0..lessons)
            .map(|i| Lesson {
                slug: format!("lesson-{i}"),
                title: format!("Lesson title {i}"),
                modules: vec![
                    LessonModule::Copy(CopyModule {
                        title: None,
                        copy: format!("Body of lesson {i}"),
                    }),
                    LessonModule::CodeSnippet(sample_snippet()),
                    LessonModule::Image(ImageModule {
                        title: Some(format!("Diagram {i}")),
                        url: format!("https://example.com/lesson-{i}.png"),
                        caption: "A diagram".to_string(),
                    }),
                ],
            })
            .collect(),
        updated_at: None,
    }
}

/// Creates a test App with a [`PlainMarkdown`] renderer.
pub fn test_app() -> App {
    App::new(Arc::new(PlainMarkdown), "test")
}
