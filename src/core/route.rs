//! # Routes
//!
//! Typed navigation targets. A `Route` is what the navigator receives; the
//! app turns it into a fresh screen instance.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// All courses.
    Courses,
    CourseOverview {
        course_slug: String,
    },
    Lesson {
        course_slug: String,
        lesson_slug: String,
    },
}

impl Route {
    pub fn overview(course_slug: impl Into<String>) -> Self {
        Route::CourseOverview {
            course_slug: course_slug.into(),
        }
    }

    pub fn lesson(course_slug: impl Into<String>, lesson_slug: impl Into<String>) -> Self {
        Route::Lesson {
            course_slug: course_slug.into(),
            lesson_slug: lesson_slug.into(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Courses => write!(f, "courses"),
            Route::CourseOverview { course_slug } => write!(f, "{course_slug}"),
            Route::Lesson {
                course_slug,
                lesson_slug,
            } => write!(f, "{course_slug} › {lesson_slug}"),
        }
    }
}

/// Identity of one screen instance. Every navigation mints a new id; async
/// completions carry the id of the screen that asked for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenId(pub u64);

impl ScreenId {
    pub fn next(self) -> ScreenId {
        ScreenId(self.0 + 1)
    }
}

/// Lifecycle of a screen's content.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<T> {
    Loading,
    Rendered(T),
    /// Terminal failure state; carries the message shown to the user.
    NotFound(String),
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        ScreenState::Loading
    }
}

impl<T> ScreenState<T> {
    pub fn rendered(&self) -> Option<&T> {
        match self {
            ScreenState::Rendered(view) => Some(view),
            _ => None,
        }
    }

    pub fn rendered_mut(&mut self) -> Option<&mut T> {
        match self {
            ScreenState::Rendered(view) => Some(view),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }
}
