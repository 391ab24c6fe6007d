//! # Application State
//!
//! Everything the running app knows, in one place:
//!
//! ```text
//! App
//! ├── markdown: Arc<dyn MarkdownRenderer>  // injected renderer
//! ├── source_name: String                 // content source, for the title bar
//! ├── history: Vec<Route>                 // back stack, top = current
//! ├── screen: Screen                      // controller of the current route
//! ├── screen_id: ScreenId                 // identity of that screen instance
//! ├── code_language: Language            // language new snippets open on
//! ├── toast: Option<Toast>                // transient confirmation
//! └── status_message: String              // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::course_list::CourseListController;
use crate::core::language::Language;
use crate::core::lesson::LessonController;
use crate::core::overview::CourseOverviewController;
use crate::core::route::{Route, ScreenId};
use crate::core::services::MarkdownRenderer;

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// The controller of the active screen.
pub enum Screen {
    Courses(CourseListController),
    Overview(CourseOverviewController),
    Lesson(LessonController),
}

impl Screen {
    /// A fresh screen, in its loading state, for `route`.
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Courses => Screen::Courses(CourseListController::new()),
            Route::CourseOverview { course_slug } => {
                Screen::Overview(CourseOverviewController::new(course_slug.clone()))
            }
            Route::Lesson {
                course_slug,
                lesson_slug,
            } => Screen::Lesson(LessonController::new(
                course_slug.clone(),
                lesson_slug.clone(),
            )),
        }
    }

    pub fn is_loading(&self) -> bool {
        match self {
            Screen::Courses(c) => c.state().is_loading(),
            Screen::Overview(c) => c.state().is_loading(),
            Screen::Lesson(c) => c.state().is_loading(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
}

pub struct App {
    pub markdown: Arc<dyn MarkdownRenderer>,
    pub source_name: String,
    pub history: Vec<Route>,
    pub screen: Screen,
    pub screen_id: ScreenId,
    pub code_language: Language,
    pub toast: Option<Toast>,
    pub status_message: String,
}

impl App {
    pub fn new(markdown: Arc<dyn MarkdownRenderer>, source_name: impl Into<String>) -> Self {
        Self {
            markdown,
            source_name: source_name.into(),
            history: Vec::new(),
            screen: Screen::Courses(CourseListController::new()),
            screen_id: ScreenId::default(),
            code_language: Language::default(),
            toast: None,
            status_message: String::new(),
        }
    }

    /// The route currently shown.
    pub fn route(&self) -> Option<&Route> {
        self.history.last()
    }

    /// Replace the active screen with a fresh instance for `route`.
    /// Returns the id of the new screen.
    pub(crate) fn enter(&mut self, route: &Route) -> ScreenId {
        self.screen_id = self.screen_id.next();
        self.screen = Screen::for_route(route);
        self.status_message = String::from("Loading...");
        self.screen_id
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    /// Toast text if one is showing at `now`.
    pub fn active_toast(&self, now: Instant) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|t| now.duration_since(t.shown_at) < TOAST_DURATION)
            .map(|t| t.message.as_str())
    }

    /// Drop an expired toast. Returns true if one was removed.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self.toast.is_some() && self.active_toast(now).is_none() {
            self.toast = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn new_app_has_no_route() {
        let app = test_app();
        assert!(app.route().is_none());
        assert!(app.toast.is_none());
    }

    #[test]
    fn enter_mints_new_screen_ids() {
        let mut app = test_app();
        let first = app.enter(&Route::overview("a"));
        let second = app.enter(&Route::lesson("a", "b"));
        assert_ne!(first, second);
        assert_eq!(app.screen_id, second);
        assert!(matches!(app.screen, Screen::Lesson(_)));
        assert!(app.screen.is_loading());
    }

    #[test]
    fn toast_expires() {
        let mut app = test_app();
        app.show_toast("copied");
        let shown = app.toast.as_ref().unwrap().shown_at;

        assert_eq!(app.active_toast(shown), Some("copied"));
        assert!(!app.expire_toast(shown));

        let later = shown + TOAST_DURATION + Duration::from_millis(1);
        assert_eq!(app.active_toast(later), None);
        assert!(app.expire_toast(later));
        assert!(app.toast.is_none());
    }
}
