//! # Course Overview Screen
//!
//! Shows one course: title, description, duration/skill level, and the list
//! of lessons. Every lesson entry navigates to its lesson; the "next" control
//! starts the course at the first lesson.

use log::{debug, info};
use ratatui::text::Text;

use crate::content::{ContentError, Course};
use crate::core::route::{Route, ScreenState};
use crate::core::services::{MarkdownRenderer, Navigator};

/// Markdown shown under the course description.
pub fn duration_label(duration: u32, skill_level: &str) -> String {
    format!("**Duration:** {duration} min | **Skill level:** {skill_level}")
}

/// Subtitle of the lesson entry at `index` (zero-based).
pub fn lesson_number_label(index: usize) -> String {
    format!("Lesson {}", index + 1)
}

/// One row in the lesson list.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonEntry {
    pub slug: String,
    pub title: Text<'static>,
    pub subtitle: Text<'static>,
}

/// Rendered view state of the overview screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseOverview {
    pub title: Text<'static>,
    pub description: Text<'static>,
    pub duration: Text<'static>,
    pub lessons: Vec<LessonEntry>,
    /// Index of the highlighted lesson entry.
    pub selected: usize,
}

pub struct CourseOverviewController {
    course_slug: String,
    first_lesson_slug: Option<String>,
    state: ScreenState<CourseOverview>,
}

impl CourseOverviewController {
    pub fn new(course_slug: impl Into<String>) -> Self {
        Self {
            course_slug: course_slug.into(),
            first_lesson_slug: None,
            state: ScreenState::Loading,
        }
    }

    pub fn course_slug(&self) -> &str {
        &self.course_slug
    }

    pub fn state(&self) -> &ScreenState<CourseOverview> {
        &self.state
    }

    /// Target of the "next" control: the first lesson, if there is one.
    pub fn next_lesson_slug(&self) -> Option<&str> {
        self.first_lesson_slug.as_deref()
    }

    /// Project a fetched course into view state.
    pub fn on_course_loaded(&mut self, course: Course, markdown: &dyn MarkdownRenderer) {
        info!(
            "Overview rendered: {} ({} lessons)",
            course.slug,
            course.lessons.len()
        );
        self.first_lesson_slug = course.lessons.first().map(|l| l.slug.clone());

        let lessons = course
            .lessons
            .iter()
            .enumerate()
            .map(|(index, lesson)| LessonEntry {
                slug: lesson.slug.clone(),
                title: markdown.parse(&lesson.title),
                subtitle: markdown.parse(&lesson_number_label(index)),
            })
            .collect();

        self.state = ScreenState::Rendered(CourseOverview {
            title: markdown.parse(&course.title),
            description: markdown.parse(&course.description),
            duration: markdown.parse(&duration_label(course.duration, &course.skill_level)),
            lessons,
            selected: 0,
        });
    }

    pub fn on_not_found(&mut self, error: &ContentError) {
        info!("Overview for {} unavailable: {}", self.course_slug, error);
        self.first_lesson_slug = None;
        self.state = ScreenState::NotFound(error.to_string());
    }

    /// Navigate to the lesson entry at `index`. Out-of-range indices do nothing.
    pub fn open_lesson(&self, index: usize, nav: &mut dyn Navigator) {
        let Some(entry) = self.state.rendered().and_then(|v| v.lessons.get(index)) else {
            debug!("No lesson entry at {}", index);
            return;
        };
        nav.navigate(Route::lesson(&self.course_slug, &entry.slug));
    }

    pub fn open_selected(&self, nav: &mut dyn Navigator) {
        if let Some(view) = self.state.rendered() {
            self.open_lesson(view.selected, nav);
        }
    }

    /// The "next" control. A course without lessons has no target.
    pub fn next(&self, nav: &mut dyn Navigator) {
        if let Some(slug) = &self.first_lesson_slug {
            nav.navigate(Route::lesson(&self.course_slug, slug));
        }
    }

    pub fn select_next(&mut self) {
        if let Some(view) = self.state.rendered_mut()
            && !view.lessons.is_empty()
        {
            view.selected = (view.selected + 1).min(view.lessons.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(view) = self.state.rendered_mut() {
            view.selected = view.selected.saturating_sub(1);
        }
    }
}
