//! # Course List Screen
//!
//! Entry point when no course is given on the command line.

use log::info;

use crate::content::{ContentError, CourseSummary};
use crate::core::route::{Route, ScreenState};
use crate::core::services::Navigator;

#[derive(Debug, Clone, PartialEq)]
pub struct CourseList {
    pub courses: Vec<CourseSummary>,
    pub selected: usize,
}

#[derive(Default)]
pub struct CourseListController {
    state: ScreenState<CourseList>,
}

impl CourseListController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ScreenState<CourseList> {
        &self.state
    }

    pub fn on_courses_loaded(&mut self, courses: Vec<CourseSummary>) {
        info!("Course list rendered ({} courses)", courses.len());
        self.state = ScreenState::Rendered(CourseList {
            courses,
            selected: 0,
        });
    }

    pub fn on_not_found(&mut self, error: &ContentError) {
        info!("Course list unavailable: {}", error);
        self.state = ScreenState::NotFound(error.to_string());
    }

    pub fn open_selected(&self, nav: &mut dyn Navigator) {
        if let Some(course) = self
            .state
            .rendered()
            .and_then(|list| list.courses.get(list.selected))
        {
            nav.navigate(Route::overview(&course.slug));
        }
    }

    pub fn select_next(&mut self) {
        if let Some(list) = self.state.rendered_mut()
            && !list.courses.is_empty()
        {
            list.selected = (list.selected + 1).min(list.courses.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(list) = self.state.rendered_mut() {
            list.selected = list.selected.saturating_sub(1);
        }
    }
}
