use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::route::ScreenState;
use crate::core::state::{App, Screen};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    CourseListView, CourseOverviewView, LessonView, LessonViewState, StatusView, TitleBar,
};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    // Presentation state belongs to one screen instance
    if tui.screen_id != app.screen_id {
        tui.lesson = LessonViewState::new();
        tui.screen_id = app.screen_id;
    }

    let mut title_bar = TitleBar::new(
        app.source_name.clone(),
        app.route().map(ToString::to_string).unwrap_or_default(),
        app.status_message.clone(),
        app.active_toast(Instant::now()).map(str::to_string),
    );
    title_bar.render(frame, title_area);

    match &app.screen {
        Screen::Courses(ctrl) => match ctrl.state() {
            ScreenState::Rendered(list) => CourseListView { list }.render(frame, main_area),
            state => draw_status(frame, main_area, state, spinner_frame),
        },
        Screen::Overview(ctrl) => match ctrl.state() {
            ScreenState::Rendered(view) => CourseOverviewView {
                view,
                has_next: ctrl.next_lesson_slug().is_some(),
            }
            .render(frame, main_area),
            state => draw_status(frame, main_area, state, spinner_frame),
        },
        Screen::Lesson(ctrl) => match ctrl.state() {
            ScreenState::Rendered(page) => LessonView {
                page,
                state: &mut tui.lesson,
            }
            .render(frame, main_area),
            state => draw_status(frame, main_area, state, spinner_frame),
        },
    }
}

fn draw_status<T>(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    state: &ScreenState<T>,
    spinner_frame: usize,
) {
    let mut view = match state {
        ScreenState::NotFound(message) => StatusView::NotFound { message },
        _ => StatusView::Loading { spinner_frame },
    };
    view.render(frame, area);
}
