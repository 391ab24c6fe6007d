//! # Actions
//!
//! Everything that can happen in TEA becomes an `Action`.
//! User presses Enter? That's `Action::Activate`.
//! A fetch finishes? That's `Action::CourseLoaded { screen, result }`.
//!
//! The `update()` function applies an action to the state and returns the
//! effects the adapter must perform. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Vec<Effect>
//! ```
//!
//! Async results carry the `ScreenId` of the screen that requested them. If
//! that screen is gone, the result is dropped.

use log::{debug, info};

use crate::content::{ContentError, Course, CourseSummary, ImageInfo};
use crate::core::lesson::LessonController;
use crate::core::route::{Route, ScreenId};
use crate::core::services::{ClipboardEntry, Outbox};
use crate::core::state::{App, Screen};

#[derive(Debug)]
pub enum Action {
    /// Open a new screen on top of the history.
    Navigate(Route),
    /// Return to the previous screen. Quits from the first one.
    Back,
    Quit,

    CursorUp,
    CursorDown,
    /// Enter: open the selected entry, or copy the focused code module.
    Activate,
    NextLesson,
    CycleLanguage {
        forward: bool,
    },
    CopySource,

    CoursesLoaded {
        screen: ScreenId,
        result: Result<Vec<CourseSummary>, ContentError>,
    },
    CourseLoaded {
        screen: ScreenId,
        result: Result<Course, ContentError>,
    },
    ImageLoaded {
        screen: ScreenId,
        module: usize,
        result: Result<ImageInfo, ContentError>,
    },
}

/// I/O the adapter performs on behalf of `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Quit,
    /// Abort in-flight work of the previous screen.
    CancelPending,
    FetchCourses {
        screen: ScreenId,
    },
    FetchCourse {
        screen: ScreenId,
        slug: String,
    },
    LoadImage {
        screen: ScreenId,
        module: usize,
        url: String,
    },
    CopyToClipboard(ClipboardEntry),
}

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    match action {
        Action::Navigate(route) => navigate(app, route),
        Action::Back => back(app),
        Action::Quit => vec![Effect::Quit],

        Action::CursorUp => {
            match &mut app.screen {
                Screen::Courses(c) => c.select_prev(),
                Screen::Overview(c) => c.select_prev(),
                Screen::Lesson(c) => c.focus_prev(),
            }
            Vec::new()
        }
        Action::CursorDown => {
            match &mut app.screen {
                Screen::Courses(c) => c.select_next(),
                Screen::Overview(c) => c.select_next(),
                Screen::Lesson(c) => c.focus_next(),
            }
            Vec::new()
        }
        Action::Activate => {
            let mut outbox = Outbox::new();
            match &app.screen {
                Screen::Courses(c) => c.open_selected(&mut outbox),
                Screen::Overview(c) => c.open_selected(&mut outbox),
                Screen::Lesson(c) => copy_focused(c, &mut outbox),
            }
            apply_outbox(app, outbox)
        }
        Action::NextLesson => {
            let mut outbox = Outbox::new();
            match &app.screen {
                Screen::Overview(c) => c.next(&mut outbox),
                Screen::Lesson(c) => c.next(&mut outbox),
                Screen::Courses(_) => {}
            }
            apply_outbox(app, outbox)
        }
        Action::CycleLanguage { forward } => {
            if let Screen::Lesson(c) = &mut app.screen {
                c.cycle_language(forward);
            }
            Vec::new()
        }
        Action::CopySource => {
            let mut outbox = Outbox::new();
            if let Screen::Lesson(c) = &app.screen {
                copy_focused(c, &mut outbox);
            }
            apply_outbox(app, outbox)
        }

        Action::CoursesLoaded { screen, result } => {
            if !is_current(app, screen) {
                return Vec::new();
            }
            if let Screen::Courses(c) = &mut app.screen {
                match result {
                    Ok(courses) => c.on_courses_loaded(courses),
                    Err(e) => c.on_not_found(&e),
                }
            }
            app.status_message.clear();
            Vec::new()
        }
        Action::CourseLoaded { screen, result } => {
            if !is_current(app, screen) {
                return Vec::new();
            }
            let markdown = app.markdown.clone();
            let language = app.code_language;
            let effects = match (&mut app.screen, result) {
                (Screen::Overview(c), Ok(course)) => {
                    c.on_course_loaded(course, markdown.as_ref());
                    Vec::new()
                }
                (Screen::Overview(c), Err(e)) => {
                    c.on_not_found(&e);
                    Vec::new()
                }
                (Screen::Lesson(c), Ok(course)) => c
                    .on_course_loaded(course, markdown.as_ref(), language)
                    .into_iter()
                    .map(|req| Effect::LoadImage {
                        screen,
                        module: req.module,
                        url: req.url,
                    })
                    .collect(),
                (Screen::Lesson(c), Err(e)) => {
                    c.on_not_found(&e);
                    Vec::new()
                }
                (Screen::Courses(_), _) => Vec::new(),
            };
            app.status_message.clear();
            effects
        }
        Action::ImageLoaded {
            screen,
            module,
            result,
        } => {
            if is_current(app, screen)
                && let Screen::Lesson(c) = &mut app.screen
            {
                c.on_image_loaded(module, result);
            }
            Vec::new()
        }
    }
}

/// Whether an async result belongs to the screen that is showing now.
fn is_current(app: &App, screen: ScreenId) -> bool {
    if app.screen_id != screen {
        debug!(
            "Dropping late result for screen {:?} (current {:?})",
            screen, app.screen_id
        );
        return false;
    }
    true
}

fn navigate(app: &mut App, route: Route) -> Vec<Effect> {
    info!("Navigate to {}", route);
    app.history.push(route.clone());
    enter(app, &route)
}

fn back(app: &mut App) -> Vec<Effect> {
    app.history.pop();
    match app.history.last().cloned() {
        Some(route) => {
            info!("Back to {}", route);
            enter(app, &route)
        }
        None => vec![Effect::Quit],
    }
}

/// Create a fresh screen for `route` and issue its single fetch.
fn enter(app: &mut App, route: &Route) -> Vec<Effect> {
    let screen = app.enter(route);
    let fetch = match route {
        Route::Courses => Effect::FetchCourses { screen },
        Route::CourseOverview { course_slug } | Route::Lesson { course_slug, .. } => {
            Effect::FetchCourse {
                screen,
                slug: course_slug.clone(),
            }
        }
    };
    vec![Effect::CancelPending, fetch]
}

fn copy_focused(lesson: &LessonController, outbox: &mut Outbox) {
    let mut notifier = Outbox::new();
    lesson.copy_focused(outbox, &mut notifier);
    outbox.toasts.append(&mut notifier.toasts);
}

/// Turn the requests a controller made into state changes and effects.
fn apply_outbox(app: &mut App, outbox: Outbox) -> Vec<Effect> {
    let mut effects: Vec<Effect> = outbox
        .clipboard
        .into_iter()
        .map(Effect::CopyToClipboard)
        .collect();
    for message in outbox.toasts {
        app.show_toast(message);
    }
    for route in outbox.routes {
        effects.extend(navigate(app, route));
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::language::Language;
    use crate::core::lesson::{ModuleView, SOURCE_COPIED};
    use crate::core::route::ScreenState;
    use crate::test_support::{sample_course, test_app};

    fn fetch_count(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::FetchCourse { .. } | Effect::FetchCourses { .. }))
            .count()
    }

    /// Navigate to the overview and deliver the course.
    fn overview_app(lessons: usize) -> App {
        let mut app = test_app();
        update(&mut app, Action::Navigate(Route::overview("course")));
        let screen = app.screen_id;
        update(
            &mut app,
            Action::CourseLoaded {
                screen,
                result: Ok(sample_course("course", lessons)),
            },
        );
        app
    }

    #[test]
    fn test_navigate_issues_exactly_one_fetch() {
        let mut app = test_app();
        let effects = update(&mut app, Action::Navigate(Route::overview("course")));
        assert_eq!(fetch_count(&effects), 1);
        assert_eq!(
            effects,
            vec![
                Effect::CancelPending,
                Effect::FetchCourse {
                    screen: app.screen_id,
                    slug: "course".to_string()
                }
            ]
        );
        assert_eq!(app.route(), Some(&Route::overview("course")));
    }

    #[test]
    fn test_courses_route_fetches_course_list() {
        let mut app = test_app();
        let effects = update(&mut app, Action::Navigate(Route::Courses));
        assert_eq!(
            effects,
            vec![
                Effect::CancelPending,
                Effect::FetchCourses {
                    screen: app.screen_id
                }
            ]
        );
    }

    #[test]
    fn test_overview_next_opens_first_lesson() {
        let mut app = overview_app(3);
        let effects = update(&mut app, Action::NextLesson);
        assert_eq!(app.route(), Some(&Route::lesson("course", "lesson-0")));
        assert_eq!(fetch_count(&effects), 1);
        assert!(matches!(app.screen, Screen::Lesson(_)));
    }

    #[test]
    fn test_overview_next_without_lessons_stays() {
        let mut app = overview_app(0);
        let effects = update(&mut app, Action::NextLesson);
        assert!(effects.is_empty());
        assert_eq!(app.route(), Some(&Route::overview("course")));
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(Route::overview("course")));
        let stale = app.screen_id;
        update(&mut app, Action::Navigate(Route::overview("other")));

        let effects = update(
            &mut app,
            Action::CourseLoaded {
                screen: stale,
                result: Ok(sample_course("course", 2)),
            },
        );
        assert!(effects.is_empty());
        match &app.screen {
            Screen::Overview(c) => {
                assert_eq!(c.course_slug(), "other");
                assert!(c.state().is_loading());
            }
            _ => panic!("expected overview"),
        }
    }

    #[test]
    fn test_lesson_load_requests_images() {
        let mut app = test_app();
        update(
            &mut app,
            Action::Navigate(Route::lesson("course", "lesson-1")),
        );
        let screen = app.screen_id;
        let effects = update(
            &mut app,
            Action::CourseLoaded {
                screen,
                result: Ok(sample_course("course", 3)),
            },
        );
        assert_eq!(
            effects,
            vec![Effect::LoadImage {
                screen,
                module: 2,
                url: "https://example.com/lesson-1.png".to_string()
            }]
        );
        assert!(app.status_message.is_empty());
    }

    #[test]
    fn test_lesson_snippets_open_on_configured_language() {
        let mut app = test_app();
        app.code_language = Language::Swift;
        update(&mut app, Action::Navigate(Route::lesson("course", "lesson-0")));
        let screen = app.screen_id;
        update(
            &mut app,
            Action::CourseLoaded {
                screen,
                result: Ok(sample_course("course", 1)),
            },
        );
        let Screen::Lesson(ctrl) = &app.screen else {
            panic!("expected lesson screen");
        };
        let page = ctrl.state().rendered().unwrap();
        assert!(matches!(
            &page.modules[1],
            ModuleView::Code(code) if code.source() == "swift()"
        ));
    }

    #[test]
    fn test_lesson_not_found_from_fetch_error() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(Route::lesson("gone", "x")));
        let screen = app.screen_id;
        update(
            &mut app,
            Action::CourseLoaded {
                screen,
                result: Err(ContentError::NotFound("Course \"gone\"".to_string())),
            },
        );
        match &app.screen {
            Screen::Lesson(c) => assert_eq!(
                c.state(),
                &ScreenState::NotFound("Course \"gone\" not found.".to_string())
            ),
            _ => panic!("expected lesson"),
        }
    }

    #[test]
    fn test_copy_source_emits_clipboard_effect_and_toast() {
        let mut app = test_app();
        update(
            &mut app,
            Action::Navigate(Route::lesson("course", "lesson-0")),
        );
        let screen = app.screen_id;
        update(
            &mut app,
            Action::CourseLoaded {
                screen,
                result: Ok(sample_course("course", 1)),
            },
        );
        update(&mut app, Action::CursorDown);
        update(&mut app, Action::CycleLanguage { forward: false });

        let effects = update(&mut app, Action::Activate);
        assert_eq!(
            effects,
            vec![Effect::CopyToClipboard(ClipboardEntry {
                label: "java".to_string(),
                text: "java()".to_string()
            })]
        );
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some(SOURCE_COPIED)
        );
    }

    #[test]
    fn test_copy_on_non_code_module_does_nothing() {
        let mut app = test_app();
        update(
            &mut app,
            Action::Navigate(Route::lesson("course", "lesson-0")),
        );
        let screen = app.screen_id;
        update(
            &mut app,
            Action::CourseLoaded {
                screen,
                result: Ok(sample_course("course", 1)),
            },
        );
        assert!(update(&mut app, Action::CopySource).is_empty());
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_back_recreates_previous_screen() {
        let mut app = overview_app(2);
        update(&mut app, Action::Activate);
        assert_eq!(app.history.len(), 2);

        let effects = update(&mut app, Action::Back);
        assert_eq!(app.route(), Some(&Route::overview("course")));
        assert_eq!(fetch_count(&effects), 1);
        assert!(app.screen.is_loading());
    }

    #[test]
    fn test_back_from_root_quits() {
        let mut app = overview_app(1);
        assert_eq!(update(&mut app, Action::Back), vec![Effect::Quit]);
    }

    #[test]
    fn test_image_result_for_old_screen_dropped() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(Route::overview("course")));
        update(
            &mut app,
            Action::Navigate(Route::lesson("course", "lesson-0")),
        );
        let screen = app.screen_id;
        update(
            &mut app,
            Action::CourseLoaded {
                screen,
                result: Ok(sample_course("course", 1)),
            },
        );
        update(&mut app, Action::Back);
        update(
            &mut app,
            Action::ImageLoaded {
                screen,
                module: 2,
                result: Err(ContentError::Network("late".to_string())),
            },
        );
        assert!(matches!(app.screen, Screen::Overview(_)));
        assert!(app.screen.is_loading());
    }
}
