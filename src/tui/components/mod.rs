//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields and are rebuilt
//! every frame:
//! - `TitleBar`: Top status bar (source, breadcrumb, status, toast)
//! - `CourseListView`: The entry screen
//! - `CourseOverviewView`: One course and its lessons
//! - `StatusView`: Loading spinner and not-found message
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `LessonView`: Scrollable module stack. Its `LessonViewState` persists in
//!   `TuiState` and handles scroll events.
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, not by reaching into `App`:
//!
//! ```rust,ignore
//! // Dependencies are explicit
//! CourseOverviewView { view, has_next }.render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs        (Top status bar)
//! ├── course_list.rs      (Course list screen)
//! ├── course_overview.rs  (Course overview screen)
//! ├── lesson_view.rs      (Lesson screen + scroll state)
//! └── status_view.rs      (Loading / not found)
//! ```

pub mod course_list;
pub mod course_overview;
pub mod lesson_view;
pub mod status_view;
mod title_bar;

pub use course_list::CourseListView;
pub use course_overview::CourseOverviewView;
pub use lesson_view::{LessonView, LessonViewState};
pub use status_view::StatusView;
pub use title_bar::TitleBar;
