//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values, and performs the
//! effects `update()` asks for (fetches, image loads, clipboard writes).
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading** (a screen waits for content): draws every ~80ms so the
//!   spinner turns.
//! - **Idle**: sleeps up to 500ms, only redraws on events, finished
//!   background work, or an expiring toast.
//!
//! ## Background Work
//!
//! Every fetch runs in a `tokio::spawn` task that reports back through an
//! mpsc channel as an `Action`. Their abort handles are kept until the next
//! `Effect::CancelPending`, which navigation emits before the new screen's
//! fetch. Anything that still slips through carries a stale `ScreenId` and
//! is dropped by `update()`.

mod clipboard;
mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::content::{ContentProvider, HttpImageLoader, ImageLoader};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::route::ScreenId;
use crate::core::services::Clipboard;
use crate::core::state::App;
use crate::tui::clipboard::SystemClipboard;
use crate::tui::component::EventHandler;
use crate::tui::components::LessonViewState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::markdown::TerminalMarkdown;

/// TUI-specific presentation state (not part of core screen logic)
pub struct TuiState {
    /// Scroll state of the lesson screen
    pub lesson: LessonViewState,
    /// Screen the presentation state above belongs to
    pub screen_id: ScreenId,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            lesson: LessonViewState::new(),
            screen_id: ScreenId::default(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Where effects get their collaborators from.
struct Services {
    provider: Arc<dyn ContentProvider>,
    images: Arc<dyn ImageLoader>,
    clipboard: SystemClipboard,
    tx: mpsc::Sender<Action>,
    /// Abort handles for the current screen's background work
    pending: Vec<AbortHandle>,
}

impl Services {
    /// Perform effects. Returns true when the app should quit.
    fn perform(&mut self, effects: Vec<Effect>) -> bool {
        let mut quit = false;
        for effect in effects {
            match effect {
                Effect::Quit => quit = true,
                Effect::CancelPending => {
                    if !self.pending.is_empty() {
                        debug!("Aborting {} pending tasks", self.pending.len());
                    }
                    for handle in self.pending.drain(..) {
                        handle.abort();
                    }
                }
                Effect::FetchCourses { screen } => {
                    self.pending.push(spawn_fetch_courses(
                        self.provider.clone(),
                        screen,
                        self.tx.clone(),
                    ));
                }
                Effect::FetchCourse { screen, slug } => {
                    self.pending.push(spawn_fetch_course(
                        self.provider.clone(),
                        screen,
                        slug,
                        self.tx.clone(),
                    ));
                }
                Effect::LoadImage {
                    screen,
                    module,
                    url,
                } => {
                    self.pending.push(spawn_load_image(
                        self.images.clone(),
                        screen,
                        module,
                        url,
                        self.tx.clone(),
                    ));
                }
                Effect::CopyToClipboard(entry) => self.clipboard.save(&entry.label, &entry.text),
            }
        }
        quit
    }
}

pub fn run(config: ResolvedConfig, provider: Arc<dyn ContentProvider>) -> std::io::Result<()> {
    let mut app = App::new(Arc::new(TerminalMarkdown::default()), provider.name());
    app.code_language = config.code_language;
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut services = Services {
        provider,
        images: Arc::new(HttpImageLoader::new()),
        clipboard: SystemClipboard::new(),
        tx,
        pending: Vec::new(),
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start = config.start_route();
    info!("Starting at {}", start);
    let mut should_quit = services.perform(update(&mut app, Action::Navigate(start)));

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        let animating = app.screen.is_loading();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = event.to_action() {
                debug!("Key action: {:?}", action);
                if services.perform(update(&mut app, action)) {
                    should_quit = true;
                    break;
                }
                continue;
            }
            // Scrolling is presentation-only
            if !matches!(event, TuiEvent::Resize) {
                tui.lesson.handle_event(&event);
            }
        }

        // Handle background task results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if services.perform(update(&mut app, action)) {
                should_quit = true;
            }
        }

        if app.expire_toast(Instant::now()) {
            needs_redraw = true;
        }
    }

    services.perform(vec![Effect::CancelPending]);
    ratatui::restore();
    info!("TEA shutting down");
    Ok(())
}

fn spawn_fetch_courses(
    provider: Arc<dyn ContentProvider>,
    screen: ScreenId,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Fetching course list from {}", provider.name());
    tokio::spawn(async move {
        let result = provider.fetch_courses().await;
        if let Err(e) = &result {
            warn!("Course list fetch failed: {}", e);
        }
        if tx.send(Action::CoursesLoaded { screen, result }).is_err() {
            warn!("Failed to send course list: receiver dropped");
        }
    })
    .abort_handle()
}

fn spawn_fetch_course(
    provider: Arc<dyn ContentProvider>,
    screen: ScreenId,
    slug: String,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Fetching course {} from {}", slug, provider.name());
    tokio::spawn(async move {
        let result = provider.fetch_course_by_slug(&slug).await;
        if let Err(e) = &result {
            warn!("Course {} fetch failed: {}", slug, e);
        }
        if tx.send(Action::CourseLoaded { screen, result }).is_err() {
            warn!("Failed to send course {}: receiver dropped", slug);
        }
    })
    .abort_handle()
}

fn spawn_load_image(
    images: Arc<dyn ImageLoader>,
    screen: ScreenId,
    module: usize,
    url: String,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    debug!("Loading image {}", url);
    tokio::spawn(async move {
        let result = images.load(&url).await;
        if tx
            .send(Action::ImageLoaded {
                screen,
                module,
                result,
            })
            .is_err()
        {
            warn!("Failed to send image {}: receiver dropped", url);
        }
    })
    .abort_handle()
}
