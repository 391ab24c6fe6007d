use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::core::action::Action;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    ForceQuit, // Ctrl+C
    Quit,      // q
    Back,      // Esc / Backspace
    Activate,  // Enter
    CursorUp,
    CursorDown,
    LanguageNext, // Right / Tab
    LanguagePrev, // Left / Shift+Tab
    NextLesson,   // n
    Copy,         // c

    // TUI-local events (handled directly in TUI)
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    Resize,
}

impl TuiEvent {
    /// The core action this event maps to, if it is not purely presentational.
    pub fn to_action(&self) -> Option<Action> {
        match self {
            TuiEvent::ForceQuit | TuiEvent::Quit => Some(Action::Quit),
            TuiEvent::Back => Some(Action::Back),
            TuiEvent::Activate => Some(Action::Activate),
            TuiEvent::CursorUp => Some(Action::CursorUp),
            TuiEvent::CursorDown => Some(Action::CursorDown),
            TuiEvent::LanguageNext => Some(Action::CycleLanguage { forward: true }),
            TuiEvent::LanguagePrev => Some(Action::CycleLanguage { forward: false }),
            TuiEvent::NextLesson => Some(Action::NextLesson),
            TuiEvent::Copy => Some(Action::CopySource),
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown
            | TuiEvent::Resize => None,
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(event) => translate(event),
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            // Key release events arrive too when keyboard enhancement is on
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
                (_, KeyCode::Esc) | (_, KeyCode::Backspace) => Some(TuiEvent::Back),
                (_, KeyCode::Enter) => Some(TuiEvent::Activate),
                (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Some(TuiEvent::CursorDown),
                (_, KeyCode::Right) | (_, KeyCode::Tab) | (_, KeyCode::Char('l')) => {
                    Some(TuiEvent::LanguageNext)
                }
                (_, KeyCode::Left) | (_, KeyCode::BackTab) | (_, KeyCode::Char('h')) => {
                    Some(TuiEvent::LanguagePrev)
                }
                (_, KeyCode::Char('n')) => Some(TuiEvent::NextLesson),
                (_, KeyCode::Char('c')) => Some(TuiEvent::Copy),
                (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
