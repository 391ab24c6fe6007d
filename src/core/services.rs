//! # Screen Collaborators
//!
//! The narrow interfaces screen controllers talk through. Controllers never
//! perform I/O themselves: they ask a `Navigator` to move, a `Clipboard` to
//! copy, a `Notifier` to toast. The reducer hands them an [`Outbox`] that
//! records those requests and turns them into effects afterwards.

use ratatui::text::Text;

use crate::core::route::Route;

/// Markdown → styled text. Pure and synchronous.
pub trait MarkdownRenderer: Send + Sync {
    fn parse(&self, text: &str) -> Text<'static>;
}

/// Transitions to another screen.
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Copies labelled text to the system clipboard. Fire-and-forget.
pub trait Clipboard {
    fn save(&mut self, label: &str, text: &str);
}

/// Shows a short confirmation to the user. Fire-and-forget.
pub trait Notifier {
    fn toast(&mut self, message: &str);
}

/// A labelled clipboard write waiting to be performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    pub label: String,
    pub text: String,
}

/// Records navigation, clipboard and toast requests made by a controller.
#[derive(Debug, Default)]
pub struct Outbox {
    pub routes: Vec<Route>,
    pub clipboard: Vec<ClipboardEntry>,
    pub toasts: Vec<String>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.clipboard.is_empty() && self.toasts.is_empty()
    }
}

impl Navigator for Outbox {
    fn navigate(&mut self, route: Route) {
        self.routes.push(route);
    }
}

impl Clipboard for Outbox {
    fn save(&mut self, label: &str, text: &str) {
        self.clipboard.push(ClipboardEntry {
            label: label.to_string(),
            text: text.to_string(),
        });
    }
}

impl Notifier for Outbox {
    fn toast(&mut self, message: &str) {
        self.toasts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbox_records_requests_in_order() {
        let mut outbox = Outbox::new();
        assert!(outbox.is_empty());

        outbox.navigate(Route::overview("a"));
        outbox.navigate(Route::lesson("a", "b"));
        outbox.save("python", "print()");
        outbox.toast("copied");

        assert_eq!(outbox.routes, vec![Route::overview("a"), Route::lesson("a", "b")]);
        assert_eq!(
            outbox.clipboard,
            vec![ClipboardEntry {
                label: "python".to_string(),
                text: "print()".to_string()
            }]
        );
        assert_eq!(outbox.toasts, vec!["copied".to_string()]);
        assert!(!outbox.is_empty());
    }
}
