//! # TitleBar Component
//!
//! Top status bar: application name, content source, where the user is,
//! the current status message and the active toast.
//!
//! Stateless. All props come from the parent:
//! - `source_name`, `location`, `status_message`: core `App` state
//! - `toast`: core `App` state, already filtered for expiry
//!
//! ## Conditional Formatting
//!
//! 1. **Everything**: `"TEA (contentful) | hello-contentful › rendering | Loading... | ✓ Copied"`
//! 2. **No status/toast**: `"TEA (contentful) | hello-contentful"`
//!
//! Empty parts are skipped along with their separator. When the line is
//! wider than the terminal, the breadcrumb is shortened from the left.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Keep the tail of `text` that fits in `max_width` columns, marking the cut.
fn truncate_left(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut kept = Vec::new();
    let mut width = 1; // the ellipsis
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        kept.push(c);
    }
    std::iter::once(ELLIPSIS).chain(kept.into_iter().rev()).collect()
}

pub struct TitleBar {
    /// Content source (e.g., "contentful", "local")
    pub source_name: String,
    /// Breadcrumb of the current route
    pub location: String,
    /// Status message (e.g., "Loading...")
    pub status_message: String,
    /// Toast text, if one is showing
    pub toast: Option<String>,
}

impl TitleBar {
    pub fn new(
        source_name: String,
        location: String,
        status_message: String,
        toast: Option<String>,
    ) -> Self {
        Self {
            source_name,
            location,
            status_message,
            toast,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let sep = || Span::styled(" | ", Style::default().fg(Color::DarkGray));

        let head = Span::styled(
            format!("TEA ({})", self.source_name),
            Style::default().add_modifier(Modifier::BOLD),
        );
        let mut tail = Vec::new();
        if !self.status_message.is_empty() {
            tail.push(sep());
            tail.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::Yellow),
            ));
        }
        if let Some(toast) = &self.toast {
            tail.push(sep());
            tail.push(Span::styled(
                format!("✓ {toast}"),
                Style::default().fg(Color::Green),
            ));
        }

        let mut spans = vec![head];
        if !self.location.is_empty() {
            let used: usize = spans.iter().chain(tail.iter()).map(Span::width).sum();
            let room = (area.width as usize).saturating_sub(used + 3);
            spans.push(sep());
            spans.push(Span::raw(truncate_left(&self.location, room)));
        }
        spans.extend(tail);

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_toast() {
        let mut title_bar = TitleBar::new(
            "contentful".to_string(),
            "intro › basics".to_string(),
            String::new(),
            Some("Source code copied to clipboard".to_string()),
        );
        let text = rendered(&mut title_bar);

        assert!(text.contains("TEA (contentful)"));
        assert!(text.contains("intro › basics"));
        assert!(text.contains("✓ Source code copied to clipboard"));
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(
            "local".to_string(),
            "courses".to_string(),
            "Loading...".to_string(),
            None,
        );
        let text = rendered(&mut title_bar);

        assert!(text.contains("TEA (local)"));
        assert!(text.contains("Loading..."));
        assert!(!text.contains('✓'));
    }

    #[test]
    fn test_truncate_left_keeps_tail() {
        assert_eq!(truncate_left("course › lesson", 40), "course › lesson");
        assert_eq!(truncate_left("course › lesson", 7), "…lesson");
        assert_eq!(truncate_left("abc", 0), "");
    }

    #[test]
    fn test_title_bar_shortens_breadcrumb_to_fit() {
        let backend = TestBackend::new(40, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut title_bar = TitleBar::new(
            "local".to_string(),
            "a-very-long-course-slug › the-final-lesson".to_string(),
            String::new(),
            None,
        );
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("TEA (local)"));
        assert!(text.contains("the-final-lesson"));
        assert!(text.contains('…'));
    }

    #[test]
    fn test_title_bar_skips_empty_parts() {
        let mut title_bar = TitleBar::new("local".to_string(), String::new(), String::new(), None);
        let text = rendered(&mut title_bar);

        assert!(text.contains("TEA (local)"));
        assert!(!text.contains('|'));
    }
}
