//! # CourseOverviewView Component
//!
//! ```text
//! ╭ Hello Contentful ──────────────────────────╮
//! │ Duration: 30 min | Skill level: beginner   │
//! │                                            │
//! │ Learn how content is modelled ...          │
//! ╰────────────────────────────────────────────╯
//! ╭ Lessons ───────────────────────────────────╮
//! │ ▶ Lesson 1                                 │
//! │   The content model                        │
//! ╰────────────────────────────────────────────╯
//!  Enter open · n start course · Esc back
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::core::overview::{CourseOverview, LessonEntry};
use crate::tui::component::Component;

/// Borders (2) + horizontal padding (2).
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Header never takes more than this share of the screen.
const MAX_HEADER_PERCENT: u16 = 50;

pub struct CourseOverviewView<'a> {
    pub view: &'a CourseOverview,
    /// Whether the "start course" control is available.
    pub has_next: bool,
}

impl CourseOverviewView<'_> {
    fn header(&self) -> Paragraph<'static> {
        let title: String = self
            .view
            .title
            .lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.as_ref()))
            .collect();

        let mut body = Text::default();
        body.lines.extend(self.view.duration.lines.iter().cloned());
        body.lines.push(Line::default());
        body.lines.extend(self.view.description.lines.iter().cloned());

        Paragraph::new(body)
            .block(
                Block::bordered()
                    .title(Span::styled(
                        format!(" {} ", title.trim()),
                        Style::default().add_modifier(Modifier::BOLD),
                    ))
                    .border_style(Style::default().fg(Color::Blue))
                    .padding(Padding::horizontal(1)),
            )
            .wrap(Wrap { trim: false })
    }

    fn item(entry: &LessonEntry) -> ListItem<'static> {
        let mut lines: Vec<Line<'static>> = entry
            .subtitle
            .lines
            .iter()
            .cloned()
            .map(|l| l.style(Style::default().fg(Color::DarkGray)))
            .collect();
        lines.extend(entry.title.lines.iter().cloned());
        ListItem::new(Text::from(lines))
    }
}

/// Rows for a header of `wanted` lines, capped at a share of `available`.
fn header_height(wanted: usize, available: u16) -> u16 {
    let cap = u32::from(available) * u32::from(MAX_HEADER_PERCENT) / 100;
    // cap <= available, so the result fits in u16
    wanted.min(cap as usize) as u16
}

impl Component for CourseOverviewView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let header = self.header();
        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let header_rows = header_height(header.line_count(inner_width), area.height);

        let [header_area, lessons_area, help_area] = Layout::vertical([
            Constraint::Length(header_rows),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(header, header_area);

        let block = Block::bordered()
            .title(format!(" Lessons ({}) ", self.view.lessons.len()))
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));
        if self.view.lessons.is_empty() {
            frame.render_widget(
                Paragraph::new("This course has no lessons yet").block(block),
                lessons_area,
            );
        } else {
            let items: Vec<ListItem> = self.view.lessons.iter().map(Self::item).collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().fg(Color::Cyan))
                .highlight_symbol("▶ ");
            let mut state = ListState::default().with_selected(Some(self.view.selected));
            frame.render_stateful_widget(list, lessons_area, &mut state);
        }

        let help = if self.has_next {
            "↑/↓ select · Enter open lesson · n start course · Esc back"
        } else {
            "Esc back"
        };
        frame.render_widget(
            Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
            help_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::overview::CourseOverviewController;
    use crate::test_support::{PlainMarkdown, sample_course};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(lessons: usize) -> String {
        let mut ctrl = CourseOverviewController::new("course");
        ctrl.on_course_loaded(sample_course("course", lessons), &PlainMarkdown);
        let view = ctrl.state().rendered().unwrap();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                CourseOverviewView {
                    view,
                    has_next: ctrl.next_lesson_slug().is_some(),
                }
                .render(f, f.area())
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
    fn header_height_is_capped_on_any_terminal_size() {
        assert_eq!(header_height(3, 24), 3);
        assert_eq!(header_height(40, 24), 12);
        assert_eq!(header_height(5000, 1000), 500);
        assert_eq!(header_height(usize::MAX, u16::MAX), u16::MAX / 2);
        assert_eq!(header_height(4, 0), 0);
    }

    #[test]
    fn shows_course_header_and_lessons() {
        let text = rendered(2);
        assert!(text.contains("Course course"));
        assert!(text.contains("25 min"));
        assert!(text.contains("Lessons (2)"));
        assert!(text.contains("Lesson 1"));
        assert!(text.contains("Lesson title 1"));
        assert!(text.contains("n start course"));
    }

    #[test]
    fn course_without_lessons_hides_start() {
        let text = rendered(0);
        assert!(text.contains("no lessons yet"));
        assert!(!text.contains("start course"));
    }
}
