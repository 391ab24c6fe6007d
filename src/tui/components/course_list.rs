//! # CourseListView Component
//!
//! The entry screen: every available course with its short description and
//! lesson count. Up/Down moves the highlight, Enter opens the overview.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, List, ListItem, ListState, Padding, Paragraph};

use crate::content::CourseSummary;
use crate::core::course_list::CourseList;
use crate::tui::component::Component;

pub struct CourseListView<'a> {
    pub list: &'a CourseList,
}

impl CourseListView<'_> {
    fn item(course: &CourseSummary) -> ListItem<'static> {
        let mut lines = vec![Line::from(Span::styled(
            course.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if let Some(short) = &course.short_description {
            lines.push(Line::from(Span::raw(short.clone())));
        }
        let mut meta = format!("{} lessons", course.lesson_count);
        if let Some(updated) = course.updated_at {
            meta.push_str(&format!(" · updated {}", updated.format("%Y-%m-%d")));
        }
        lines.push(Line::from(Span::styled(
            meta,
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::default());
        ListItem::new(Text::from(lines))
    }
}

impl Component for CourseListView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [list_area, help_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        let block = Block::bordered()
            .title(" Courses ")
            .border_style(Style::default().fg(Color::Blue))
            .padding(Padding::horizontal(1));

        if self.list.courses.is_empty() {
            frame.render_widget(
                Paragraph::new("No courses available").block(block),
                list_area,
            );
        } else {
            let items: Vec<ListItem> = self.list.courses.iter().map(Self::item).collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().fg(Color::Cyan))
                .highlight_symbol("▶ ");
            let mut state = ListState::default().with_selected(Some(self.list.selected));
            frame.render_stateful_widget(list, list_area, &mut state);
        }

        frame.render_widget(
            Line::from(Span::styled(
                "↑/↓ select · Enter open · q quit",
                Style::default().fg(Color::DarkGray),
            )),
            help_area,
        );
    }
}
