//! # StatusView Component
//!
//! Fills the main area while a screen has nothing to show yet (spinner) or
//! will never have anything to show (not-found message).

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub enum StatusView<'a> {
    Loading { spinner_frame: usize },
    NotFound { message: &'a str },
}

impl Component for StatusView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(5),
            Constraint::Fill(1),
        ])
        .areas(area);

        match self {
            StatusView::Loading { spinner_frame } => {
                let glyph = SPINNER[*spinner_frame % SPINNER.len()];
                let line = Line::from(vec![
                    Span::styled(glyph, Style::default().fg(Color::Cyan)),
                    Span::raw(" Loading"),
                ]);
                frame.render_widget(
                    Paragraph::new(line).alignment(Alignment::Center),
                    middle,
                );
            }
            StatusView::NotFound { message } => {
                let block = Block::bordered()
                    .title(" Not found ")
                    .title_alignment(Alignment::Center)
                    .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::DIM))
                    .padding(Padding::horizontal(1));
                let body = vec![
                    Line::from(Span::styled(
                        message.to_string(),
                        Style::default().fg(Color::Red),
                    )),
                    Line::from(Span::styled(
                        "Esc to go back",
                        Style::default().fg(Color::DarkGray),
                    )),
                ];
                frame.render_widget(
                    Paragraph::new(body)
                        .block(block)
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    middle,
                );
            }
        }
    }
}
