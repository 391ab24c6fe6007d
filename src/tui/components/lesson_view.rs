//! # LessonView Component
//!
//! Scrollable stack of lesson modules, one bordered block per module, in
//! lesson order. The focused module gets a cyan border; a focused code
//! module also lists its key bindings.
//!
//! ## Architecture
//!
//! Same split as any stateful component here: `LessonView` is rebuilt every
//! frame from the `LessonPage` props, while `LessonViewState` (scroll offset,
//! cached block heights) lives in `TuiState` for as long as the screen does.
//!
//! Block heights are measured with `Paragraph::line_count` before anything
//! is drawn, so the ScrollView canvas can be sized up front.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::language::Language;
use crate::core::lesson::{CodeSnippetView, ImageStatus, ImageView, LessonPage, ModuleView};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown::highlight_code;

/// Borders (2) + horizontal padding (2).
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Column reserved for the vertical scrollbar.
const SCROLLBAR_WIDTH: u16 = 1;

// ─── State ───────────────────────────────────────────────────────────

/// Scroll and layout state of the lesson screen.
/// Must be persisted in the parent TuiState.
#[derive(Default)]
pub struct LessonViewState {
    pub scroll_state: ScrollViewState,
    /// Running total of block heights: entry `i` is the bottom edge of block `i`.
    pub prefix_heights: Vec<u16>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Focus at the last render; a change scrolls the new block into view.
    last_focused: Option<usize>,
}

impl LessonViewState {
    pub fn new() -> Self {
        Self::default()
    }

    fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll so block `idx` is fully visible. A block taller than the
    /// viewport is aligned to its top edge.
    pub fn scroll_to_block(&mut self, idx: usize) {
        let Some(&bottom) = self.prefix_heights.get(idx) else {
            return;
        };
        let top = if idx == 0 {
            0
        } else {
            self.prefix_heights[idx - 1]
        };
        let offset_y = self.scroll_state.offset().y;

        if top < offset_y || bottom - top > self.viewport_height {
            self.scroll_state.set_offset(Position { x: 0, y: top });
        } else if bottom > offset_y + self.viewport_height {
            let new_y = bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }
}

impl EventHandler for LessonViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
            }
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
            }
            _ => {}
        }
        None
    }
}

// ─── Module blocks ───────────────────────────────────────────────────

fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    }
}

fn module_block(title: String, is_focused: bool) -> Block<'static> {
    Block::bordered()
        .title(format!(" {title} "))
        .border_style(border_style(is_focused))
        .title_style(border_style(is_focused))
        .padding(Padding::horizontal(1))
}

/// Tab strip of every language, the selected one highlighted.
fn language_tabs(selected: Language) -> Line<'static> {
    let mut spans = Vec::with_capacity(Language::ALL.len() * 2);
    for (i, language) in Language::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ", Style::default()));
        }
        let style = if *language == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", language.name()), style));
    }
    Line::from(spans)
}

fn code_paragraph(code: &CodeSnippetView, is_focused: bool) -> Paragraph<'static> {
    let title = code.title.clone().unwrap_or_else(|| "Code".to_string());
    let mut block = module_block(title, is_focused);
    if is_focused {
        block = block.title_bottom(Line::from(" ←/→ language · c copy ").right_aligned());
    }

    let mut text = Text::from(vec![language_tabs(code.language()), Line::default()]);
    if code.source().is_empty() {
        text.lines.push(Line::from(Span::styled(
            format!("No {} sample for this snippet", code.language().name()),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    } else {
        text.lines
            .extend(highlight_code(code.source(), code.language()).lines);
    }
    // Code keeps its indentation: no trimming
    Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
}

fn image_paragraph(image: &ImageView, is_focused: bool) -> Paragraph<'static> {
    let title = image.title.clone().unwrap_or_else(|| "Image".to_string());
    let dim = Style::default().fg(Color::DarkGray);
    let status = match &image.status {
        ImageStatus::Loading => Line::from(Span::styled("Loading image…", dim)),
        ImageStatus::Loaded(info) => Line::from(vec![
            Span::styled("🖼 ", Style::default().fg(Color::Green)),
            Span::raw(info.content_type.clone().unwrap_or_else(|| "image".to_string())),
            Span::styled(format!(", {} bytes", info.bytes), dim),
        ]),
        ImageStatus::Fallback => Line::from(Span::styled(
            "[image unavailable]",
            Style::default().fg(Color::Yellow),
        )),
    };

    let mut text = Text::from(vec![
        status,
        Line::from(Span::styled(
            image.url.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        )),
    ]);
    if !image.caption.lines.is_empty() {
        text.lines.push(Line::default());
        text.lines.extend(image.caption.lines.iter().cloned());
    }
    Paragraph::new(text)
        .block(module_block(title, is_focused))
        .wrap(Wrap { trim: true })
}

fn module_paragraph(module: &ModuleView, is_focused: bool) -> Paragraph<'static> {
    match module {
        ModuleView::Code(code) => code_paragraph(code, is_focused),
        ModuleView::Image(image) => image_paragraph(image, is_focused),
        ModuleView::Copy(copy) => {
            let title = copy.title.clone().unwrap_or_else(|| "Read".to_string());
            Paragraph::new(copy.body.clone())
                .block(module_block(title, is_focused))
                .wrap(Wrap { trim: true })
        }
    }
}

// ─── LessonView ──────────────────────────────────────────────────────

pub struct LessonView<'a> {
    pub page: &'a LessonPage,
    pub state: &'a mut LessonViewState,
}

impl LessonView<'_> {
    fn header(&self) -> Paragraph<'static> {
        let mut text = Text::default();
        text.lines.extend(
            self.page
                .title
                .lines
                .iter()
                .cloned()
                .map(|l| l.style(Style::default().add_modifier(Modifier::BOLD))),
        );
        text.lines.push(Line::from(Span::styled(
            format!(
                "Lesson {} of {}",
                self.page.lesson_number, self.page.lesson_count
            ),
            Style::default().fg(Color::DarkGray),
        )));
        Paragraph::new(text)
    }

    fn footer(&self) -> Line<'static> {
        let mut spans = Vec::new();
        if let Some(next) = &self.page.next_lesson_slug {
            spans.push(Span::styled(
                format!("n next lesson → {next}"),
                Style::default().fg(Color::Green),
            ));
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            "↑/↓ focus · Esc back",
            Style::default().fg(Color::DarkGray),
        ));
        Line::from(spans)
    }
}

impl Component for LessonView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let header = self.header();
        let header_height = header.line_count(area.width) as u16;
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);
        frame.render_widget(header, header_area);
        frame.render_widget(self.footer(), footer_area);

        // 1. Measure every module block
        let content_width = body_area.width.saturating_sub(SCROLLBAR_WIDTH);
        let inner_width = content_width.saturating_sub(HORIZONTAL_OVERHEAD).max(1);
        let blocks: Vec<(Paragraph<'static>, u16)> = self
            .page
            .modules
            .iter()
            .enumerate()
            .map(|(i, module)| {
                let paragraph = module_paragraph(module, i == self.page.focused);
                let height = paragraph.line_count(inner_width) as u16;
                (paragraph, height)
            })
            .collect();

        self.state.prefix_heights = blocks
            .iter()
            .scan(0u16, |acc, (_, h)| {
                *acc = acc.saturating_add(*h);
                Some(*acc)
            })
            .collect();
        self.state.viewport_height = body_area.height;

        // 2. Follow focus, then clamp
        if self.state.last_focused != Some(self.page.focused) {
            self.state.scroll_to_block(self.page.focused);
            self.state.last_focused = Some(self.page.focused);
        }
        self.state.clamp_scroll();

        // 3. Draw into the ScrollView
        let total_height = self.state.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (paragraph, height) in blocks {
            scroll_view.render_widget(paragraph, Rect::new(0, y_offset, content_width, height));
            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, body_area, &mut self.state.scroll_state);
    }
}
