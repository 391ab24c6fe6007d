//! Markdown → ratatui `Text` renderer.
//!
//! Converts `pulldown_cmark` events into styled `Line`/`Span` values for
//! lesson copy: paragraphs, headings, emphasis, lists, links, images, inline
//! code and fenced code blocks (highlighted with syntect).
//!
//! Also highlights lesson code snippets, which arrive as raw source rather
//! than fenced markdown.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::core::language::Language;
use crate::core::services::MarkdownRenderer;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME: &str = "base16-ocean.dark";

/// The terminal's [`MarkdownRenderer`]: [`render`] with a fixed base color.
pub struct TerminalMarkdown {
    pub base_fg: Color,
}

impl Default for TerminalMarkdown {
    fn default() -> Self {
        Self {
            base_fg: Color::Reset,
        }
    }
}

impl MarkdownRenderer for TerminalMarkdown {
    fn parse(&self, text: &str) -> Text<'static> {
        render(text, self.base_fg)
    }
}

/// Highlight a code snippet written in `language`. Falls back to plain
/// white text when syntect has no grammar for it.
pub fn highlight_code(source: &str, language: Language) -> Text<'static> {
    let source = source.replace('\t', "    ");
    let Some(syntax) = SYNTAX_SET.find_syntax_by_token(language.syntax_token()) else {
        return plain_code(&source);
    };
    let Some(theme) = THEME_SET.themes.get(THEME) else {
        return plain_code(&source);
    };
    let mut hl = HighlightLines::new(syntax, theme);
    Text::from(highlight_lines(&mut hl, &source))
}

fn plain_code(source: &str) -> Text<'static> {
    let code_style = Style::default().fg(Color::White);
    Text::from(
        source
            .lines()
            .map(|line| Line::from(Span::styled(line.to_owned(), code_style)))
            .collect::<Vec<_>>(),
    )
}

/// Run `text` through a highlighter, one `Line` per source line.
fn highlight_lines(hl: &mut HighlightLines<'static>, text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(text) {
        if let Ok(ranges) = hl.highlight_line(line, &SYNTAX_SET) {
            let spans: Vec<Span<'static>> = ranges
                .into_iter()
                .filter_map(|(hl_style, frag)| {
                    let content = frag.trim_end_matches('\n').replace('\t', "    ");
                    if content.is_empty() {
                        return None;
                    }
                    let fg = Color::Rgb(
                        hl_style.foreground.r,
                        hl_style.foreground.g,
                        hl_style.foreground.b,
                    );
                    Some(Span::styled(content, Style::default().fg(fg)))
                })
                .collect();
            lines.push(Line::from(spans));
        }
    }
    lines
}

/// Parse markdown lesson copy into styled `Text`.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut builder = TextBuilder::new(base_fg);
    for event in Parser::new(content) {
        builder.event(event);
    }
    Text::from(builder.lines)
}

// ── Builder ─────────────────────────────────────────────────────────────────

/// An open fenced code block.
enum Fence {
    Highlighted(HighlightLines<'static>),
    Plain,
}

struct TextBuilder {
    lines: Vec<Line<'static>>,
    base_fg: Color,
    /// Inline styles, each already patched onto its parent.
    styles: Vec<Style>,
    /// Open lists, innermost last. `Some(n)` = ordered, next number `n`.
    lists: Vec<Option<u64>>,
    /// The item marker was just written; a loose item's paragraph stays on its line.
    item_started: bool,
    fence: Option<Fence>,
    /// Destination of the open link or image, written after its text.
    link_url: Option<String>,
    image_url: Option<String>,
    /// A blank line goes before the next block.
    gap: bool,
}

impl TextBuilder {
    fn new(base_fg: Color) -> Self {
        Self {
            lines: Vec::new(),
            base_fg,
            styles: Vec::new(),
            lists: Vec::new(),
            item_started: false,
            fence: None,
            link_url: None,
            image_url: None,
            gap: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn start_block(&mut self) {
        if self.gap {
            self.lines.push(Line::default());
            self.gap = false;
        }
        self.lines.push(Line::default());
    }

    fn span(&mut self, span: Span<'static>) {
        match self.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => self.lines.push(Line::from(span)),
        }
    }

    fn code_line(&mut self, mut spans: Vec<Span<'static>>) {
        spans.insert(0, Span::styled("│ ", border_style()));
        self.lines.push(Line::from(spans));
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.span(Span::styled(
                code.to_string(),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )),
            Event::SoftBreak => self.span(Span::raw(" ")),
            Event::HardBreak => self.lines.push(Line::default()),
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if !std::mem::take(&mut self.item_started) {
                    self.start_block();
                }
            }
            Tag::Heading { level, .. } => {
                self.start_block();
                self.push_style(heading_style(level));
            }
            Tag::List(first) => {
                if self.lists.is_empty() {
                    self.start_block();
                    // The list opens on its first item's line
                    self.lines.pop();
                }
                self.lists.push(first);
            }
            Tag::Item => self.open_item(),
            Tag::CodeBlock(kind) => {
                let lang = match &kind {
                    CodeBlockKind::Fenced(lang) => lang.as_ref(),
                    CodeBlockKind::Indented => "",
                };
                self.open_fence(lang);
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(link_style());
            }
            Tag::Image { dest_url, .. } => {
                self.image_url = Some(dest_url.to_string());
                self.span(Span::styled("[image: ", image_style()));
                self.push_style(image_style());
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.gap = true,
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.gap = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.gap = true;
            }
            TagEnd::Item => self.item_started = false,
            TagEnd::CodeBlock => {
                self.fence = None;
                self.lines.push(Line::from(Span::styled("╰──", border_style())));
                self.gap = true;
            }
            TagEnd::Emphasis | TagEnd::Strong => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(url) = self.link_url.take() {
                    self.span(Span::raw(" ("));
                    self.span(Span::styled(url, link_style()));
                    self.span(Span::raw(")"));
                }
            }
            TagEnd::Image => {
                self.styles.pop();
                self.span(Span::styled("]", image_style()));
                if let Some(url) = self.image_url.take() {
                    self.span(Span::styled(
                        format!(" {url}"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => {}
        }
    }

    fn open_item(&mut self) {
        let depth = self.lists.len().saturating_sub(1);
        let marker = match self.lists.last_mut() {
            Some(Some(n)) => {
                let marker = format!("{}{n}. ", "  ".repeat(depth));
                *n += 1;
                marker
            }
            _ => format!("{}- ", "  ".repeat(depth)),
        };
        self.gap = false;
        self.lines.push(Line::from(Span::styled(
            marker,
            Style::default().fg(Color::DarkGray),
        )));
        self.item_started = true;
    }

    /// Top border, then pick a highlighter. Fences may use snippet
    /// language names ("java-android", "dotnet") as well as syntect tokens.
    fn open_fence(&mut self, lang: &str) {
        if !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.gap = false;
        let mut top = vec![Span::styled("╭──", border_style())];
        if !lang.is_empty() {
            top.push(Span::styled(
                format!(" {lang} "),
                border_style().add_modifier(Modifier::BOLD),
            ));
            top.push(Span::styled("──", border_style()));
        }
        self.lines.push(Line::from(top));

        let syntax = (!lang.is_empty())
            .then(|| {
                SYNTAX_SET.find_syntax_by_token(lang).or_else(|| {
                    Language::from_name(lang)
                        .and_then(|l| SYNTAX_SET.find_syntax_by_token(l.syntax_token()))
                })
            })
            .flatten();
        self.fence = Some(match (syntax, THEME_SET.themes.get(THEME)) {
            (Some(syntax), Some(theme)) => Fence::Highlighted(HighlightLines::new(syntax, theme)),
            _ => Fence::Plain,
        });
    }

    fn text(&mut self, text: &str) {
        let text = text.replace('\t', "    ");
        match self.fence.take() {
            Some(Fence::Highlighted(mut hl)) => {
                for line in highlight_lines(&mut hl, &text) {
                    self.code_line(line.spans);
                }
                self.fence = Some(Fence::Highlighted(hl));
            }
            Some(Fence::Plain) => {
                for line in text.lines() {
                    self.code_line(vec![Span::styled(
                        line.to_owned(),
                        Style::default().fg(Color::White),
                    )]);
                }
                self.fence = Some(Fence::Plain);
            }
            None => {
                let style = self.style();
                self.span(Span::styled(text, style));
            }
        }
    }
}

// ── Styles ──────────────────────────────────────────────────────────────────

/// Headings keep the surrounding color; level shows through modifiers only.
fn heading_style(level: HeadingLevel) -> Style {
    let modifier = match level {
        HeadingLevel::H1 => Modifier::BOLD | Modifier::UNDERLINED,
        HeadingLevel::H2 => Modifier::BOLD,
        _ => Modifier::BOLD | Modifier::ITALIC,
    };
    Style::default().add_modifier(modifier)
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED)
}

fn image_style() -> Style {
    Style::default().fg(Color::Magenta)
}

fn border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
