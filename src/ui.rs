//! The UI renders the application state into something visible and clickable.
//!
//! The draw function lays out a header with the breadcrumb, the body of every content region the
//! presentation currently shows, and a help bar that doubles as the jump prompt. List expanders
//! drawn into the body are recorded as click targets so mouse clicks can be routed back to them.

use crate::app_state::{AppState, ClickTarget, View};
use crate::config::Config;
use crate::formats::Format;
use crate::presentation::{Expander, ExpanderKind};
use crate::section::{self, ItemId, NodeId};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const FALLBACK_THEME: &str = "base16-ocean.dark";

/// Syntax highlighting for fenced code blocks.
pub struct CodeHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl CodeHighlighter {
    #[must_use]
    /// Loads the bundled syntaxes and the named theme, falling back to a default theme.
    pub fn new(theme_name: &str) -> Self {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes.remove(theme_name).unwrap_or_else(|| {
            log::warn!("unknown theme {theme_name:?}, using {FALLBACK_THEME}");
            themes.remove(FALLBACK_THEME).unwrap_or_default()
        });
        Self { syntaxes, theme }
    }

    /// Highlights `text` as `language`, plain text when the language is unknown.
    fn highlight(&self, language: Option<&str>, text: &str) -> Vec<Line<'static>> {
        let syntax = language
            .and_then(|token| self.syntaxes.find_syntax_by_token(token))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        LinesWithEndings::from(text)
            .map(|line| match highlighter.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => Line::from(
                    ranges
                        .into_iter()
                        .map(|(style, piece)| {
                            let fg = style.foreground;
                            Span::styled(
                                piece.trim_end_matches('\n').to_string(),
                                Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                            )
                        })
                        .collect::<Vec<_>>(),
                ),
                Err(e) => {
                    log::debug!("highlighting failed: {e}");
                    Line::raw(line.trim_end_matches('\n').to_string())
                }
            })
            .collect()
    }
}

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState, cfg: &Config, code: &CodeHighlighter) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumb
            Constraint::Min(0),    // Slide
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    draw_breadcrumb(f, app, chunks[0]);
    draw_slide(f, app, code, chunks[1]);
    draw_help(f, app, cfg, chunks[2]);
}

fn draw_breadcrumb(f: &mut Frame, app: &AppState, area: Rect) {
    let format = crate::formats::markdown::MarkdownFormat;
    let mut spans = Vec::new();

    for (i, (id, title)) in app.breadcrumb().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" > "));
        }
        let level = app.outline.level_of(id).unwrap_or(1);
        spans.append(&mut format.format_section_display(level, &title).spans);
    }

    let number = app
        .slide
        .path(&app.outline)
        .map_or_else(String::new, |p| format!(" §{p} "));
    let file = app
        .files
        .get(app.current_file_index)
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let title = if app.files.len() > 1 {
        format!("{file} ({}/{})", app.current_file_index + 1, app.files.len())
    } else {
        file
    };

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_bottom(number),
    );
    f.render_widget(widget, area);
}

fn draw_slide(f: &mut Frame, app: &mut AppState, code: &CodeHighlighter, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = app
        .wrap_width
        .min(usize::from(inner.width.saturating_sub(2)))
        .max(10);
    let mut body = SlideLines::default();

    if app.title_visible {
        if let Some(root) = app.outline.get(app.outline.root()) {
            body.push(Line::from(Span::styled(
                root.title.to_uppercase(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )));
            body.push(Line::default());
        }
    }

    let shown: Vec<NodeId> = app.presentation.shown_regions().collect();
    for node in shown {
        render_region(app, node, width, code, &mut body);
    }

    app.click_targets = place_targets(&body.expand, inner);
    app.collapse_targets = place_targets(&body.collapse, inner);

    f.render_widget(Paragraph::new(body.lines), inner);
}

/// Line index, column range and expander of a target drawn into the body.
type LineTarget = (usize, u16, u16, Expander);

/// Body lines plus the positions of the expanders drawn into them.
#[derive(Default)]
struct SlideLines {
    lines: Vec<Line<'static>>,
    expand: Vec<LineTarget>,
    collapse: Vec<LineTarget>,
}

impl SlideLines {
    fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    /// Appends `label` to `line` as a clickable expander and pushes the line.
    fn push_with_expander(&mut self, mut line: Line<'static>, label: &str, expander: Expander) {
        let start = u16::try_from(line.width()).unwrap_or(u16::MAX);
        line.spans.push(Span::styled(
            label.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
        let end = u16::try_from(line.width()).unwrap_or(u16::MAX);
        self.expand.push((self.lines.len(), start, end, expander));
        self.lines.push(line);
    }

    /// Marks the whole of the next pushed line as folding back `expander`.
    fn mark_collapse(&mut self, line: &Line<'_>, expander: Expander) {
        let end = u16::try_from(line.width()).unwrap_or(u16::MAX);
        self.collapse.push((self.lines.len(), 0, end, expander));
    }
}

fn place_targets(targets: &[LineTarget], inner: Rect) -> Vec<ClickTarget> {
    targets
        .iter()
        .filter_map(|(line, col_start, col_end, expander)| {
            let row = u16::try_from(*line).ok()?;
            if row >= inner.height {
                return None;
            }
            Some(ClickTarget {
                row: inner.y + row,
                col_start: inner.x.saturating_add(*col_start),
                col_end: inner.x.saturating_add(*col_end),
                expander: *expander,
            })
        })
        .collect()
}

fn render_region(
    app: &AppState,
    node: NodeId,
    width: usize,
    code: &CodeHighlighter,
    body: &mut SlideLines,
) {
    let Some(section) = app.outline.get(node) else {
        return;
    };
    let region = app.presentation.region(node);
    let gutter = if region.emerging { "▌ " } else { "  " };
    let gutter_style = Style::default().fg(Color::Yellow);

    if node != app.outline.root() && !section.title.is_empty() {
        let format = crate::formats::markdown::MarkdownFormat;
        let level = section.level.unwrap_or_else(|| app.slide.level());
        let mut heading = format.format_section_display(level, &section.title);
        heading.spans.insert(0, Span::styled(gutter, gutter_style));
        body.push(heading);
        body.push(Line::default());
    }

    for block in &section.body {
        if let section::Block::List { items } = block {
            for item in items {
                render_item(app, *item, 0, gutter, width, code, body);
            }
        } else {
            let lead = vec![Span::styled(gutter, gutter_style)];
            render_block(block, &lead, width, code, body);
        }
        body.push(Line::default());
    }
}

/// Pushes a paragraph, quote or code block, each line starting with `lead`.
fn render_block(
    block: &section::Block,
    lead: &[Span<'static>],
    width: usize,
    code: &CodeHighlighter,
    body: &mut SlideLines,
) {
    let with_lead = |rest: Vec<Span<'static>>| {
        let mut spans = lead.to_vec();
        spans.extend(rest);
        Line::from(spans)
    };

    match block {
        section::Block::Paragraph { text } => {
            for line in wrap(text, width) {
                body.push(with_lead(vec![Span::raw(line)]));
            }
        }
        section::Block::Quote { text } => {
            for line in wrap(text, width.saturating_sub(2).max(1)) {
                body.push(with_lead(vec![
                    Span::styled("│ ", Style::default().fg(Color::DarkGray)),
                    Span::styled(line, Style::default().add_modifier(Modifier::ITALIC)),
                ]));
            }
        }
        section::Block::Code { language, text } => {
            for line in code.highlight(language.as_deref(), text) {
                body.push(with_lead(line.spans));
            }
        }
        section::Block::List { .. } => {}
    }
}

fn render_item(
    app: &AppState,
    id: ItemId,
    depth: usize,
    gutter: &'static str,
    width: usize,
    code: &CodeHighlighter,
    body: &mut SlideLines,
) {
    let Some(item) = app.outline.item(id) else {
        return;
    };
    let state = app.presentation.item(id);
    if !state.shown {
        return;
    }

    let indent = "  ".repeat(depth);
    let style = if app.presentation.highlighted() == Some(id) {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let line = Line::from(vec![
        Span::styled(gutter, Style::default().fg(Color::Yellow)),
        Span::raw(format!("{indent}• ")),
        Span::styled(item.text.clone(), style),
    ]);

    let next_shown = item
        .next_sibling
        .is_some_and(|next| app.presentation.item(next).shown);
    if state.open {
        body.mark_collapse(
            &line,
            Expander {
                item: id,
                kind: ExpanderKind::Child,
            },
        );
    } else if next_shown {
        body.mark_collapse(
            &line,
            Expander {
                item: id,
                kind: ExpanderKind::Sibling,
            },
        );
    }

    if !item.children.is_empty() && !state.open {
        body.push_with_expander(
            line,
            " →",
            Expander {
                item: id,
                kind: ExpanderKind::Child,
            },
        );
    } else {
        body.push(line);
    }

    let lead = vec![
        Span::styled(gutter, Style::default().fg(Color::Yellow)),
        Span::raw(format!("{indent}  ")),
    ];
    for block in &item.detail {
        render_block(block, &lead, width.saturating_sub(indent.len() + 2).max(1), code, body);
    }

    if state.open {
        for child in &item.children {
            render_item(app, *child, depth + 1, gutter, width, code, body);
        }
    }

    if let Some(next) = item.next_sibling {
        if !app.presentation.item(next).shown {
            let line = Line::from(vec![
                Span::raw(gutter),
                Span::raw(format!("{indent}  ")),
            ]);
            body.push_with_expander(
                line,
                "...",
                Expander {
                    item: id,
                    kind: ExpanderKind::Sibling,
                },
            );
        }
    }
}

fn draw_help(f: &mut Frame, app: &AppState, cfg: &Config, area: Rect) {
    let (text, title) = if app.current_view == View::Jump {
        (
            format!("{}▏", app.jump_buffer),
            format!("Jump to section (e.g. {})", cfg.jump_hint),
        )
    } else if let Some(ref msg) = app.message {
        (msg.clone(), String::new())
    } else {
        (
            "n/Space: Next | p: Prev | ←/→: Siblings | ↑/↓: Parent/Child | s: Jump | q: Quit"
                .to_string(),
            String::new(),
        )
    };

    let help = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(help, area);
}

/// Greedy word wrap to `width` columns.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed =
            current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
