//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides tree-sitter queries for parsing markdown documents
//! and extracting section structure from ATX (`# syntax`) and setext (underlined) headings.

use crate::formats::Format;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Tree-sitter queries for ATX and setext markdown headings.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn section_query(&self) -> &'static str {
        "[(atx_heading) (setext_heading)] @heading"
    }

    fn heading_level(&self, heading: tree_sitter::Node<'_>) -> Option<usize> {
        let mut cursor = heading.walk();
        let level = heading.children(&mut cursor).find_map(|child| {
            let kind = child.kind();
            kind.strip_prefix("atx_h")
                .and_then(|rest| rest.strip_suffix("_marker"))
                .or_else(|| {
                    kind.strip_prefix("setext_h")
                        .and_then(|rest| rest.strip_suffix("_underline"))
                })
                .and_then(|n| n.parse().ok())
        });
        level
    }

    fn heading_title(&self, heading: tree_sitter::Node<'_>, source: &[u8]) -> String {
        // an inline line for ATX headings, a paragraph for setext ones
        heading
            .child_by_field_name("heading_content")
            .and_then(|content| content.utf8_text(source).ok())
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn format_section_display(&self, level: usize, title: &str) -> Line<'static> {
        let color = match level {
            1 => Color::Magenta,
            2 => Color::Cyan,
            3 => Color::Green,
            4 => Color::Yellow,
            _ => Color::Blue,
        };

        Line::from(vec![Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )])
    }
}
