//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over outline document formats by
//! providing the tree-sitter grammar, the heading query, and the heading accessors specific to
//! each format.

pub mod markdown;

use ratatui::text::Line;

/// Tree-sitter description of how a document format marks up its outline.
pub trait Format {
    /// Grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing every section heading as `@heading`.
    fn section_query(&self) -> &str;
    /// Heading depth as written in the source (`##` is 2), `None` if the node is no heading.
    fn heading_level(&self, heading: tree_sitter::Node<'_>) -> Option<usize>;
    /// Heading text without markup symbols.
    fn heading_title(&self, heading: tree_sitter::Node<'_>, source: &[u8]) -> String;
    /// Styled rendering of a heading for breadcrumbs and slide titles.
    fn format_section_display(&self, level: usize, title: &str) -> Line<'static>;
}
