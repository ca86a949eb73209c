//! Document discovery and outline extraction.
//!
//! Paths given on the command line are expanded into a sorted list of documents, and each
//! document is parsed with tree-sitter into an [`Outline`]. Headings are found with the format's
//! section query and nested by their marker level under a synthetic root named after the file;
//! the blocks following each heading become that section's body.

use crate::formats::Format;
use crate::outline::{ListEntry, Outline, OutlineBuilder};
use crate::section::{Block, NodeId};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::{fs, io};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Expands files and directories into the documents matching `extensions`.
///
/// With no paths the current directory is scanned. Explicitly named files are kept whatever
/// their extension.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let roots = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    };

    let mut documents = Vec::new();
    for root in roots {
        if root.is_dir() {
            collect_dir(&root, extensions, &mut documents)?;
        } else if root.is_file() {
            documents.push(root);
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", root.display()),
            ));
        }
    }

    documents.sort();
    documents.dedup();
    Ok(documents)
}

fn collect_dir(dir: &Path, extensions: &[String], found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            continue;
        }

        if path.is_dir() {
            collect_dir(&path, extensions, found)?;
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|ext| ext == e))
        {
            found.push(path);
        }
    }
    Ok(())
}

/// Reads and parses one document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn extract_outline(path: &Path, format: &dyn Format) -> io::Result<Outline> {
    let source = fs::read_to_string(path)?;
    let title = path
        .file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().to_string());
    parse_outline(&source, &title, format)
}

/// Parses `source` into an outline whose root carries `title`.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded or the query is invalid.
pub fn parse_outline(source: &str, title: &str, format: &dyn Format) -> io::Result<Outline> {
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| io::Error::other(e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| io::Error::other("tree-sitter parse was cancelled"))?;

    let query = Query::new(&language, format.section_query())
        .map_err(|e| io::Error::other(e.to_string()))?;
    let bytes = source.as_bytes();

    let mut headings: Vec<Node> = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), bytes);
    while let Some(m) = matches.next() {
        headings.extend(m.captures.iter().map(|c| c.node));
    }
    headings.sort_by_key(Node::start_byte);
    headings.dedup_by_key(|h| h.start_byte());
    headings.retain(|h| !is_contained(*h));

    let mut builder = OutlineBuilder::new(title);
    let root = builder.root();
    add_blocks(&mut builder, root, &leading_blocks(tree.root_node()), bytes);

    // (marker level, section) of the currently open headings
    let mut open: Vec<(usize, NodeId)> = Vec::new();
    for heading in headings {
        let Some(level) = format.heading_level(heading) else {
            continue;
        };
        while open.last().is_some_and(|(l, _)| *l >= level) {
            open.pop();
        }
        let parent = open.last().map_or(root, |(_, id)| *id);
        let Some(id) = builder.section(parent, format.heading_title(heading, bytes)) else {
            continue;
        };
        open.push((level, id));
        add_blocks(&mut builder, id, &blocks_after(heading), bytes);
    }

    let outline = builder.build();
    log::debug!("parsed {title}: {} nodes", outline.node_count());
    Ok(outline)
}

fn is_boundary(node: Node<'_>) -> bool {
    matches!(node.kind(), "section" | "atx_heading" | "setext_heading")
}

/// Headings inside quotes and list items are part of that block, not of the outline.
fn is_contained(heading: Node<'_>) -> bool {
    let mut parent = heading.parent();
    while let Some(node) = parent {
        if matches!(node.kind(), "block_quote" | "list_item") {
            return true;
        }
        parent = node.parent();
    }
    false
}

fn is_marker(kind: &str) -> bool {
    matches!(kind, "block_continuation" | "block_quote_marker")
        || kind.starts_with("list_marker")
        || kind.starts_with("task_list_marker")
}

/// Blocks before the first heading. The grammar wraps them in a heading-less `section`.
fn leading_blocks(document: Node<'_>) -> Vec<Node<'_>> {
    let mut blocks = Vec::new();
    let mut cursor = document.walk();
    for child in document.named_children(&mut cursor) {
        match child.kind() {
            "section" => {
                let mut inner = child.walk();
                let children: Vec<Node> = child.named_children(&mut inner).collect();
                if children.first().is_some_and(|c| is_boundary(*c)) {
                    break;
                }
                blocks.extend(children.into_iter().take_while(|c| !is_boundary(*c)));
            }
            "atx_heading" | "setext_heading" => break,
            _ => blocks.push(child),
        }
    }
    blocks
}

fn blocks_after(heading: Node<'_>) -> Vec<Node<'_>> {
    let mut blocks = Vec::new();
    let mut next = heading.next_named_sibling();
    while let Some(node) = next {
        if is_boundary(node) {
            break;
        }
        blocks.push(node);
        next = node.next_named_sibling();
    }
    blocks
}

fn add_blocks(builder: &mut OutlineBuilder, node: NodeId, blocks: &[Node<'_>], source: &[u8]) {
    for block in blocks {
        if block.kind() == "list" {
            builder.list(node, list_entries(*block, source));
            continue;
        }
        match to_block(*block, source) {
            Some(Block::Paragraph { text }) => builder.paragraph(node, text),
            Some(Block::Quote { text }) => builder.quote(node, text),
            Some(Block::Code { language, text }) => builder.code(node, language, text),
            Some(Block::List { .. }) | None => {}
        }
    }
}

/// Converts a non-list block. `None` for markers, breaks, metadata and empty text.
fn to_block(block: Node<'_>, source: &[u8]) -> Option<Block> {
    match block.kind() {
        "fenced_code_block" => {
            let (language, text) = fenced_code(block, source);
            Some(Block::Code { language, text })
        }
        "indented_code_block" => Some(Block::Code {
            language: None,
            text: indented_code(block, source),
        }),
        "block_quote" => {
            let mut parts = Vec::new();
            quote_parts(block, source, &mut parts);
            let text = parts.join(" ");
            (!text.is_empty()).then_some(Block::Quote { text })
        }
        "atx_heading" | "setext_heading" => {
            let text = heading_text(block, source);
            (!text.is_empty()).then_some(Block::Paragraph { text })
        }
        "list" | "thematic_break" | "minus_metadata" | "plus_metadata" => None,
        kind if is_marker(kind) => None,
        _ => {
            let text = flatten_text(block, source);
            (!text.is_empty()).then_some(Block::Paragraph { text })
        }
    }
}

fn list_entries(list: Node<'_>, source: &[u8]) -> Vec<ListEntry> {
    let mut cursor = list.walk();
    let entries = list
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "list_item")
        .map(|item| {
            let mut inner = item.walk();
            let mut entry = ListEntry::default();
            for child in item.named_children(&mut inner) {
                match child.kind() {
                    "paragraph" if entry.text.is_empty() && entry.detail.is_empty() => {
                        entry.text = flatten_text(child, source);
                    }
                    "list" => entry.children.extend(list_entries(child, source)),
                    _ => entry.detail.extend(to_block(child, source)),
                }
            }
            entry
        })
        .collect();
    entries
}

/// Text of every block in a quote, nested quotes and sections included.
fn quote_parts(node: Node<'_>, source: &[u8], parts: &mut Vec<String>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        let text = match child.kind() {
            kind if is_marker(kind) => continue,
            "block_quote" | "section" | "list" | "list_item" => {
                quote_parts(child, source, parts);
                continue;
            }
            "atx_heading" | "setext_heading" => heading_text(child, source),
            _ => flatten_text(child, source),
        };
        if !text.is_empty() {
            parts.push(text);
        }
    }
}

fn heading_text(heading: Node<'_>, source: &[u8]) -> String {
    heading
        .child_by_field_name("heading_content")
        .map(|content| flatten_text(content, source))
        .unwrap_or_default()
}

fn fenced_code(block: Node<'_>, source: &[u8]) -> (Option<String>, String) {
    let mut language = None;
    let mut text = String::new();
    let mut cursor = block.walk();
    for child in block.named_children(&mut cursor) {
        match child.kind() {
            "info_string" => {
                language = child
                    .utf8_text(source)
                    .ok()
                    .and_then(|info| info.split_whitespace().next())
                    .map(ToString::to_string);
            }
            "code_fence_content" => {
                text = strip_markers(child, source)
                    .trim_end_matches('\n')
                    .to_string();
            }
            _ => {}
        }
    }
    (language, text)
}

/// Indented code with one level of indentation removed.
fn indented_code(block: Node<'_>, source: &[u8]) -> String {
    let text = block.utf8_text(source).unwrap_or_default();
    text.lines()
        .map(|line| {
            line.strip_prefix("    ")
                .or_else(|| line.strip_prefix('\t'))
                .unwrap_or_else(|| line.trim_start())
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

/// Node text without the quote markers and container indentation the grammar tracks as
/// `block_continuation`.
fn strip_markers(node: Node<'_>, source: &[u8]) -> String {
    let mut markers = Vec::new();
    collect_markers(node, &mut markers);

    let mut text = Vec::new();
    let mut pos = node.start_byte();
    for range in markers {
        if range.start > pos {
            text.extend_from_slice(source.get(pos..range.start).unwrap_or_default());
        }
        pos = pos.max(range.end);
    }
    if node.end_byte() > pos {
        text.extend_from_slice(source.get(pos..node.end_byte()).unwrap_or_default());
    }
    String::from_utf8_lossy(&text).into_owned()
}

fn collect_markers(node: Node<'_>, markers: &mut Vec<Range<usize>>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if matches!(child.kind(), "block_continuation" | "block_quote_marker") {
            markers.push(child.byte_range());
        } else {
            collect_markers(child, markers);
        }
    }
}

/// Node text with markers stripped and its lines trimmed and folded onto one line.
fn flatten_text(node: Node<'_>, source: &[u8]) -> String {
    strip_markers(node, source)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
