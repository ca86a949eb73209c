//! Node representation for outline documents.
//!
//! A section is one node of the document tree, typically corresponding to a heading in
//! markdown. Sections track their position in the tree through parent/child indices into the
//! owning [`Outline`](crate::outline::Outline) arena. Body content is kept as a list of blocks,
//! and list items live in a second arena so that their reveal state can be addressed directly.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
/// Index of a node in the outline arena.
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
/// Index of a list item in the outline's item arena.
pub struct ItemId(pub usize);

#[derive(Clone, Debug, Serialize)]
/// Hierarchical document division owning a content region.
pub struct Section {
    /// Heading text without markup symbols.
    pub title: String,
    /// Depth tag, 1 for the document root. `None` marks plain content that is not navigable.
    pub level: Option<usize>,
    /// Structural identifier derived from the section numbering (`outline-container-sec-5-2`).
    pub anchor: Option<String>,
    /// Body blocks shown when this section is the focused slide.
    pub body: Vec<Block>,
    /// Index of the containing section.
    pub parent_index: Option<NodeId>,
    /// Indices of directly nested nodes in document order.
    pub children_indices: Vec<NodeId>,
}

impl Section {
    #[must_use]
    /// Whether the node is tagged as a navigable outline node.
    pub fn is_outline(&self) -> bool {
        self.level.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// A piece of body content inside a section's content region.
pub enum Block {
    /// Running text, already flattened to a single string.
    Paragraph {
        /// Paragraph text with line breaks folded to spaces.
        text: String,
    },
    /// Bullet or ordered list; items are revealed progressively.
    List {
        /// Top-level items of this list.
        items: Vec<ItemId>,
    },
    /// Quoted text with its markers stripped.
    Quote {
        /// Quote content folded to a single string.
        text: String,
    },
    /// Fenced or indented code shown verbatim.
    Code {
        /// Info string language, if any.
        language: Option<String>,
        /// Code lines without the fences.
        text: String,
    },
}

#[derive(Clone, Debug, Serialize)]
/// Entry of a list block, possibly carrying a nested list.
pub struct ListItem {
    /// Item text without the list marker.
    pub text: String,
    /// Owning section.
    pub node: NodeId,
    /// Enclosing list item when nested.
    pub parent_item: Option<ItemId>,
    /// Items of the nested list, if any.
    pub children: Vec<ItemId>,
    /// Following item in the same list.
    pub next_sibling: Option<ItemId>,
    /// Whether this is the first item of its list.
    pub first_in_list: bool,
    /// Paragraphs, code and quotes following the item's first paragraph. Never lists.
    pub detail: Vec<Block>,
}
