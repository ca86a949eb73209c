//! Read-only access to the document tree.
//!
//! The outline is an arena of [`Section`] nodes rooted at [`NodeId(0)`](NodeId). It answers the
//! structural questions the slide cursor asks: depth bands, parents, outline siblings and
//! children, and anchor lookups for direct jumps. Nodes are only ever created through
//! [`OutlineBuilder`], which keeps every outline node exactly one level below its parent.

use crate::path::SectionPath;
use crate::section::{Block, ItemId, ListItem, NodeId, Section};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, Serialize)]
/// Immutable hierarchy of sections plus the list items referenced by their bodies.
pub struct Outline {
    nodes: Vec<Section>,
    items: Vec<ListItem>,
    #[serde(skip)]
    anchors: HashMap<String, NodeId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Nested list entry handed to [`OutlineBuilder::list`].
pub struct ListEntry {
    /// Item text.
    pub text: String,
    /// Nested entries.
    pub children: Vec<ListEntry>,
    /// Blocks after the first paragraph of the entry.
    pub detail: Vec<Block>,
}

impl ListEntry {
    /// Entry without nested items.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
            detail: Vec::new(),
        }
    }

    /// Entry carrying a nested list.
    pub fn nested(text: impl Into<String>, children: Vec<ListEntry>) -> Self {
        Self {
            text: text.into(),
            children,
            detail: Vec::new(),
        }
    }

    #[must_use]
    /// Attaches follow-up blocks to the entry. Nested lists belong in `children` and are dropped.
    pub fn with_detail(mut self, detail: Vec<Block>) -> Self {
        self.detail = detail
            .into_iter()
            .filter(|block| !matches!(block, Block::List { .. }))
            .collect();
        self
    }
}

/// Incrementally assembles an [`Outline`].
pub struct OutlineBuilder {
    nodes: Vec<Section>,
    items: Vec<ListItem>,
}

impl OutlineBuilder {
    /// Starts an outline whose root (depth 1) carries the document title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            nodes: vec![Section {
                title: title.into(),
                level: Some(1),
                anchor: None,
                body: Vec::new(),
                parent_index: None,
                children_indices: Vec::new(),
            }],
            items: Vec::new(),
        }
    }

    #[must_use]
    /// The document root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends an outline section under `parent`, one level deeper.
    ///
    /// Returns `None` if `parent` is unknown or is plain content.
    pub fn section(&mut self, parent: NodeId, title: impl Into<String>) -> Option<NodeId> {
        let level = self.nodes.get(parent.0)?.level? + 1;
        Some(self.push(parent, title.into(), Some(level)))
    }

    /// Appends a plain, non-navigable content node under `parent`.
    ///
    /// Returns `None` if `parent` is unknown.
    pub fn plain(&mut self, parent: NodeId, title: impl Into<String>) -> Option<NodeId> {
        self.nodes.get(parent.0)?;
        Some(self.push(parent, title.into(), None))
    }

    fn push(&mut self, parent: NodeId, title: String, level: Option<usize>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Section {
            title,
            level,
            anchor: None,
            body: Vec::new(),
            parent_index: Some(parent),
            children_indices: Vec::new(),
        });
        self.nodes[parent.0].children_indices.push(id);
        id
    }

    /// Adds a paragraph to the body of `node`. Unknown nodes are ignored.
    pub fn paragraph(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(section) = self.nodes.get_mut(node.0) {
            section.body.push(Block::Paragraph { text: text.into() });
        }
    }

    /// Adds a fenced code block to the body of `node`. Unknown nodes are ignored.
    pub fn code(&mut self, node: NodeId, language: Option<String>, text: impl Into<String>) {
        if let Some(section) = self.nodes.get_mut(node.0) {
            section.body.push(Block::Code {
                language,
                text: text.into(),
            });
        }
    }

    /// Adds a block quote to the body of `node`. Unknown nodes are ignored.
    pub fn quote(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(section) = self.nodes.get_mut(node.0) {
            section.body.push(Block::Quote { text: text.into() });
        }
    }

    /// Adds a (possibly nested) list to the body of `node`. Unknown nodes and empty lists are
    /// ignored.
    pub fn list(&mut self, node: NodeId, entries: Vec<ListEntry>) {
        if node.0 >= self.nodes.len() || entries.is_empty() {
            return;
        }
        let items = self.push_items(node, None, entries);
        self.nodes[node.0].body.push(Block::List { items });
    }

    fn push_items(
        &mut self,
        node: NodeId,
        parent_item: Option<ItemId>,
        entries: Vec<ListEntry>,
    ) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = Vec::with_capacity(entries.len());

        for (i, entry) in entries.into_iter().enumerate() {
            let id = ItemId(self.items.len());
            self.items.push(ListItem {
                text: entry.text,
                node,
                parent_item,
                children: Vec::new(),
                next_sibling: None,
                first_in_list: i == 0,
                detail: entry.detail,
            });
            if let Some(prev) = ids.last() {
                self.items[prev.0].next_sibling = Some(id);
            }
            ids.push(id);

            if !entry.children.is_empty() {
                let children = self.push_items(node, Some(id), entry.children);
                self.items[id.0].children = children;
            }
        }

        ids
    }

    #[must_use]
    /// Numbers every outline section and freezes the tree.
    pub fn build(mut self) -> Outline {
        let mut anchors = HashMap::new();
        let mut stack: Vec<(NodeId, Vec<usize>)> = vec![(NodeId(0), Vec::new())];

        while let Some((id, numbers)) = stack.pop() {
            let outline_children: Vec<NodeId> = self.nodes[id.0]
                .children_indices
                .iter()
                .copied()
                .filter(|child| self.nodes[child.0].is_outline())
                .collect();

            for (i, child) in outline_children.into_iter().enumerate() {
                let mut child_numbers = numbers.clone();
                child_numbers.push(i + 1);
                if let Some(path) = SectionPath::new(child_numbers.clone()) {
                    let anchor = path.container_id();
                    anchors.insert(anchor.clone(), child);
                    self.nodes[child.0].anchor = Some(anchor);
                }
                stack.push((child, child_numbers));
            }
        }

        Outline {
            nodes: self.nodes,
            items: self.items,
            anchors,
        }
    }
}

impl Outline {
    #[must_use]
    /// The document root, always present.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[must_use]
    /// Number of nodes, root and plain content included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// Whether anything besides the root was parsed.
    pub fn has_sections(&self) -> bool {
        self.nodes.len() > 1
    }

    #[must_use]
    /// Looks up a node.
    pub fn get(&self, id: NodeId) -> Option<&Section> {
        self.nodes.get(id.0)
    }

    /// All nodes with their ids, in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Section)> {
        self.nodes.iter().enumerate().map(|(i, s)| (NodeId(i), s))
    }

    #[must_use]
    /// Depth tag of a node, `None` for plain content or unknown ids.
    pub fn level_of(&self, id: NodeId) -> Option<usize> {
        self.get(id).and_then(|s| s.level)
    }

    #[must_use]
    /// Structural parent, `None` at the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|s| s.parent_index)
    }

    #[must_use]
    /// Ordered children one level deeper that are tagged as outline nodes.
    pub fn children_at_depth(&self, id: NodeId) -> Vec<NodeId> {
        let Some(section) = self.get(id) else {
            return Vec::new();
        };
        let Some(level) = section.level else {
            return Vec::new();
        };
        section
            .children_indices
            .iter()
            .copied()
            .filter(|child| self.level_of(*child) == Some(level + 1))
            .collect()
    }

    #[must_use]
    /// Outline siblings of a node in document order, the node itself included.
    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        match self.parent(id) {
            Some(parent) => self.children_at_depth(parent),
            None => vec![id],
        }
    }

    #[must_use]
    /// The outline sibling immediately before `id`.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.siblings(id);
        let pos = siblings.iter().position(|s| *s == id)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }

    #[must_use]
    /// The outline sibling immediately after `id`.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.siblings(id);
        let pos = siblings.iter().position(|s| *s == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Outline nodes at nesting depth `n`, in arena order.
    pub fn at_depth(&self, n: usize) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(move |(_, s)| s.level == Some(n))
            .map(|(id, _)| id)
    }

    /// Content regions owned by nodes at depth `n`: each node's own heading and body, followed
    /// by the plain content nodes it carries.
    pub fn content_at_depth(&self, n: usize) -> impl Iterator<Item = NodeId> + '_ {
        self.at_depth(n).flat_map(move |id| self.region(id))
    }

    #[must_use]
    /// Content region of `node`: the node itself plus its plain content children.
    pub fn region(&self, node: NodeId) -> Vec<NodeId> {
        let Some(section) = self.get(node) else {
            return Vec::new();
        };
        std::iter::once(node)
            .chain(
                section
                    .children_indices
                    .iter()
                    .copied()
                    .filter(|child| self.level_of(*child).is_none()),
            )
            .collect()
    }

    #[must_use]
    /// Node carrying the given structural identifier.
    pub fn find_anchor(&self, anchor: &str) -> Option<NodeId> {
        self.anchors.get(anchor).copied()
    }

    #[must_use]
    /// Node addressed by a section number.
    pub fn resolve(&self, path: &SectionPath) -> Option<NodeId> {
        self.find_anchor(&path.container_id())
    }

    #[must_use]
    /// Section number of a node; `None` for the root and plain content.
    pub fn path_of(&self, id: NodeId) -> Option<SectionPath> {
        let mut numbers = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            let pos = self
                .children_at_depth(parent)
                .iter()
                .position(|c| *c == current)?;
            numbers.push(pos + 1);
            current = parent;
        }
        numbers.reverse();
        SectionPath::new(numbers)
    }

    #[must_use]
    /// Chain of nodes from the root down to `id`, both included.
    pub fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).map(|_| id);
        while let Some(node) = current {
            chain.push(node);
            current = self.parent(node);
        }
        chain.reverse();
        chain
    }

    #[must_use]
    /// Looks up a list item.
    pub fn item(&self, id: ItemId) -> Option<&ListItem> {
        self.items.get(id.0)
    }

    #[must_use]
    /// Number of list items across all sections.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    /// Top-level list items in the body of `node`, in document order.
    pub fn list_roots(&self, node: NodeId) -> Vec<ItemId> {
        self.get(node)
            .map(|section| {
                section
                    .body
                    .iter()
                    .filter_map(|block| match block {
                        Block::List { items } => Some(items.iter().copied()),
                        _ => None,
                    })
                    .flatten()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
