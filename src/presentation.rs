//! Presentation flags layered over an immutable outline.
//!
//! Two kinds of state live here. Content regions carry `shown`/`emerging` flags that the slide
//! projection recomputes on every move. List items carry a cosmetic reveal state driven by
//! expanders: lists start with their first item only, nested lists start closed, and the user
//! opens them one step at a time. Neither kind of state ever touches the tree or the slide.

use crate::outline::Outline;
use crate::section::{ItemId, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Display flags of one content region.
pub struct RegionState {
    /// Whether the region is rendered.
    pub shown: bool,
    /// Whether the region was just revealed and should be drawn as emerging.
    pub emerging: bool,
}

impl Default for RegionState {
    fn default() -> Self {
        Self {
            shown: true,
            emerging: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Reveal state of one list item.
pub struct ItemState {
    /// Whether the item itself has been revealed within its list.
    pub shown: bool,
    /// Whether the item's nested list is open.
    pub open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which part of the list an expander reveals.
pub enum ExpanderKind {
    /// Opens the nested list of the item (`→`).
    Child,
    /// Reveals the next item of the same list (`...`).
    Sibling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Clickable reveal control attached to a list item.
pub struct Expander {
    /// Item carrying the control.
    pub item: ItemId,
    /// What the control reveals.
    pub kind: ExpanderKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Visibility of every content region and list item of one outline.
pub struct Presentation {
    regions: Vec<RegionState>,
    items: Vec<ItemState>,
    highlighted: Option<ItemId>,
}

impl Presentation {
    #[must_use]
    /// Fresh state for `outline`: every region shown, lists folded to their first items.
    pub fn new(outline: &Outline) -> Self {
        let items = (0..outline.item_count())
            .map(|i| ItemState {
                shown: outline.item(ItemId(i)).is_some_and(|item| item.first_in_list),
                open: false,
            })
            .collect();

        Self {
            regions: vec![RegionState::default(); outline.node_count()],
            items,
            highlighted: None,
        }
    }

    #[must_use]
    /// Flags of the region owned by `node`.
    pub fn region(&self, node: NodeId) -> RegionState {
        self.regions.get(node.0).copied().unwrap_or(RegionState {
            shown: false,
            emerging: false,
        })
    }

    /// Hides the region owned by `node` and clears its emerging flag.
    pub fn hide(&mut self, node: NodeId) {
        if let Some(region) = self.regions.get_mut(node.0) {
            region.shown = false;
            region.emerging = false;
        }
    }

    /// Shows the region owned by `node`.
    pub fn reveal(&mut self, node: NodeId) {
        if let Some(region) = self.regions.get_mut(node.0) {
            region.shown = true;
        }
    }

    /// Marks the region owned by `node` as emerging.
    pub fn emerge(&mut self, node: NodeId) {
        if let Some(region) = self.regions.get_mut(node.0) {
            region.emerging = true;
        }
    }

    /// Nodes whose regions are currently shown.
    pub fn shown_regions(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.regions
            .iter()
            .enumerate()
            .filter(|(_, r)| r.shown)
            .map(|(i, _)| NodeId(i))
    }

    #[must_use]
    /// Reveal state of a list item.
    pub fn item(&self, id: ItemId) -> ItemState {
        self.items.get(id.0).copied().unwrap_or(ItemState {
            shown: false,
            open: false,
        })
    }

    #[must_use]
    /// Item most recently revealed by an expander.
    pub fn highlighted(&self) -> Option<ItemId> {
        self.highlighted
    }

    #[must_use]
    /// Whether an item is actually on screen: revealed, and every enclosing list open.
    pub fn is_item_visible(&self, outline: &Outline, id: ItemId) -> bool {
        let mut current = Some(id);
        let mut first = true;
        while let Some(item_id) = current {
            let state = self.item(item_id);
            if !state.shown || (!first && !state.open) {
                return false;
            }
            first = false;
            current = outline.item(item_id).and_then(|item| item.parent_item);
        }
        true
    }

    #[must_use]
    /// Expanders currently on screen in the content of `node`, in document order.
    pub fn expanders(&self, outline: &Outline, node: NodeId) -> Vec<Expander> {
        let mut found = Vec::new();
        for root in outline.list_roots(node) {
            self.collect_expanders(outline, root, &mut found);
        }
        found
    }

    fn collect_expanders(&self, outline: &Outline, id: ItemId, found: &mut Vec<Expander>) {
        let Some(item) = outline.item(id) else {
            return;
        };
        let state = self.item(id);
        if !state.shown {
            return;
        }

        if !item.children.is_empty() {
            if state.open {
                for child in &item.children {
                    self.collect_expanders(outline, *child, found);
                }
            } else {
                found.push(Expander {
                    item: id,
                    kind: ExpanderKind::Child,
                });
            }
        }

        if let Some(next) = item.next_sibling {
            if !self.item(next).shown {
                found.push(Expander {
                    item: id,
                    kind: ExpanderKind::Sibling,
                });
            }
        }
    }

    #[must_use]
    /// First pending expander in the content of `node`.
    pub fn first_expander(&self, outline: &Outline, node: NodeId) -> Option<Expander> {
        self.expanders(outline, node).into_iter().next()
    }

    /// Triggers an expander. Returns `false` when there was nothing left to reveal.
    pub fn expand(&mut self, outline: &Outline, expander: Expander) -> bool {
        let Some(item) = outline.item(expander.item) else {
            return false;
        };

        match expander.kind {
            ExpanderKind::Child => {
                let Some(first_child) = item.children.first().copied() else {
                    return false;
                };
                let Some(state) = self.items.get_mut(expander.item.0) else {
                    return false;
                };
                if state.open {
                    return false;
                }
                state.open = true;
                self.highlighted = Some(first_child);
            }
            ExpanderKind::Sibling => {
                let Some(next) = item.next_sibling else {
                    return false;
                };
                let Some(state) = self.items.get_mut(next.0) else {
                    return false;
                };
                if state.shown {
                    return false;
                }
                state.shown = true;
                self.highlighted = Some(next);
            }
        }
        true
    }

    /// Undoes an expander: closes the nested list, or hides every following item of the list.
    /// Returns `false` when there was nothing to fold.
    pub fn collapse(&mut self, outline: &Outline, expander: Expander) -> bool {
        let Some(item) = outline.item(expander.item) else {
            return false;
        };

        let changed = match expander.kind {
            ExpanderKind::Child => {
                self.items
                    .get_mut(expander.item.0)
                    .is_some_and(|state| std::mem::replace(&mut state.open, false))
            }
            ExpanderKind::Sibling => {
                let mut changed = false;
                let mut next = item.next_sibling;
                while let Some(id) = next {
                    if let Some(state) = self.items.get_mut(id.0) {
                        changed |= std::mem::replace(&mut state.shown, false);
                    }
                    next = outline.item(id).and_then(|i| i.next_sibling);
                }
                changed
            }
        };

        if changed {
            self.highlighted = Some(expander.item);
        }
        changed
    }
}

#[cfg(test)]
#[path = "tests/presentation.rs"]
mod tests;
