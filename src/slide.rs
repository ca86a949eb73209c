//! The slide cursor: which section is in focus, how focus moves, and what is on screen.
//!
//! A [`Slide`] is a small value bound to exactly one outline node and its depth. Movements never
//! mutate a slide; they either produce a new one or fail, in which case the caller keeps the
//! slide it already had. The traversal order used by the presenter is:
//!
//! ```text
//! next: down ─┬─ ok ──────────────────────────► child
//!             └─ no child ─ right ─┬─ ok ─────► sibling
//!                                  └─ last ─ up ─ right ─► parent's sibling
//! prev: left ─┬─ ok ─► sibling
//!             └─ first ─ up ─► parent
//! ```
//!
//! `prev` does not descend into the previous sibling's last descendant, so it is not an exact
//! inverse of `next` once sections have children.

use crate::error::{Direction, SlideError, SlideResult};
use crate::outline::Outline;
use crate::path::SectionPath;
use crate::presentation::Presentation;
use crate::section::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Focused section of the presentation.
pub struct Slide {
    current: NodeId,
    level: usize,
}

impl Slide {
    /// Binds a slide to `node`.
    ///
    /// # Errors
    ///
    /// Returns [`SlideError::EmptyReference`] if `node` is `None` or not part of the outline, and
    /// [`SlideError::MalformedNode`] if the node carries no depth tag.
    pub fn new(outline: &Outline, node: Option<NodeId>) -> SlideResult<Self> {
        let id = node.ok_or(SlideError::EmptyReference)?;
        let section = outline.get(id).ok_or(SlideError::EmptyReference)?;
        let level = section.level.ok_or(SlideError::MalformedNode(id))?;
        Ok(Self { current: id, level })
    }

    #[must_use]
    /// Slide over the document root, where every presentation starts.
    pub fn root(outline: &Outline) -> Self {
        let current = outline.root();
        Self {
            current,
            level: outline.level_of(current).unwrap_or(1),
        }
    }

    /// Slide over the section numbered by `input`, e.g. `"5.2"`.
    ///
    /// # Errors
    ///
    /// Returns [`SlideError::InvalidPathFormat`] if `input` is not a dotted list of positive
    /// integers, and [`SlideError::PathNotFound`] if no such section exists.
    pub fn jump(outline: &Outline, input: &str) -> SlideResult<Self> {
        let path: SectionPath = input.parse()?;
        Self::at_path(outline, &path)
    }

    /// Slide over the section addressed by `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SlideError::PathNotFound`] if no such section exists.
    pub fn at_path(outline: &Outline, path: &SectionPath) -> SlideResult<Self> {
        let node = outline
            .resolve(path)
            .ok_or_else(|| SlideError::PathNotFound { path: path.clone() })?;
        Self::new(outline, Some(node))
    }

    #[must_use]
    /// Focused node.
    pub fn current(&self) -> NodeId {
        self.current
    }

    #[must_use]
    /// Depth of the focused node, 1 at the root.
    pub fn level(&self) -> usize {
        self.level
    }

    fn step(outline: &Outline, node: Option<NodeId>, direction: Direction) -> SlideResult<Self> {
        match node {
            Some(id) => Self::new(outline, Some(id)),
            None => Err(SlideError::NoMoreNodes(direction)),
        }
    }

    /// First outline child, one level deeper.
    ///
    /// # Errors
    ///
    /// Fails with [`SlideError::NoMoreNodes`] when the section has no outline children.
    pub fn down(&self, outline: &Outline) -> SlideResult<Self> {
        let child = outline.children_at_depth(self.current).first().copied();
        Self::step(outline, child, Direction::Down)
    }

    /// Enclosing section.
    ///
    /// # Errors
    ///
    /// Fails with [`SlideError::NoMoreNodes`] at the root.
    pub fn up(&self, outline: &Outline) -> SlideResult<Self> {
        Self::step(outline, outline.parent(self.current), Direction::Up)
    }

    /// Previous outline sibling.
    ///
    /// # Errors
    ///
    /// Fails with [`SlideError::NoMoreNodes`] on the first sibling.
    pub fn left(&self, outline: &Outline) -> SlideResult<Self> {
        Self::step(outline, outline.prev_sibling(self.current), Direction::Left)
    }

    /// Next outline sibling.
    ///
    /// # Errors
    ///
    /// Fails with [`SlideError::NoMoreNodes`] on the last sibling.
    pub fn right(&self, outline: &Outline) -> SlideResult<Self> {
        Self::step(outline, outline.next_sibling(self.current), Direction::Right)
    }

    /// Depth-first successor: first child, else next sibling, else the parent's next sibling.
    ///
    /// # Errors
    ///
    /// Fails with [`SlideError::NoMoreNodes`] when all three candidates fail.
    pub fn next(&self, outline: &Outline) -> SlideResult<Self> {
        self.down(outline)
            .or_else(|_| self.right(outline))
            .or_else(|_| self.up(outline).and_then(|parent| parent.right(outline)))
            .map_err(|_| SlideError::NoMoreNodes(Direction::Next))
    }

    /// Predecessor: previous sibling, else the parent.
    ///
    /// # Errors
    ///
    /// Fails with [`SlideError::NoMoreNodes`] at the root.
    pub fn prev(&self, outline: &Outline) -> SlideResult<Self> {
        self.left(outline)
            .or_else(|_| self.up(outline))
            .map_err(|_| SlideError::NoMoreNodes(Direction::Prev))
    }

    /// Projects this slide onto `presentation`.
    ///
    /// Every content region of every populated depth band is hidden, then the focused node's own
    /// region (plain content children included) is revealed and marked emerging. Deeper bands
    /// are scanned only until the first empty one.
    pub fn show(&self, outline: &Outline, presentation: &mut Presentation) {
        for depth in 1..self.level {
            hide_band(outline, presentation, depth);
        }

        hide_band(outline, presentation, self.level);

        let mut depth = self.level + 1;
        while outline.at_depth(depth).next().is_some() {
            hide_band(outline, presentation, depth);
            depth += 1;
        }

        for node in outline.region(self.current) {
            presentation.reveal(node);
            presentation.emerge(node);
        }
        log::trace!("showing {} at level {}", self.current, self.level);
    }

    #[must_use]
    /// Structural chain from the root to the focused node.
    pub fn chain(&self, outline: &Outline) -> Vec<NodeId> {
        outline.ancestry(self.current)
    }

    #[must_use]
    /// Section number of the focused node; `None` at the root.
    pub fn path(&self, outline: &Outline) -> Option<SectionPath> {
        outline.path_of(self.current)
    }
}

fn hide_band(outline: &Outline, presentation: &mut Presentation, depth: usize) {
    for node in outline.content_at_depth(depth) {
        presentation.hide(node);
    }
}

#[cfg(test)]
#[path = "tests/slide.rs"]
mod tests;
