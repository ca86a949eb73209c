//! Failures raised by slide construction and navigation.
//!
//! None of these are fatal: movement failures mean "stay put" and jump failures are reported
//! to the user, after which the presentation carries on with the previous slide.

use crate::path::SectionPath;
use crate::section::NodeId;
use std::fmt;
use thiserror::Error;

/// Result alias for slide operations.
pub type SlideResult<T> = Result<T, SlideError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Direction of a movement, carried by [`SlideError::NoMoreNodes`].
pub enum Direction {
    /// Towards the parent section.
    Up,
    /// Into the first child section.
    Down,
    /// To the previous sibling.
    Left,
    /// To the next sibling.
    Right,
    /// Depth-first forward traversal.
    Next,
    /// Backward traversal.
    Prev,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "above",
            Self::Down => "below",
            Self::Left => "before",
            Self::Right => "after",
            Self::Next => "ahead",
            Self::Prev => "behind",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons a slide could not be built or moved.
pub enum SlideError {
    /// Construction was handed no node at all.
    #[error("no section to build a slide from")]
    EmptyReference,
    /// The node carries no depth tag and is not navigable.
    #[error("node {0} is not an outline section")]
    MalformedNode(NodeId),
    /// Traversal is exhausted in the given direction.
    #[error("no more sections {0}")]
    NoMoreNodes(Direction),
    /// A jump target does not exist in the outline.
    #[error("section {path} does not exist")]
    PathNotFound {
        /// The path that was attempted.
        path: SectionPath,
    },
    /// A jump string is not a dotted list of positive integers.
    #[error("{input:?} is not a section number")]
    InvalidPathFormat {
        /// Raw user input.
        input: String,
    },
}
