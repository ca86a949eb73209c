//! Dotted section numbers used for direct jumps.
//!
//! `5.2` addresses the second subsection of the fifth section. The numbering is folded into a
//! structural identifier (`outline-container-sec-5-2`) which outline nodes carry as their
//! anchor, mirroring the ids of exported outline markup.

use crate::error::SlideError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const CONTAINER_PREFIX: &str = "outline-container-sec";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
/// Non-empty sequence of 1-based section numbers.
pub struct SectionPath(Vec<usize>);

impl SectionPath {
    #[must_use]
    /// Builds a path from its numbers, rejecting empty sequences and zeroes.
    pub fn new(numbers: Vec<usize>) -> Option<Self> {
        if numbers.is_empty() || numbers.contains(&0) {
            None
        } else {
            Some(Self(numbers))
        }
    }

    #[must_use]
    /// Section numbers from the top level down.
    pub fn numbers(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    /// Depth of the addressed node; the document root sits one above the first number.
    pub fn depth(&self) -> usize {
        self.0.len() + 1
    }

    #[must_use]
    /// Path of the `n`th (1-based) child of this section.
    pub fn child(&self, n: usize) -> Self {
        let mut numbers = self.0.clone();
        numbers.push(n);
        Self(numbers)
    }

    #[must_use]
    /// Structural identifier addressing the section, e.g. `outline-container-sec-5-2`.
    pub fn container_id(&self) -> String {
        self.0
            .iter()
            .fold(CONTAINER_PREFIX.to_string(), |id, n| format!("{id}-{n}"))
    }
}

impl FromStr for SectionPath {
    type Err = SlideError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || SlideError::InvalidPathFormat {
            input: input.to_string(),
        };

        let numbers = input
            .trim()
            .split('.')
            .map(|segment| segment.trim().parse::<usize>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(numbers).ok_or_else(invalid)
    }
}

impl fmt::Display for SectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

impl From<SectionPath> for String {
    fn from(path: SectionPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "tests/path.rs"]
mod tests;
