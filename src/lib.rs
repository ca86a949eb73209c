//! lectern: keyboard-driven slide presentations for outline documents.
//!
//! A markdown document is parsed into an [`outline::Outline`]; a [`slide::Slide`] walks it
//! depth-first or by direct section number, and projects its position onto a
//! [`presentation::Presentation`] that the terminal UI renders.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod error;
pub mod formats;
pub mod input;
pub mod outline;
pub mod path;
pub mod presentation;
pub mod section;
pub mod slide;
pub mod ui;

#[cfg(test)]
#[path = "tests/fixtures.rs"]
mod fixtures;
