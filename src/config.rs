//! Configuration to acknowledge presenter preferences as well as set defaults.
//!
//! Specifically, we try to find a lectern.toml, and if present we load settings from there.
//! This provides wrapping width, file extensions, the jump prompt hint and the code theme.

use facet::Facet;
use std::fs;

#[derive(Facet, Clone)]
/// User preferences loaded from lectern.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 100)]
    /// Maximum line width for slide text wrapping.
    pub wrap_width: usize,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = "5.2".to_string())]
    /// Example section number shown in the jump prompt.
    pub jump_hint: String,
    #[facet(default = "base16-ocean.dark".to_string())]
    /// Syntect theme used for fenced code blocks.
    pub theme: String,
}

impl Config {
    #[must_use]
    /// Load configuration from lectern.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string("lectern.toml") {
            match facet_toml::from_str::<Self>(&contents) {
                Ok(config) => return config,
                Err(e) => log::warn!("ignoring lectern.toml: {e}"),
            }
        }
        Self::from_toml("").unwrap()
    }

    /// Parse configuration from TOML text, filling in defaults.
    ///
    /// # Errors
    ///
    /// Returns the parser's message if the text is not valid configuration.
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        facet_toml::from_str::<Self>(contents).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
