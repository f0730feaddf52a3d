//! Color backends for diff rendering.
//!
//! The renderer only knows about semantic roles (removed, added, modified,
//! structure, value); a backend decides how those roles are actually
//! styled when lines are turned into strings.

use std::fmt::Write;

use owo_colors::OwoColorize;

use crate::DiffTheme;

/// Semantic color role for rendered diff content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticColor {
    /// Removed content (typically red)
    Removed,
    /// Added content (typically green)
    Added,
    /// Modified values (typically orange)
    Modified,
    /// Structural elements like unchanged tags (muted)
    Structure,
    /// Unchanged text content
    Value,
}

/// A backend that decides how to render semantic colors.
pub trait ColorBackend {
    /// Write styled text to the output.
    fn write_styled<W: Write>(
        &self,
        w: &mut W,
        text: &str,
        color: SemanticColor,
    ) -> std::fmt::Result;
}

/// Plain backend - no styling, just plain text.
///
/// Use this for tests and non-terminal output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainBackend;

impl ColorBackend for PlainBackend {
    fn write_styled<W: Write>(
        &self,
        w: &mut W,
        text: &str,
        _color: SemanticColor,
    ) -> std::fmt::Result {
        write!(w, "{}", text)
    }
}

/// ANSI backend - emits ANSI escape codes for terminal colors.
#[derive(Debug, Clone)]
pub struct AnsiBackend {
    theme: DiffTheme,
}

impl AnsiBackend {
    /// Create a new ANSI backend with the given theme.
    pub fn new(theme: DiffTheme) -> Self {
        Self { theme }
    }

    /// Create a new ANSI backend with the default (Tokyo Night) theme.
    pub fn with_default_theme() -> Self {
        Self::new(DiffTheme::default())
    }
}

impl Default for AnsiBackend {
    fn default() -> Self {
        Self::with_default_theme()
    }
}

impl ColorBackend for AnsiBackend {
    fn write_styled<W: Write>(
        &self,
        w: &mut W,
        text: &str,
        color: SemanticColor,
    ) -> std::fmt::Result {
        write!(w, "{}", text.color(self.theme.color_for(color)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_backend_passes_text_through() {
        let backend = PlainBackend;
        let mut out = String::new();

        backend
            .write_styled(&mut out, "hello", SemanticColor::Removed)
            .unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn ansi_backend_emits_escape_codes() {
        let backend = AnsiBackend::default();
        let mut out = String::new();

        backend
            .write_styled(&mut out, "removed", SemanticColor::Removed)
            .unwrap();
        assert!(out.contains("\x1b["));
        assert!(out.contains("removed"));
    }
}
