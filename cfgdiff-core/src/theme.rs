//! Color themes for diff rendering.

use owo_colors::Rgb;

use crate::SemanticColor;

/// Color theme for diff rendering.
///
/// Defines colors for the different kinds of change. The default uses
/// Tokyo Night colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTheme {
    /// Color for removed content (default: red)
    pub removed: Rgb,

    /// Color for added content (default: green)
    pub added: Rgb,

    /// Color for modified values (default: orange)
    pub modified: Rgb,

    /// Color for structural elements like unchanged tags (default: gray)
    pub structure: Rgb,

    /// Color for unchanged text content (default: white)
    pub value: Rgb,
}

impl Default for DiffTheme {
    fn default() -> Self {
        Self::TOKYO_NIGHT
    }
}

impl DiffTheme {
    /// Tokyo Night color theme (default).
    pub const TOKYO_NIGHT: Self = Self {
        removed: Rgb(247, 118, 142),  // red
        added: Rgb(158, 206, 106),    // green
        modified: Rgb(224, 175, 104), // orange
        structure: Rgb(86, 95, 137),  // gray
        value: Rgb(192, 202, 245),    // white
    };

    /// High-contrast theme for light backgrounds.
    pub const LIGHT: Self = Self {
        removed: Rgb(204, 0, 0),
        added: Rgb(0, 170, 0),
        modified: Rgb(255, 136, 0),
        structure: Rgb(107, 114, 128),
        value: Rgb(55, 65, 81),
    };

    /// Get the color for a semantic color role.
    pub const fn color_for(&self, color: SemanticColor) -> Rgb {
        match color {
            SemanticColor::Removed => self.removed,
            SemanticColor::Added => self.added,
            SemanticColor::Modified => self.modified,
            SemanticColor::Structure => self.structure,
            SemanticColor::Value => self.value,
        }
    }
}
