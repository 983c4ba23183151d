//! View configuration.
//!
//! Everything that changes the geometry of the rendered rows lives here: the pixel height of a
//! text row and the soft wrapping policy. A config can be built in code or read from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::soft_wrap::{DEFAULT_TAB_WIDTH, WrapIndent, WrapMode};

/// Default height of a text row, in pixels.
pub const DEFAULT_LINE_HEIGHT: u32 = 16;

/// Default viewport width, in character cells.
pub const DEFAULT_VIEWPORT_WIDTH: usize = 80;

/// Geometry settings for an [`EditorView`](crate::EditorView).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Height of one text row, in pixels. Must be non-zero.
    pub line_height: u32,
    /// Viewport width in character cells. `0` disables soft wrapping.
    pub viewport_width: usize,
    /// Tab width in cells.
    pub tab_width: usize,
    /// Soft wrapping mode.
    pub wrap_mode: WrapMode,
    /// Indentation of wrapped continuation rows.
    pub wrap_indent: WrapIndent,
}

impl ViewConfig {
    /// Create a config with the given row height and defaults for everything else.
    pub fn with_line_height(line_height: u32) -> Self {
        Self {
            line_height,
            ..Self::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ViewConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config for values the layout cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.line_height == 0 {
            return Err(LayoutError::InvalidConfig(
                "line_height must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Tab width clamped to at least one cell.
    pub fn effective_tab_width(&self) -> usize {
        self.tab_width.max(1)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            line_height: DEFAULT_LINE_HEIGHT,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            tab_width: DEFAULT_TAB_WIDTH,
            wrap_mode: WrapMode::Char,
            wrap_indent: WrapIndent::None,
        }
    }
}
