use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by the layout models and the visual line cursor.
pub enum LayoutError {
    #[error("visual line iteration finished")]
    /// The cursor was advanced after it had already reached the end.
    IterationFinished,

    #[error("invalid fold range {start}..={end}")]
    /// A fold region was empty, reversed, or extended past the end of the text.
    InvalidFoldRange {
        /// Region start offset.
        start: usize,
        /// Region end offset.
        end: usize,
    },

    #[error("fold region {start}..={end} partially overlaps an existing region")]
    /// A fold region crossed the boundary of an existing region (or duplicated it).
    OverlappingFoldRegion {
        /// Region start offset.
        start: usize,
        /// Region end offset.
        end: usize,
    },

    #[error("offset {offset} is out of bounds (text length {len})")]
    /// An anchor offset was past the end of the document.
    OffsetOutOfBounds {
        /// The rejected offset.
        offset: usize,
        /// Text length in chars.
        len: usize,
    },

    #[error("invalid configuration: {0}")]
    /// A configuration value failed validation.
    InvalidConfig(String),

    #[error("configuration parse error: {0}")]
    /// The configuration document was not valid JSON for [`ViewConfig`](crate::ViewConfig).
    ConfigParse(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;
