#![warn(missing_docs)]
//! Visual Lines - Headless Row Layout for Code Editors
//!
//! # Overview
//!
//! `visual-lines` maps a text document onto the rows ("visual lines") an editor actually paints.
//! A row can show several logical lines (when a fold is collapsed) or only part of one (when
//! the line is soft wrapped), and its height can grow because of inlays. The crate does no
//! rendering. It tells a renderer which text goes on which row and at what y-coordinate.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditorView (row table, viewport queries)   │  ← Host / Public API
//! ├─────────────────────────────────────────────┤
//! │  VisualLinesIterator (forward-only cursor)  │  ← Row Layout
//! ├─────────────────────────────────────────────┤
//! │  Folding · Soft Wraps · Inlays              │  ← Layout Models
//! ├─────────────────────────────────────────────┤
//! │  Line Index (Rope-based)                    │  ← Line Access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use visual_lines::{EditorView, ViewConfig};
//!
//! let mut view = EditorView::new("abc\ndef\nghi", ViewConfig::with_line_height(10)).unwrap();
//! view.fold_lines(1, 2, true).unwrap();
//!
//! let rows: Vec<(usize, u32)> = view
//!     .visual_lines(0)
//!     .map(|line| (line.start_offset, line.y))
//!     .collect();
//! assert_eq!(rows, vec![(0, 0), (4, 10)]);
//! ```
//!
//! # Module Description
//!
//! - [`line_index`] - Rope based line index
//! - [`folding`] - Fold regions and the folding manager
//! - [`soft_wrap`] - Headless soft wrapping
//! - [`inlays`] - Inline and block inlays
//! - [`metrics`] - Collaborator traits consumed by the cursor
//! - [`iterator`] - The visual line cursor
//! - [`view`] - Document + layout models + row table
//! - [`config`] - View configuration
//!
//! # Units
//!
//! Offsets are counted in Unicode scalar values (`char`). Heights and y-coordinates are pixels.

pub mod config;
mod error;
pub mod folding;
pub mod inlays;
pub mod iterator;
pub mod line_index;
pub mod metrics;
pub mod soft_wrap;
pub mod view;

pub use config::ViewConfig;
pub use error::{LayoutError, Result};
pub use folding::{FoldRegion, FoldingManager};
pub use inlays::{Inlay, InlayId, InlayKind, InlayModel};
pub use iterator::{VisualLine, VisualLinesIterator};
pub use line_index::LineIndex;
pub use metrics::{LayoutInputs, TextLines, ViewMetrics};
pub use soft_wrap::{SoftWrap, SoftWrapModel, WrapIndent, WrapMode};
pub use view::{EditorView, RowStart, VisualLineTable};
