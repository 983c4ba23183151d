//! Collaborator seams consumed by the visual line cursor.
//!
//! The cursor never owns the document or the layout models. It reads them through the traits
//! and the [`LayoutInputs`] bundle below, so any host can drive it with its own storage.

use crate::folding::FoldRegion;
use crate::inlays::Inlay;
use crate::soft_wrap::SoftWrap;

/// A line-indexed text buffer.
///
/// Offsets are counted in `char`. A document always has at least one (possibly empty) line.
pub trait TextLines {
    /// Number of logical lines (at least 1).
    fn line_count(&self) -> usize;

    /// Offset of the first character of `line`.
    fn line_start_offset(&self, line: usize) -> usize;

    /// Offset just past the last character of `line`, excluding its terminator.
    fn line_end_offset(&self, line: usize) -> usize;

    /// Total text length.
    fn text_len(&self) -> usize;

    /// Logical line containing `offset`.
    fn line_of_offset(&self, offset: usize) -> usize;
}

impl<T: TextLines + ?Sized> TextLines for &T {
    fn line_count(&self) -> usize {
        (**self).line_count()
    }

    fn line_start_offset(&self, line: usize) -> usize {
        (**self).line_start_offset(line)
    }

    fn line_end_offset(&self, line: usize) -> usize {
        (**self).line_end_offset(line)
    }

    fn text_len(&self) -> usize {
        (**self).text_len()
    }

    fn line_of_offset(&self, offset: usize) -> usize {
        (**self).line_of_offset(offset)
    }
}

/// Host-provided view geometry.
///
/// The cursor only consults this when it is positioned at an arbitrary visual line; stepping
/// forward is computed from [`LayoutInputs`] alone.
pub trait ViewMetrics {
    /// Height of a text row, in pixels.
    fn line_height(&self) -> u32;

    /// Number of visual lines in the view.
    fn visible_line_count(&self) -> usize;

    /// Start offset of visual line `visual_line`.
    fn visual_line_start_offset(&self, visual_line: usize) -> usize;

    /// Top y-coordinate of visual line `visual_line`.
    fn y_of_visual_line(&self, visual_line: usize) -> u32;
}

/// Borrowed, read-only view of everything that shapes the visual lines.
///
/// All three slices must be sorted by offset. `fold_regions` holds only top-level *collapsed*
/// regions, which therefore never overlap.
#[derive(Clone, Copy)]
pub struct LayoutInputs<'a> {
    /// The document.
    pub document: &'a dyn TextLines,
    /// Top-level collapsed fold regions, sorted by start offset.
    pub fold_regions: &'a [FoldRegion],
    /// Registered soft wraps, sorted by offset.
    pub soft_wraps: &'a [SoftWrap],
    /// Inlays that may extend a row's height, sorted by offset.
    pub inlays: &'a [Inlay],
    /// Height of a text row, in pixels.
    pub line_height: u32,
}

impl<'a> LayoutInputs<'a> {
    /// Inputs for a plain document: no folds, no wraps, no inlays.
    pub fn plain(document: &'a dyn TextLines, line_height: u32) -> Self {
        Self {
            document,
            fold_regions: &[],
            soft_wraps: &[],
            inlays: &[],
            line_height,
        }
    }
}

impl std::fmt::Debug for LayoutInputs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutInputs")
            .field("line_count", &self.document.line_count())
            .field("text_len", &self.document.text_len())
            .field("fold_regions", &self.fold_regions.len())
            .field("soft_wraps", &self.soft_wraps.len())
            .field("inlays", &self.inlays.len())
            .field("line_height", &self.line_height)
            .finish()
    }
}
