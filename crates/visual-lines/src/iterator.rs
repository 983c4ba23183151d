//! Visual Line Iteration
//!
//! [`VisualLinesIterator`] walks the rendered rows of a document in order. A row ("visual
//! line") starts either at a logical line start that is not hidden by a collapsed fold, or at
//! a soft wrap. While stepping, the cursor accumulates the top y-coordinate of each row,
//! accounting for block inlays and for inline inlays taller than the text row.
//!
//! The cursor borrows its collaborators through [`LayoutInputs`] and never mutates them. It is
//! cheap to create, so callers make a new one whenever the document or layout changes.
//!
//! ```rust
//! use visual_lines::{LayoutInputs, LineIndex, VisualLinesIterator};
//!
//! let doc = LineIndex::from_text("abc\ndef");
//! let rows: Vec<_> = VisualLinesIterator::from_document_start(LayoutInputs::plain(&doc, 10))
//!     .map(|line| (line.start_offset, line.y))
//!     .collect();
//! assert_eq!(rows, vec![(0, 0), (4, 10)]);
//! ```

use std::cell::Cell;
use std::iter::FusedIterator;

use crate::error::{LayoutError, Result};
use crate::folding::FoldRegion;
use crate::metrics::{LayoutInputs, ViewMetrics};

/// Snapshot of one visual line, as yielded by [`VisualLinesIterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualLine {
    /// Visual line index.
    pub index: usize,
    /// Offset of the first character on the row.
    pub start_offset: usize,
    /// Offset just past the last character on the row.
    pub end_offset: usize,
    /// Logical line containing `start_offset`.
    pub logical_line: usize,
    /// Index of the first top-level collapsed fold region on this or a following row.
    pub fold_region_index: usize,
    /// Index of the soft wrap this row starts at, or of the last wrap before it.
    pub soft_wrap_index: Option<usize>,
    /// Index of the first inlay at or after `start_offset`.
    pub inlay_index: usize,
    /// Top y-coordinate, in pixels.
    pub y: u32,
    /// Row height including inline inlays, in pixels.
    pub height: u32,
}

/// Cursor state. Every index field is a watermark: it points at the first element that has
/// not been passed yet, and only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Location {
    visual_line: usize,
    /// Start offset of the current row; `None` once iteration is finished.
    offset: Option<usize>,
    /// Logical line containing `offset`. Line starts after it have not been scanned yet.
    logical_line: usize,
    /// First collapsed region whose start is not before the current row start.
    fold_region: usize,
    /// First soft wrap strictly after the current row start.
    soft_wrap: usize,
    /// First inlay at or after the current row start.
    inlay: usize,
    y: u32,
}

impl Location {
    const fn first() -> Self {
        Self {
            visual_line: 0,
            offset: Some(0),
            logical_line: 0,
            fold_region: 0,
            soft_wrap: 0,
            inlay: 0,
            y: 0,
        }
    }

    const fn finished() -> Self {
        Self {
            offset: None,
            ..Self::first()
        }
    }

    fn at(inputs: &LayoutInputs<'_>, metrics: &dyn ViewMetrics, visual_line: usize) -> Self {
        if visual_line >= metrics.visible_line_count() {
            return Self::finished();
        }
        if visual_line == 0 {
            return Self::first();
        }

        let offset = metrics.visual_line_start_offset(visual_line);
        Self {
            visual_line,
            offset: Some(offset),
            logical_line: inputs.document.line_of_offset(offset),
            fold_region: inputs.fold_regions.partition_point(|r| r.start < offset),
            soft_wrap: inputs.soft_wraps.partition_point(|w| w.offset <= offset),
            inlay: inputs.inlays.partition_point(|i| i.offset < offset),
            y: metrics.y_of_visual_line(visual_line),
        }
    }

    /// State of the row following this one.
    fn next(&self, inputs: &LayoutInputs<'_>) -> Self {
        let mut next = *self;
        next.visual_line += 1;

        let pending_wrap = inputs.soft_wraps.get(self.soft_wrap).map(|w| w.offset);
        let Some(offset) = next.scan_next_row_start(inputs, pending_wrap) else {
            next.offset = None;
            return next;
        };
        next.offset = Some(offset);
        if pending_wrap == Some(offset) {
            next.soft_wrap += 1;
        }

        while inputs
            .fold_regions
            .get(next.fold_region)
            .is_some_and(|r| r.start < offset)
        {
            next.fold_region += 1;
        }

        next.y = next.y.saturating_add(inputs.line_height);
        let mut inline_max = inputs.line_height;
        while let Some(inlay) = inputs.inlays.get(next.inlay).filter(|i| i.offset < offset) {
            next.inlay += 1;
            if inlay.is_block() {
                next.y = next.y.saturating_add(inlay.height);
            } else if inlay.height > inline_max {
                next.y = next.y.saturating_add(inlay.height - inline_max);
                inline_max = inlay.height;
            }
        }

        next
    }

    /// Earliest row start after the current one: the pending wrap, or the next logical line
    /// start not swallowed by a collapsed fold. Swallowed lines still move `logical_line`.
    fn scan_next_row_start(
        &mut self,
        inputs: &LayoutInputs<'_>,
        pending_wrap: Option<usize>,
    ) -> Option<usize> {
        let document = inputs.document;
        while self.logical_line + 1 < document.line_count() {
            let line_start = document.line_start_offset(self.logical_line + 1);
            if pending_wrap.is_some_and(|wrap| line_start > wrap) {
                return pending_wrap;
            }
            self.logical_line += 1;
            if !self.is_collapsed(inputs.fold_regions, line_start) {
                return Some(line_start);
            }
        }
        pending_wrap
    }

    fn is_collapsed(&mut self, regions: &[FoldRegion], line_start: usize) -> bool {
        while let Some(region) = regions.get(self.fold_region) {
            if line_start <= region.start {
                return false;
            }
            if line_start <= region.end {
                return true;
            }
            self.fold_region += 1;
        }
        false
    }
}

/// Forward-only cursor over visual lines.
///
/// Positional accessors panic once [`at_end`](Self::at_end) returns `true`; check it first
/// (or use the [`Iterator`] impl, which does).
pub struct VisualLinesIterator<'a> {
    inputs: LayoutInputs<'a>,
    location: Location,
    /// One-step lookahead used for end offsets; dropped on every advance.
    lookahead: Cell<Option<Location>>,
}

impl<'a> VisualLinesIterator<'a> {
    /// Position a cursor at `start_visual_line`.
    ///
    /// `metrics` is only consulted here. A start line outside `0..visible_line_count()` yields a
    /// cursor that is already at its end.
    pub fn new(
        inputs: LayoutInputs<'a>,
        metrics: &dyn ViewMetrics,
        start_visual_line: usize,
    ) -> Self {
        let location = Location::at(&inputs, metrics, start_visual_line);
        Self {
            inputs,
            location,
            lookahead: Cell::new(None),
        }
    }

    /// Position a cursor at the first visual line without consulting any view metrics.
    pub fn from_document_start(inputs: LayoutInputs<'a>) -> Self {
        Self {
            inputs,
            location: Location::first(),
            lookahead: Cell::new(None),
        }
    }

    /// Whether the cursor has moved past the last visual line.
    pub fn at_end(&self) -> bool {
        self.location.offset.is_none()
    }

    /// Move to the next visual line.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at its end.
    #[track_caller]
    pub fn advance(&mut self) {
        if self.try_advance().is_err() {
            iteration_finished();
        }
    }

    /// Move to the next visual line, or fail with [`LayoutError::IterationFinished`].
    pub fn try_advance(&mut self) -> Result<()> {
        if self.at_end() {
            return Err(LayoutError::IterationFinished);
        }
        self.location = match self.lookahead.take() {
            Some(next) => next,
            None => self.location.next(&self.inputs),
        };
        Ok(())
    }

    /// Index of the current visual line.
    #[track_caller]
    pub fn visual_line(&self) -> usize {
        self.check_end();
        self.location.visual_line
    }

    /// Offset where the current visual line starts.
    #[track_caller]
    pub fn start_offset(&self) -> usize {
        match self.location.offset {
            Some(offset) => offset,
            None => iteration_finished(),
        }
    }

    /// Offset where the current visual line ends.
    ///
    /// A row ending at a soft wrap ends at the wrap offset; a row ending at a newline ends at
    /// the end of the last logical line it shows; the last row ends at the text length.
    #[track_caller]
    pub fn end_offset(&self) -> usize {
        self.check_end();
        let next = self.lookahead();
        let document = self.inputs.document;
        match next.offset {
            None => document.text_len(),
            Some(offset) if next.soft_wrap != self.location.soft_wrap => offset,
            Some(_) => document.line_end_offset(next.logical_line - 1),
        }
    }

    /// Logical line containing the start of the current visual line.
    #[track_caller]
    pub fn start_logical_line(&self) -> usize {
        self.check_end();
        self.location.logical_line
    }

    /// Index of the soft wrap the current row starts at, or of the last wrap before it.
    #[track_caller]
    pub fn start_or_prev_wrap_index(&self) -> Option<usize> {
        self.check_end();
        self.location.soft_wrap.checked_sub(1)
    }

    /// Index of the first collapsed fold region on the current or a following row.
    #[track_caller]
    pub fn start_fold_index(&self) -> usize {
        self.check_end();
        self.location.fold_region
    }

    /// Index of the first inlay at or after the start of the current row.
    #[track_caller]
    pub fn inlay_index(&self) -> usize {
        self.check_end();
        self.location.inlay
    }

    /// Top y-coordinate of the current row, in pixels.
    #[track_caller]
    pub fn y(&self) -> u32 {
        self.check_end();
        self.location.y
    }

    /// Height of the current row: the line height, or the tallest inline inlay on the row if
    /// that is taller. Does not move the cursor.
    #[track_caller]
    pub fn inline_inlays_height(&self) -> u32 {
        let start = self.start_offset();
        let end = self.end_offset();
        let mut height = self.inputs.line_height;
        for inlay in &self.inputs.inlays[self.location.inlay..] {
            // On a non-empty row, an inlay exactly at the end belongs to the next row.
            if inlay.offset > end || (inlay.offset == end && end > start) {
                break;
            }
            if inlay.is_inline() {
                height = height.max(inlay.height);
            }
        }
        height
    }

    /// Snapshot of the current row.
    #[track_caller]
    pub fn current(&self) -> VisualLine {
        VisualLine {
            index: self.visual_line(),
            start_offset: self.start_offset(),
            end_offset: self.end_offset(),
            logical_line: self.location.logical_line,
            fold_region_index: self.location.fold_region,
            soft_wrap_index: self.location.soft_wrap.checked_sub(1),
            inlay_index: self.location.inlay,
            y: self.location.y,
            height: self.inline_inlays_height(),
        }
    }

    fn lookahead(&self) -> Location {
        match self.lookahead.get() {
            Some(next) => next,
            None => {
                let next = self.location.next(&self.inputs);
                self.lookahead.set(Some(next));
                next
            }
        }
    }

    #[track_caller]
    fn check_end(&self) {
        if self.at_end() {
            iteration_finished();
        }
    }
}

impl Iterator for VisualLinesIterator<'_> {
    type Item = VisualLine;

    fn next(&mut self) -> Option<VisualLine> {
        if self.at_end() {
            return None;
        }
        let line = self.current();
        self.advance();
        Some(line)
    }
}

impl FusedIterator for VisualLinesIterator<'_> {}

impl std::fmt::Debug for VisualLinesIterator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualLinesIterator")
            .field("inputs", &self.inputs)
            .field("location", &self.location)
            .finish()
    }
}

#[cold]
#[track_caller]
fn iteration_finished() -> ! {
    panic!("visual line iteration finished")
}
