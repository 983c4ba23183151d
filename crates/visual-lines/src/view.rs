//! Editor View
//!
//! [`EditorView`] owns a document together with its folding, soft wrap and inlay models, and
//! keeps a table of row starts and y-coordinates up to date. It is the host side of the visual
//! line cursor: it implements [`ViewMetrics`] so cursors can be positioned at any row, and it
//! answers the usual viewport questions (which rows intersect a pixel window, which row is at a
//! given y).
//!
//! Every mutation goes through `&mut self` and triggers a relayout. A live
//! [`VisualLinesIterator`] borrows the view, so the borrow checker rules out mutating the
//! layout underneath it.

use crate::config::ViewConfig;
use crate::error::{LayoutError, Result};
use crate::folding::{FoldRegion, FoldingManager};
use crate::inlays::{InlayId, InlayKind, InlayModel};
use crate::iterator::{VisualLine, VisualLinesIterator};
use crate::line_index::LineIndex;
use crate::metrics::{LayoutInputs, ViewMetrics};
use crate::soft_wrap::SoftWrapModel;

/// Start offset and top y-coordinate of one visual line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStart {
    /// Start offset of the row.
    pub offset: usize,
    /// Top y-coordinate of the row, in pixels.
    pub y: u32,
}

/// Row starts for the whole document, computed by walking every visual line once.
#[derive(Debug, Clone, Default)]
pub struct VisualLineTable {
    rows: Vec<RowStart>,
    /// Bottom of the last row, in pixels.
    total_height: u32,
}

impl VisualLineTable {
    /// Walk all visual lines of `inputs`.
    pub fn build(inputs: LayoutInputs<'_>) -> Self {
        let mut rows = Vec::new();
        let mut last = None;
        for line in VisualLinesIterator::from_document_start(inputs) {
            rows.push(RowStart {
                offset: line.start_offset,
                y: line.y,
            });
            last = Some((line.y, line.inlay_index));
        }
        let total_height = match last {
            Some((y, inlay_index)) => bottom_of_last_row(&inputs, y, inlay_index),
            None => 0,
        };
        Self { rows, total_height }
    }

    /// Number of visual lines.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty (only before the first layout).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row `visual_line`, if it exists.
    pub fn get(&self, visual_line: usize) -> Option<RowStart> {
        self.rows.get(visual_line).copied()
    }

    /// Height of the laid out content, in pixels.
    pub fn total_height(&self) -> u32 {
        self.total_height
    }

    /// Last row whose top is at or above `y`.
    pub fn row_at_y(&self, y: u32) -> Option<usize> {
        self.rows.partition_point(|r| r.y <= y).checked_sub(1)
    }

    /// Last row whose start is at or before `offset`.
    pub fn row_of_offset(&self, offset: usize) -> Option<usize> {
        self.rows
            .partition_point(|r| r.offset <= offset)
            .checked_sub(1)
    }
}

/// Bottom of the last row, measured the way the cursor measures the step to a following row:
/// every remaining block inlay in full, plus the excess of the tallest inline inlay.
fn bottom_of_last_row(inputs: &LayoutInputs<'_>, y: u32, inlay_index: usize) -> u32 {
    let line_height = inputs.line_height;
    let mut bottom = y.saturating_add(line_height);
    let mut inline_max = line_height;
    for inlay in &inputs.inlays[inlay_index..] {
        if inlay.is_block() {
            bottom = bottom.saturating_add(inlay.height);
        } else {
            inline_max = inline_max.max(inlay.height);
        }
    }
    bottom.saturating_add(inline_max - line_height)
}

/// A document plus everything that shapes its rendered rows.
pub struct EditorView {
    document: LineIndex,
    folding: FoldingManager,
    soft_wraps: SoftWrapModel,
    inlays: InlayModel,
    config: ViewConfig,
    table: VisualLineTable,
}

impl EditorView {
    /// Create a view over `text`.
    pub fn new(text: &str, config: ViewConfig) -> Result<Self> {
        config.validate()?;
        let mut view = Self {
            document: LineIndex::from_text(text),
            folding: FoldingManager::new(),
            soft_wraps: SoftWrapModel::new(),
            inlays: InlayModel::new(),
            config,
            table: VisualLineTable::default(),
        };
        view.relayout();
        Ok(view)
    }

    /// Replace the whole text. Fold regions and inlays are dropped, since their offsets no
    /// longer refer to anything.
    pub fn set_text(&mut self, text: &str) {
        self.document.set_text(text);
        self.folding.clear();
        self.inlays.clear();
        self.relayout();
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: ViewConfig) -> Result<()> {
        config.validate()?;
        if self.config != config {
            self.config = config;
            self.relayout();
        }
        Ok(())
    }

    /// Change the viewport width (in cells), rewrapping if it changed.
    pub fn set_viewport_width(&mut self, width: usize) {
        if self.config.viewport_width != width {
            self.config.viewport_width = width;
            self.relayout();
        }
    }

    /// Add a fold region over `start..=end`.
    pub fn add_fold_region(&mut self, start: usize, end: usize, collapsed: bool) -> Result<()> {
        let mut region = FoldRegion::new(start, end);
        region.is_collapsed = collapsed;
        self.folding.add_region(region, self.document.char_count())?;
        self.relayout();
        Ok(())
    }

    /// Add a fold region over logical lines `first_line..=last_line`.
    pub fn fold_lines(&mut self, first_line: usize, last_line: usize, collapsed: bool) -> Result<()> {
        self.folding
            .add_line_region(&self.document, first_line, last_line, collapsed)?;
        self.relayout();
        Ok(())
    }

    /// Collapse the innermost fold region containing `offset`.
    pub fn collapse_fold_at(&mut self, offset: usize) -> bool {
        self.update_folding(|folding| folding.collapse_at(offset))
    }

    /// Expand the innermost fold region containing `offset`.
    pub fn expand_fold_at(&mut self, offset: usize) -> bool {
        self.update_folding(|folding| folding.expand_at(offset))
    }

    /// Toggle the innermost fold region containing `offset`.
    pub fn toggle_fold_at(&mut self, offset: usize) -> bool {
        self.update_folding(|folding| folding.toggle_at(offset))
    }

    /// Collapse every fold region.
    pub fn collapse_all_folds(&mut self) {
        self.folding.collapse_all();
        self.relayout();
    }

    /// Expand every fold region.
    pub fn expand_all_folds(&mut self) {
        self.folding.expand_all();
        self.relayout();
    }

    fn update_folding(&mut self, f: impl FnOnce(&mut FoldingManager) -> bool) -> bool {
        let changed = f(&mut self.folding);
        if changed {
            self.relayout();
        }
        changed
    }

    /// Anchor an inlay at `offset`.
    pub fn add_inlay(&mut self, offset: usize, height: u32, kind: InlayKind) -> Result<InlayId> {
        let len = self.document.char_count();
        if offset > len {
            return Err(LayoutError::OffsetOutOfBounds { offset, len });
        }
        let id = self.inlays.add(offset, height, kind);
        self.relayout();
        Ok(id)
    }

    /// Remove an inlay. Returns `false` if it was not present.
    pub fn remove_inlay(&mut self, id: InlayId) -> bool {
        let removed = self.inlays.remove(id);
        if removed {
            self.relayout();
        }
        removed
    }

    /// Remove every inlay.
    pub fn clear_inlays(&mut self) {
        if !self.inlays.is_empty() {
            self.inlays.clear();
            self.relayout();
        }
    }

    /// Recompute soft wraps and the row table.
    fn relayout(&mut self) {
        self.soft_wraps
            .rebuild(&self.document, &self.folding, &self.config);
        self.table = VisualLineTable::build(self.layout_inputs());
        tracing::debug!(
            visual_lines = self.table.len(),
            soft_wraps = self.soft_wraps.len(),
            collapsed_folds = self.folding.top_level_collapsed().len(),
            inlays = self.inlays.len(),
            "relayout"
        );
    }

    /// Borrowed inputs for a visual line cursor.
    pub fn layout_inputs(&self) -> LayoutInputs<'_> {
        LayoutInputs {
            document: &self.document,
            fold_regions: self.folding.top_level_collapsed(),
            soft_wraps: self.soft_wraps.soft_wraps(),
            inlays: self.inlays.inlays(),
            line_height: self.config.line_height,
        }
    }

    /// A cursor positioned at `start_visual_line` (already at its end if out of range).
    pub fn visual_lines(&self, start_visual_line: usize) -> VisualLinesIterator<'_> {
        VisualLinesIterator::new(self.layout_inputs(), self, start_visual_line)
    }

    /// Rows intersecting the pixel window `y_top..y_top + height`.
    ///
    /// A row spans from its top to the top of the next row, so block inlays below it count as
    /// part of it. A window starting below the content is empty.
    pub fn viewport(&self, y_top: u32, height: u32) -> Vec<VisualLine> {
        if y_top >= self.total_height() {
            return Vec::new();
        }
        let Some(first) = self.visual_line_at_y(y_top) else {
            return Vec::new();
        };
        let y_bottom = y_top.saturating_add(height);
        self.visual_lines(first)
            .take_while(|line| line.y < y_bottom)
            .collect()
    }

    /// Row containing pixel row `y`, or the last row if `y` is below the content.
    pub fn visual_line_at_y(&self, y: u32) -> Option<usize> {
        self.table.row_at_y(y)
    }

    /// Row whose text contains `offset`.
    pub fn visual_line_of_offset(&self, offset: usize) -> Option<usize> {
        self.table.row_of_offset(offset.min(self.document.char_count()))
    }

    /// Height of the whole laid out document, in pixels.
    pub fn total_height(&self) -> u32 {
        self.table.total_height()
    }

    /// The document.
    pub fn document(&self) -> &LineIndex {
        &self.document
    }

    /// The folding model.
    pub fn folding(&self) -> &FoldingManager {
        &self.folding
    }

    /// The soft wrap model.
    pub fn soft_wraps(&self) -> &SoftWrapModel {
        &self.soft_wraps
    }

    /// The inlay model.
    pub fn inlays(&self) -> &InlayModel {
        &self.inlays
    }

    /// The current configuration.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// The row table.
    pub fn table(&self) -> &VisualLineTable {
        &self.table
    }
}

impl ViewMetrics for EditorView {
    fn line_height(&self) -> u32 {
        self.config.line_height
    }

    fn visible_line_count(&self) -> usize {
        self.table.len()
    }

    fn visual_line_start_offset(&self, visual_line: usize) -> usize {
        self.table
            .get(visual_line)
            .map_or(self.document.char_count(), |row| row.offset)
    }

    fn y_of_visual_line(&self, visual_line: usize) -> u32 {
        self.table
            .get(visual_line)
            .map_or(self.table.total_height(), |row| row.y)
    }
}
