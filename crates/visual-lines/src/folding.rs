//! Code Folding
//!
//! Fold regions are offset ranges that collapse to a single visual line. Regions may nest, but
//! never cross each other. The visual line cursor only sees the *top-level collapsed* regions,
//! which are kept in a cached, sorted, non-overlapping list.

use std::cmp::Reverse;

use crate::error::{LayoutError, Result};
use crate::metrics::TextLines;

/// Fold region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldRegion {
    /// Start offset (inclusive). Stays visible when collapsed.
    pub start: usize,
    /// End offset (inclusive). Line starts in `start + 1..=end` are hidden when collapsed.
    pub end: usize,
    /// Whether folded
    pub is_collapsed: bool,
    /// Placeholder text shown when folded (e.g., "[...]")
    pub placeholder: String,
}

impl FoldRegion {
    /// Create an expanded region over `start..=end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            is_collapsed: false,
            placeholder: String::from("[...]"),
        }
    }

    /// Expand
    pub fn expand(&mut self) {
        self.is_collapsed = false;
    }

    /// Collapse
    pub fn collapse(&mut self) {
        self.is_collapsed = true;
    }

    /// Toggle fold state
    pub fn toggle(&mut self) {
        self.is_collapsed = !self.is_collapsed;
    }

    /// Whether `offset` lies within `start..=end`.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// Whether a line starting at `offset` would be hidden by this region when collapsed.
    pub fn swallows(&self, offset: usize) -> bool {
        offset > self.start && offset <= self.end
    }

    fn encloses(&self, other: &FoldRegion) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    fn crosses(&self, start: usize, end: usize) -> bool {
        (start < self.start && self.start < end && end < self.end)
            || (self.start < start && start < self.end && self.end < end)
    }
}

/// Folding manager
#[derive(Debug, Default)]
pub struct FoldingManager {
    /// All regions, sorted by `(start, Reverse(end))` so parents precede their children.
    regions: Vec<FoldRegion>,
    /// Collapsed regions not enclosed by another collapsed region.
    top_level: Vec<FoldRegion>,
}

impl FoldingManager {
    /// Create an empty folding manager.
    pub fn new() -> Self {
        Self::default()
    }

    fn rebuild_top_level(&mut self) {
        self.top_level.clear();
        for region in self.regions.iter().filter(|r| r.is_collapsed) {
            if let Some(last) = self.top_level.last()
                && last.encloses(region)
            {
                continue;
            }
            self.top_level.push(region.clone());
        }
    }

    /// Add a region, keeping the list sorted. `text_len` bounds the region's end.
    ///
    /// Fails if the range is empty or out of bounds, or if it crosses or duplicates an existing
    /// region.
    pub fn add_region(&mut self, region: FoldRegion, text_len: usize) -> Result<()> {
        let (start, end) = (region.start, region.end);
        if start >= end || end > text_len {
            return Err(LayoutError::InvalidFoldRange { start, end });
        }
        if self
            .regions
            .iter()
            .any(|r| r.crosses(start, end) || (r.start == start && r.end == end))
        {
            return Err(LayoutError::OverlappingFoldRegion { start, end });
        }

        let key = (start, Reverse(end));
        let pos = self
            .regions
            .partition_point(|r| (r.start, Reverse(r.end)) < key);
        tracing::trace!(start, end, collapsed = region.is_collapsed, "add fold region");
        self.regions.insert(pos, region);
        self.rebuild_top_level();
        Ok(())
    }

    /// Add a region covering logical lines `first_line..=last_line` of `document`.
    ///
    /// When collapsed, the region shows as a single visual line starting at `first_line`.
    pub fn add_line_region(
        &mut self,
        document: &dyn TextLines,
        first_line: usize,
        last_line: usize,
        collapsed: bool,
    ) -> Result<()> {
        let start = document.line_start_offset(first_line);
        let end = document.line_end_offset(last_line);
        if first_line >= last_line || last_line >= document.line_count() {
            return Err(LayoutError::InvalidFoldRange { start, end });
        }
        let mut region = FoldRegion::new(start, end);
        region.is_collapsed = collapsed;
        self.add_region(region, document.text_len())
    }

    /// Remove the region exactly matching `start..=end`.
    pub fn remove_region(&mut self, start: usize, end: usize) -> bool {
        let Some(pos) = self
            .regions
            .iter()
            .position(|r| r.start == start && r.end == end)
        else {
            return false;
        };
        self.regions.remove(pos);
        self.rebuild_top_level();
        true
    }

    fn innermost_index_at(&self, offset: usize) -> Option<usize> {
        // Later entries containing `offset` are nested inside earlier ones.
        self.regions
            .iter()
            .enumerate()
            .take_while(|(_, r)| r.start <= offset)
            .filter(|(_, r)| r.contains(offset))
            .map(|(i, _)| i)
            .last()
    }

    fn update_innermost(&mut self, offset: usize, f: impl FnOnce(&mut FoldRegion)) -> bool {
        let Some(idx) = self.innermost_index_at(offset) else {
            return false;
        };
        f(&mut self.regions[idx]);
        self.rebuild_top_level();
        true
    }

    /// Collapse the innermost region containing `offset`.
    pub fn collapse_at(&mut self, offset: usize) -> bool {
        self.update_innermost(offset, FoldRegion::collapse)
    }

    /// Expand the innermost region containing `offset`.
    pub fn expand_at(&mut self, offset: usize) -> bool {
        self.update_innermost(offset, FoldRegion::expand)
    }

    /// Toggle the innermost region containing `offset`.
    pub fn toggle_at(&mut self, offset: usize) -> bool {
        self.update_innermost(offset, FoldRegion::toggle)
    }

    /// Get the innermost region containing `offset`.
    pub fn region_at(&self, offset: usize) -> Option<&FoldRegion> {
        self.innermost_index_at(offset).map(|idx| &self.regions[idx])
    }

    /// Expand all folds
    pub fn expand_all(&mut self) {
        self.regions.iter_mut().for_each(FoldRegion::expand);
        self.rebuild_top_level();
    }

    /// Collapse all regions
    pub fn collapse_all(&mut self) {
        self.regions.iter_mut().for_each(FoldRegion::collapse);
        self.rebuild_top_level();
    }

    /// Remove every region.
    pub fn clear(&mut self) {
        self.regions.clear();
        self.top_level.clear();
    }

    /// Get all fold regions, parents before children.
    pub fn regions(&self) -> &[FoldRegion] {
        &self.regions
    }

    /// Collapsed regions not enclosed by another collapsed region, sorted by start offset.
    pub fn top_level_collapsed(&self) -> &[FoldRegion] {
        &self.top_level
    }

    /// Index (into [`top_level_collapsed`](Self::top_level_collapsed)) of the last collapsed
    /// region starting before `offset`.
    pub fn last_collapsed_region_before(&self, offset: usize) -> Option<usize> {
        last_region_before(&self.top_level, offset)
    }

    /// Whether a line starting at `offset` is hidden by a collapsed region.
    pub fn is_collapsed_offset(&self, offset: usize) -> bool {
        self.last_collapsed_region_before(offset)
            .is_some_and(|idx| self.top_level[idx].swallows(offset))
    }
}

/// Index of the last region in `regions` (sorted by start) whose start is before `offset`.
pub fn last_region_before(regions: &[FoldRegion], offset: usize) -> Option<usize> {
    regions
        .partition_point(|r| r.start < offset)
        .checked_sub(1)
}
