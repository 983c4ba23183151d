//! Soft Wrapping (Headless Reflow)
//!
//! Computes where logical lines break into several visual lines for a given container width.
//! Character widths follow UAX #11; tabs advance to the next tab stop. The result is a sorted
//! list of [`SoftWrap`] marks in document offsets, which is what the visual line cursor reads.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::config::ViewConfig;
use crate::folding::FoldingManager;
use crate::line_index::LineIndex;

/// Default tab width (in cells) used when a caller does not specify a tab width.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Soft wrapping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// No soft wrapping (each logical line is a single visual line).
    None,
    /// Wrap at character boundaries.
    #[default]
    Char,
    /// Prefer wrapping at word boundaries (whitespace), falling back to character wrap.
    Word,
}

/// Wrapped-line indentation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapIndent {
    /// No indentation for wrapped continuations.
    #[default]
    None,
    /// Indent continuations by the width of the line's leading whitespace.
    SameAsLineIndent,
    /// Indent continuations by a fixed number of cells.
    FixedCells(usize),
}

/// A visual line break that does not correspond to a newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftWrap {
    /// Document offset where the continuation row starts.
    pub offset: usize,
    /// Indentation (in cells) of the continuation row.
    pub indent_cells: usize,
}

impl SoftWrap {
    /// Create a wrap mark without continuation indent.
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            indent_cells: 0,
        }
    }
}

/// Calculate visual width of a character (based on UAX #11)
///
/// Return value:
/// - 1: Narrow character (ASCII, etc.)
/// - 2: Wide character (CJK, fullwidth, etc.)
/// - 0: Zero-width character (combining characters, etc.)
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Width in cells of `ch` when it starts at `cell_offset_in_line`. Tabs run to the next stop.
pub fn cell_width_at(ch: char, cell_offset_in_line: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        tab_width - cell_offset_in_line % tab_width
    } else {
        char_width(ch)
    }
}

/// Calculate total visual width of a string, interpreting `'\t'` using `tab_width`.
pub fn str_width(s: &str, tab_width: usize) -> usize {
    s.chars()
        .fold(0usize, |x, ch| x.saturating_add(cell_width_at(ch, x, tab_width)))
}

/// Indentation of continuation rows for `line_text`, never wider than the viewport allows.
pub fn wrap_indent_cells(
    line_text: &str,
    wrap_indent: WrapIndent,
    viewport_width: usize,
    tab_width: usize,
) -> usize {
    if viewport_width <= 1 {
        return 0;
    }

    let raw = match wrap_indent {
        WrapIndent::None => 0,
        WrapIndent::FixedCells(n) => n,
        WrapIndent::SameAsLineIndent => {
            let prefix_len = line_text
                .find(|c: char| c != ' ' && c != '\t')
                .unwrap_or(line_text.len());
            str_width(&line_text[..prefix_len], tab_width)
        }
    };

    raw.min(viewport_width - 1)
}

/// Char indices (within `text`) where continuation rows start.
///
/// A `viewport_width` of 0 disables wrapping.
pub fn wrap_points(
    text: &str,
    viewport_width: usize,
    tab_width: usize,
    wrap_mode: WrapMode,
    wrap_indent: WrapIndent,
) -> Vec<usize> {
    if viewport_width == 0 {
        return Vec::new();
    }
    let indent = wrap_indent_cells(text, wrap_indent, viewport_width, tab_width);
    match wrap_mode {
        WrapMode::None => Vec::new(),
        WrapMode::Char => char_wrap_points(text, viewport_width, tab_width, indent),
        WrapMode::Word => word_wrap_points(text, viewport_width, tab_width, indent),
    }
}

fn char_wrap_points(text: &str, width: usize, tab_width: usize, indent: usize) -> Vec<usize> {
    let total_chars = text.chars().count();
    let mut points = Vec::new();
    let mut x_in_segment = 0usize;
    let mut x_in_line = 0usize;

    for (char_index, ch) in text.chars().enumerate() {
        let ch_width = cell_width_at(ch, x_in_line, tab_width);

        // A wide character that does not fit moves to the next row intact.
        if x_in_segment + ch_width > width && x_in_segment > indent {
            points.push(char_index);
            x_in_segment = indent;
        }

        x_in_segment = x_in_segment.saturating_add(ch_width);
        x_in_line = x_in_line.saturating_add(ch_width);

        if x_in_segment >= width && char_index + 1 < total_chars {
            points.push(char_index + 1);
            x_in_segment = indent;
        }
    }

    points
}

fn word_wrap_points(text: &str, width: usize, tab_width: usize, indent: usize) -> Vec<usize> {
    let mut points = Vec::new();

    let mut segment_start_char = 0usize;
    let mut segment_start_x = 0usize;
    // (char_index, x_in_line) just past the last whitespace in the current segment.
    let mut last_break: Option<(usize, usize)> = None;
    let mut x_in_line = 0usize;

    for (char_index, ch) in text.chars().enumerate() {
        let ch_width = cell_width_at(ch, x_in_line, tab_width);

        loop {
            let segment_indent = if segment_start_char == 0 { 0 } else { indent };
            let x_in_segment = x_in_line - segment_start_x + segment_indent;
            if x_in_segment + ch_width <= width {
                break;
            }

            if let Some((break_char, break_x)) = last_break
                && break_char > segment_start_char
            {
                points.push(break_char);
                segment_start_char = break_char;
                segment_start_x = break_x;
                last_break = None;
                continue;
            }

            if char_index > segment_start_char {
                points.push(char_index);
                segment_start_char = char_index;
                segment_start_x = x_in_line;
                last_break = None;
            }
            break;
        }

        x_in_line = x_in_line.saturating_add(ch_width);

        if ch.is_whitespace() {
            last_break = Some((char_index + 1, x_in_line));
        }
    }

    points
}

/// Registered soft wraps for a whole document, sorted by offset.
#[derive(Debug, Clone, Default)]
pub struct SoftWrapModel {
    wraps: Vec<SoftWrap>,
}

impl SoftWrapModel {
    /// Create a model without wraps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from explicit wrap offsets (sorted and deduplicated here).
    pub fn from_offsets(offsets: impl IntoIterator<Item = usize>) -> Self {
        let mut wraps: Vec<SoftWrap> = offsets.into_iter().map(SoftWrap::new).collect();
        wraps.sort_by_key(|w| w.offset);
        wraps.dedup_by_key(|w| w.offset);
        Self { wraps }
    }

    /// Recompute wraps for every logical line of `document`.
    ///
    /// Wraps falling inside a collapsed fold are not registered: folded text is not laid out.
    pub fn rebuild(&mut self, document: &LineIndex, folding: &FoldingManager, config: &ViewConfig) {
        self.wraps.clear();
        if config.viewport_width == 0 || config.wrap_mode == WrapMode::None {
            return;
        }

        let tab_width = config.effective_tab_width();
        for line in 0..document.line_count() {
            let Some(text) = document.line_text(line) else {
                continue;
            };
            let points = wrap_points(
                &text,
                config.viewport_width,
                tab_width,
                config.wrap_mode,
                config.wrap_indent,
            );
            if points.is_empty() {
                continue;
            }

            let line_start = document.line_start(line);
            let indent_cells =
                wrap_indent_cells(&text, config.wrap_indent, config.viewport_width, tab_width);
            self.wraps.extend(
                points
                    .into_iter()
                    .map(|p| line_start + p)
                    .filter(|&offset| !folding.is_collapsed_offset(offset))
                    .map(|offset| SoftWrap {
                        offset,
                        indent_cells,
                    }),
            );
        }
    }

    /// All wraps, sorted by offset.
    pub fn soft_wraps(&self) -> &[SoftWrap] {
        &self.wraps
    }

    /// Number of registered wraps.
    pub fn len(&self) -> usize {
        self.wraps.len()
    }

    /// Whether no wraps are registered.
    pub fn is_empty(&self) -> bool {
        self.wraps.is_empty()
    }

    /// `Ok(i)` if wrap `i` sits exactly at `offset`, otherwise `Err` with the insertion point.
    pub fn soft_wrap_index(&self, offset: usize) -> Result<usize, usize> {
        self.wraps.binary_search_by_key(&offset, |w| w.offset)
    }

    /// Index of the first wrap at or after `offset`.
    pub fn first_wrap_at_or_after(&self, offset: usize) -> Option<usize> {
        let idx = self.wraps.partition_point(|w| w.offset < offset);
        (idx < self.wraps.len()).then_some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_wraps(text: &str, width: usize) -> Vec<usize> {
        wrap_points(text, width, DEFAULT_TAB_WIDTH, WrapMode::Char, WrapIndent::None)
    }

    #[test]
    fn test_char_width() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width(' '), 1);
        assert_eq!(char_width('你'), 2);
        assert_eq!(char_width('🦀'), 2);
    }

    #[test]
    fn test_tab_width_expansion() {
        // tab stops every 4 cells.
        assert_eq!(cell_width_at('\t', 0, 4), 4);
        assert_eq!(cell_width_at('\t', 1, 4), 3);
        assert_eq!(cell_width_at('\t', 3, 4), 1);
        assert_eq!(str_width("ab\t", 4), 4);
        assert_eq!(str_width("abcd\t", 4), 8);
    }

    #[test]
    fn test_exact_fit_does_not_wrap() {
        assert!(char_wraps("1234567890", 10).is_empty());
    }

    #[test]
    fn test_one_over_wraps_once() {
        assert_eq!(char_wraps("12345678901", 10), vec![10]);
        assert_eq!(char_wraps("abcdefghij", 4), vec![4, 8]);
    }

    #[test]
    fn test_cjk_overflow() {
        // 6 CJK characters = 12 cells
        assert_eq!(char_wraps("你好世界测试", 10), vec![5]);
    }

    #[test]
    fn test_wide_char_moves_intact() {
        // "Hello" takes 5 cells, "你" needs 2 but only 1 remains
        assert_eq!(char_wraps("Hello你", 6), vec![5]);
    }

    #[test]
    fn test_zero_width_disables_wrapping() {
        assert!(char_wraps("abcdefghij", 0).is_empty());
        assert!(
            wrap_points("abcdefghij", 3, 4, WrapMode::None, WrapIndent::None).is_empty()
        );
    }

    #[test]
    fn test_word_wrap_prefers_whitespace() {
        let wraps = wrap_points("hello world", 7, 4, WrapMode::Word, WrapIndent::None);
        assert_eq!(wraps, vec![6]);
    }

    #[test]
    fn test_word_wrap_falls_back_to_char_wrap() {
        let wraps = wrap_points("abcdefghij", 4, 4, WrapMode::Word, WrapIndent::None);
        assert_eq!(wraps, vec![4, 8]);
    }

    #[test]
    fn test_same_as_line_indent_reduces_continuation_width() {
        let wraps = wrap_points(
            "    abcdefgh",
            6,
            DEFAULT_TAB_WIDTH,
            WrapMode::Char,
            WrapIndent::SameAsLineIndent,
        );
        assert_eq!(wraps, vec![6, 8, 10]);
    }

    #[test]
    fn test_model_rebuild_uses_document_offsets() {
        let doc = LineIndex::from_text("abcdef\nxy\nabcdefgh");
        let config = ViewConfig {
            viewport_width: 4,
            ..ViewConfig::default()
        };
        let mut model = SoftWrapModel::new();
        model.rebuild(&doc, &FoldingManager::new(), &config);

        let offsets: Vec<usize> = model.soft_wraps().iter().map(|w| w.offset).collect();
        assert_eq!(offsets, vec![4, 14]);
        assert_eq!(model.soft_wrap_index(14), Ok(1));
        assert_eq!(model.soft_wrap_index(5), Err(1));
        assert_eq!(model.first_wrap_at_or_after(5), Some(1));
        assert_eq!(model.first_wrap_at_or_after(15), None);
    }

    #[test]
    fn test_model_skips_wraps_inside_collapsed_folds() {
        let doc = LineIndex::from_text("abc\nabcdefghij\nxyz");
        let mut folding = FoldingManager::new();
        folding.add_line_region(&doc, 0, 1, true).unwrap();
        let config = ViewConfig {
            viewport_width: 4,
            ..ViewConfig::default()
        };

        let mut model = SoftWrapModel::new();
        model.rebuild(&doc, &folding, &config);
        assert!(model.is_empty());

        folding.expand_all();
        model.rebuild(&doc, &folding, &config);
        let offsets: Vec<usize> = model.soft_wraps().iter().map(|w| w.offset).collect();
        assert_eq!(offsets, vec![8, 12]);
    }

    #[test]
    fn test_from_offsets_sorts_and_dedups() {
        let model = SoftWrapModel::from_offsets([9, 3, 9, 6]);
        let offsets: Vec<usize> = model.soft_wraps().iter().map(|w| w.offset).collect();
        assert_eq!(offsets, vec![3, 6, 9]);
        assert_eq!(model.len(), 3);
    }
}
