//! Logical Line Index
//!
//! Rope-backed line index, supporting O(log N) line/offset lookups. Offsets are counted in
//! Unicode scalar values (`char`), and line ends exclude the line terminator.

use ropey::{Rope, RopeSlice};

use crate::metrics::TextLines;

/// Logical line index - implemented using Rope data structure
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an index for an empty document (one empty line).
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build line index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Replace the whole text.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Get total line count (at least 1).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Character offset where `line` starts. Lines past the end map to the text length.
    pub fn line_start(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line)
    }

    /// Character offset where `line` ends, excluding its terminator.
    pub fn line_end(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        let start = self.rope.line_to_char(line);
        let slice = self.rope.line(line);
        start + slice.len_chars() - terminator_len(slice)
    }

    /// Logical line containing `offset` (clamped to the text length).
    pub fn line_of(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.rope.len_chars()))
    }

    /// Get text of the specified line (excluding the terminator)
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let slice = self.rope.line(line);
        let len = slice.len_chars() - terminator_len(slice);
        Some(slice.slice(..len).to_string())
    }

    /// Get complete text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLines for LineIndex {
    fn line_count(&self) -> usize {
        LineIndex::line_count(self)
    }

    fn line_start_offset(&self, line: usize) -> usize {
        self.line_start(line)
    }

    fn line_end_offset(&self, line: usize) -> usize {
        self.line_end(line)
    }

    fn text_len(&self) -> usize {
        self.char_count()
    }

    fn line_of_offset(&self, offset: usize) -> usize {
        self.line_of(offset)
    }
}

/// Length in chars of the line break ending `line` (0 for the last line).
fn terminator_len(line: RopeSlice<'_>) -> usize {
    let len = line.len_chars();
    if len == 0 {
        return 0;
    }
    match line.char(len - 1) {
        '\n' if len >= 2 && line.char(len - 2) == '\r' => 2,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_line_index() {
        let index = LineIndex::new();
        assert_eq!(index.line_count(), 1); // Rope empty document has 1 line
        assert_eq!(index.char_count(), 0);
        assert_eq!(index.line_start(0), 0);
        assert_eq!(index.line_end(0), 0);
    }

    #[test]
    fn test_line_bounds() {
        let index = LineIndex::from_text("abc\ndef\nghi");

        assert_eq!(index.line_count(), 3);
        assert_eq!((index.line_start(0), index.line_end(0)), (0, 3));
        assert_eq!((index.line_start(1), index.line_end(1)), (4, 7));
        assert_eq!((index.line_start(2), index.line_end(2)), (8, 11));
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        let index = LineIndex::from_text("abc\n");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_start(1), 4);
        assert_eq!(index.line_end(1), 4);
    }

    #[test]
    fn test_crlf_terminator_excluded() {
        let index = LineIndex::from_text("ab\r\ncd");
        assert_eq!(index.line_end(0), 2);
        assert_eq!(index.line_start(1), 4);
        assert_eq!(index.line_text(0).as_deref(), Some("ab"));
    }

    #[test]
    fn test_line_of_offset() {
        let index = LineIndex::from_text("First line\nSecond line\nThird line");

        assert_eq!(index.line_of(0), 0);
        assert_eq!(index.line_of(10), 0); // the '\n' belongs to line 0
        assert_eq!(index.line_of(11), 1);
        assert_eq!(index.line_of(23), 2);
        assert_eq!(index.line_of(10_000), 2);
    }

    #[test]
    fn test_utf8_cjk_offsets_are_chars() {
        let index = LineIndex::from_text("你好\n世界");

        assert_eq!(index.char_count(), 5);
        assert_eq!(index.line_end(0), 2);
        assert_eq!(index.line_start(1), 3);
        assert_eq!(index.line_text(1).as_deref(), Some("世界"));
    }

    #[test]
    fn test_out_of_range_lines_clamp() {
        let index = LineIndex::from_text("abc");
        assert_eq!(index.line_start(5), 3);
        assert_eq!(index.line_end(5), 3);
        assert!(index.line_text(5).is_none());
    }

    #[test]
    fn test_set_text_replaces_content() {
        let mut index = LineIndex::from_text("one");
        index.set_text("a\nb\nc");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.text(), "a\nb\nc");
    }
}
