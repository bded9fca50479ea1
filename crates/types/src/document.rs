//! Text document primitives consumed by the formatter picker and its providers.
//!
//! Positions are 1-based in both line and column, matching the addressing the
//! editor host exposes. A column of `n + 1` on a line of length `n` addresses
//! the end of that line, so the full-line range of `"select 1"` on line 3 is
//! `[3,1 .. 3,9]`.

use serde::{Deserialize, Serialize};

/// A 1-based line/column location within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A region between two positions, start inclusive, end exclusive.
///
/// Selections are represented by the same type; a selection whose start and
/// end coincide is a collapsed cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Whether the range covers no text (collapsed cursor).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A single replacement produced by a formatting provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    /// The region to replace.
    pub range: Range,
    /// The replacement text.
    pub new_text: String,
}

impl TextEdit {
    pub fn new(range: Range, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }
}

/// An in-memory text document with a language identifier.
///
/// Line content is kept normalized (no trailing newline bookkeeping); the
/// document text is the lines joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Language identifier used for provider resolution (for example, `sql`).
    pub language_id: String,
    /// Whether the document rejects edits.
    pub read_only: bool,
    lines: Vec<String>,
}

impl Document {
    /// Build a writable document from raw text.
    pub fn new(language_id: impl Into<String>, text: &str) -> Self {
        Self {
            language_id: language_id.into(),
            read_only: false,
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn is_writable(&self) -> bool {
        !self.read_only
    }

    /// Number of lines; at least 1 (an empty document has one empty line).
    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Content of the given 1-based line, if it exists.
    pub fn line(&self, line: u32) -> Option<&str> {
        self.lines.get(line.saturating_sub(1) as usize).map(String::as_str)
    }

    /// Length in bytes of the given 1-based line; 0 for lines out of range.
    pub fn line_len(&self, line: u32) -> usize {
        self.line(line).map_or(0, str::len)
    }

    /// The full document text.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// The range covering the entire document.
    pub fn full_range(&self) -> Range {
        let last = self.line_count();
        Range::new(
            Position::new(1, 1),
            Position::new(last, self.line_len(last) as u32 + 1),
        )
    }

    /// The range covering one full line: `[L,1 .. L,n+1]` for a line of length `n`.
    pub fn line_range(&self, line: u32) -> Range {
        Range::new(
            Position::new(line, 1),
            Position::new(line, self.line_len(line) as u32 + 1),
        )
    }

    /// The text inside `range`.
    pub fn text_in_range(&self, range: Range) -> String {
        let text = self.text();
        let start = self.offset_of(range.start);
        let end = self.offset_of(range.end).max(start);
        text[start..end].to_string()
    }

    /// Apply provider edits to the document.
    ///
    /// Edits are applied back to front so earlier edits do not invalidate the
    /// positions of later ones. Overlapping edits are not supported and the
    /// result for them is unspecified.
    pub fn apply_edits(&mut self, mut edits: Vec<TextEdit>) {
        edits.sort_by_key(|edit| (edit.range.start, edit.range.end));
        let mut text = self.text();
        for edit in edits.iter().rev() {
            let start = self.offset_of(edit.range.start);
            let end = self.offset_of(edit.range.end).max(start);
            text.replace_range(start..end, &edit.new_text);
        }
        self.lines = text.split('\n').map(str::to_string).collect();
    }

    /// Byte offset of a position within the joined text, clamped to the
    /// document bounds.
    fn offset_of(&self, position: Position) -> usize {
        let line_index = position.line.saturating_sub(1) as usize;
        if line_index >= self.lines.len() {
            let total: usize = self.lines.iter().map(|line| line.len() + 1).sum();
            return total - 1;
        }
        let preceding: usize = self.lines[..line_index].iter().map(|l| l.len() + 1).sum();
        let column = (position.column.saturating_sub(1) as usize).min(self.lines[line_index].len());
        preceding + column
    }
}
