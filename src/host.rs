// Contract between the toggle engines and the text editing surface

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A location in the buffer.
/// Columns count characters, not bytes, within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }

    pub fn shifted_right(self, by: usize) -> Self {
        Position {
            column: self.column + by,
            ..self
        }
    }

    /// Move left on the same line, stopping at column 0
    pub fn shifted_left(self, by: usize) -> Self {
        Position {
            column: self.column.saturating_sub(by),
            ..self
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid position `{0}`, expected LINE:COLUMN")]
pub struct ParsePositionError(String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParsePositionError(s.to_string());
        let (line, column) = s.split_once(':').ok_or_else(invalid)?;
        Ok(Position {
            line: line.trim().parse().map_err(|_| invalid())?,
            column: column.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Which end of the current selection to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEnd {
    Start,
    End,
}

/// Query and mutation surface of the editing widget.
///
/// The toggle engines own no text; everything they read or change goes
/// through this trait. Positions handed in are always ones the host itself
/// reported, shifted along a single line.
pub trait TextHost {
    /// Start or end of the current selection. Both are equal for a caret.
    fn cursor(&self, end: CursorEnd) -> Position;

    /// Selected text, empty for a caret
    fn selection(&self) -> String;

    /// Replace the selection with `text` and collapse it to the end of the insert
    fn replace_selection(&mut self, text: &str);

    /// Full text of a line without its terminator
    fn line(&self, line: usize) -> String;

    fn set_line(&mut self, line: usize, text: &str);

    fn set_selection(&mut self, start: Position, end: Position);

    /// Lexical labels of the token covering `pos`. Empty when unclassified.
    /// A single entry may carry several space separated labels.
    fn token_labels(&self, pos: Position) -> Vec<String>;

    fn focus(&mut self);

    fn undo(&mut self);

    fn redo(&mut self);
}

/// Byte offset of a character column, clamped to the end of `text`
pub fn byte_index(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map_or(text.len(), |(idx, _)| idx)
}

/// Split a line into the text before and after a character column
pub fn split_at_column(text: &str, column: usize) -> (&str, &str) {
    text.split_at(byte_index(text, column))
}
