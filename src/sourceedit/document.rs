// In-memory Markdown document implementing the host contract
// Used by the command line tool and by tests; GUI hosts bring their own

use crate::host::{CursorEnd, Position, TextHost};
use crate::sourceedit::text_buffer::TextBuffer;
use crate::sourceedit::tokens::{TokenSpan, labels_at, token_spans};

pub struct MarkdownDocument {
    buffer: TextBuffer,
    /// Selection, always ordered so that start <= end
    start: Position,
    end: Position,
    /// Token spans for the current text, refreshed after every edit
    spans: Vec<TokenSpan>,
    focus_requests: usize,
}

impl MarkdownDocument {
    pub fn new(text: &str) -> Self {
        MarkdownDocument {
            buffer: TextBuffer::with_text(text),
            start: Position::default(),
            end: Position::default(),
            spans: token_spans(text),
            focus_requests: 0,
        }
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.count_lines(0, self.buffer.length()) + 1
    }

    /// Current selection as (start, end)
    pub fn selection_range(&self) -> (Position, Position) {
        (self.start, self.end)
    }

    /// How many times an edit handed focus back to the document
    pub fn focus_requests(&self) -> usize {
        self.focus_requests
    }

    pub fn can_undo(&self) -> bool {
        self.buffer.can_undo()
    }

    /// Byte offset of a position, clamped to the line and the buffer
    fn offset(&self, pos: Position) -> usize {
        if pos.line >= self.line_count() {
            return self.buffer.length();
        }
        let line_start = self.buffer.skip_lines(0, pos.line);
        let line_end = self.buffer.line_end(line_start);

        let mut offset = line_start;
        for _ in 0..pos.column {
            if offset >= line_end {
                break;
            }
            offset = self.buffer.next_char(offset);
        }
        offset
    }

    fn position(&self, offset: usize) -> Position {
        let line_start = self.buffer.line_start(offset);
        Position {
            line: self.buffer.count_lines(0, line_start),
            column: self.buffer.text_range(line_start, offset).chars().count(),
        }
    }

    fn clamp(&self, pos: Position) -> Position {
        self.position(self.offset(pos))
    }

    fn collapse_to(&mut self, offset: usize) {
        self.start = self.position(offset);
        self.end = self.start;
    }

    fn reparse(&mut self) {
        self.spans = token_spans(&self.buffer.text());
    }
}

impl TextHost for MarkdownDocument {
    fn cursor(&self, end: CursorEnd) -> Position {
        match end {
            CursorEnd::Start => self.start,
            CursorEnd::End => self.end,
        }
    }

    fn selection(&self) -> String {
        self.buffer
            .text_range(self.offset(self.start), self.offset(self.end))
    }

    fn replace_selection(&mut self, text: &str) {
        let start = self.offset(self.start);
        let end = self.offset(self.end);
        self.buffer.replace(start, end, text);
        self.collapse_to(start + text.len());
        self.reparse();
    }

    fn line(&self, line: usize) -> String {
        if line >= self.line_count() {
            return String::new();
        }
        self.buffer.line_text(self.buffer.skip_lines(0, line))
    }

    fn set_line(&mut self, line: usize, text: &str) {
        if line >= self.line_count() {
            tracing::warn!(line, "set_line past the end of the document");
            return;
        }
        let start = self.buffer.skip_lines(0, line);
        let end = self.buffer.line_end(start);
        self.buffer.replace(start, end, text);

        self.start = self.clamp(self.start);
        self.end = self.clamp(self.end);
        self.reparse();
    }

    fn set_selection(&mut self, start: Position, end: Position) {
        let (start, end) = (self.clamp(start), self.clamp(end));
        (self.start, self.end) = if end < start { (end, start) } else { (start, end) };
    }

    /// Labels of the token just before `pos`, as an editor reports the
    /// token under the cursor. At the start of a line the first character counts.
    /// An empty line has no token, even when the parser folds its line break
    /// into the block above.
    fn token_labels(&self, pos: Position) -> Vec<String> {
        if self.line(pos.line).is_empty() {
            return Vec::new();
        }
        let offset = self.offset(pos);
        let probe = if pos.column > 0 {
            self.buffer.prev_char(offset)
        } else {
            offset
        };
        labels_at(&self.spans, probe)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn focus(&mut self) {
        self.focus_requests += 1;
    }

    fn undo(&mut self) {
        let mut cursor = self.offset(self.start);
        if self.buffer.undo(&mut cursor) {
            self.collapse_to(cursor);
            self.reparse();
        }
    }

    fn redo(&mut self) {
        let mut cursor = self.offset(self.start);
        if self.buffer.redo(&mut cursor) {
            self.collapse_to(cursor);
            self.reparse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_and_count() {
        let doc = MarkdownDocument::new("one\ntwo\n\nfour");
        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.line(1), "two");
        assert_eq!(doc.line(2), "");
        assert_eq!(doc.line(3), "four");
        assert_eq!(doc.line(9), "");
    }

    #[test]
    fn test_selection_is_clamped_and_ordered() {
        let mut doc = MarkdownDocument::new("short\nlonger line");
        doc.set_selection(Position::new(1, 6), Position::new(0, 99));
        assert_eq!(
            doc.selection_range(),
            (Position::new(0, 5), Position::new(1, 6))
        );
        assert_eq!(doc.selection(), "\nlonger");
    }

    #[test]
    fn test_columns_count_characters() {
        let mut doc = MarkdownDocument::new("naïve text");
        doc.set_selection(Position::new(0, 6), Position::new(0, 10));
        assert_eq!(doc.selection(), "text");
        doc.replace_selection("words");
        assert_eq!(doc.text(), "naïve words");
        assert_eq!(doc.cursor(CursorEnd::Start), Position::new(0, 11));
    }

    #[test]
    fn test_set_line_keeps_other_lines() {
        let mut doc = MarkdownDocument::new("a\nb\nc");
        doc.set_line(1, "* b");
        doc.set_line(7, "ignored");
        assert_eq!(doc.text(), "a\n* b\nc");
    }

    #[test]
    fn test_token_labels_follow_edits() {
        let mut doc = MarkdownDocument::new("hello");
        assert!(doc.token_labels(Position::new(0, 3)).is_empty());
        doc.set_line(0, "**hello**");
        assert_eq!(doc.token_labels(Position::new(0, 7)), vec!["strong"]);
        // start of line probes the first character
        doc.set_line(0, "> hello");
        assert_eq!(doc.token_labels(Position::new(0, 0)), vec!["atom"]);
    }

    #[test]
    fn test_empty_line_has_no_labels() {
        let doc = MarkdownDocument::new("* item\n\nplain");
        assert!(doc.token_labels(Position::new(1, 0)).is_empty());
        assert!(doc.token_labels(Position::new(1, 3)).is_empty());
        assert_eq!(doc.token_labels(Position::new(0, 3)), vec!["variable-2"]);
    }

    #[test]
    fn test_undo_restores_text_and_caret() {
        let mut doc = MarkdownDocument::new("say hello");
        doc.set_selection(Position::new(0, 4), Position::new(0, 9));
        doc.replace_selection("**hello**");
        assert_eq!(doc.text(), "say **hello**");

        doc.undo();
        assert_eq!(doc.text(), "say hello");
        assert_eq!(doc.cursor(CursorEnd::Start), Position::new(0, 9));

        doc.redo();
        assert_eq!(doc.text(), "say **hello**");
        assert_eq!(doc.cursor(CursorEnd::End), Position::new(0, 13));
    }
}
