// Gap buffer backing the in-memory Markdown document
// Positions are byte offsets; callers convert from line/column themselves

use std::cmp::{max, min};

const INITIAL_GAP_SIZE: usize = 1024;

/// A single primitive edit, recorded so it can be reverted
#[derive(Clone, Debug, PartialEq)]
enum Edit {
    Insert { pos: usize, text: String },
    Delete { pos: usize, text: String },
}

impl Edit {
    fn inverse(&self) -> Edit {
        match self {
            Edit::Insert { pos, text } => Edit::Delete {
                pos: *pos,
                text: text.clone(),
            },
            Edit::Delete { pos, text } => Edit::Insert {
                pos: *pos,
                text: text.clone(),
            },
        }
    }
}

/// Edits that undo and redo treat as one step.
/// A `replace` produces a delete followed by an insert in the same group.
type EditGroup = Vec<Edit>;

/// Gap buffer based text buffer
/// The gap follows the last edit so consecutive typing stays cheap
pub struct TextBuffer {
    buffer: Vec<u8>,
    gap_start: usize,
    /// End of the gap (exclusive)
    gap_end: usize,
    undo_stack: Vec<EditGroup>,
    redo_stack: Vec<EditGroup>,
    /// Group currently being recorded, if any
    open_group: Option<EditGroup>,
    recording: bool,
}

impl TextBuffer {
    pub fn new() -> Self {
        TextBuffer {
            buffer: vec![0; INITIAL_GAP_SIZE],
            gap_start: 0,
            gap_end: INITIAL_GAP_SIZE,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            open_group: None,
            recording: true,
        }
    }

    /// Create a buffer holding `text`, with an empty undo history
    pub fn with_text(text: &str) -> Self {
        let mut buf = TextBuffer::new();
        buf.set_text(text);
        buf
    }

    /// Length of the stored text in bytes
    pub fn length(&self) -> usize {
        self.buffer.len() - self.gap_size()
    }

    fn gap_size(&self) -> usize {
        self.gap_end - self.gap_start
    }

    fn move_gap(&mut self, pos: usize) {
        let pos = min(pos, self.length());

        if pos < self.gap_start {
            let distance = self.gap_start - pos;
            self.buffer
                .copy_within(pos..self.gap_start, self.gap_end - distance);
            self.gap_start = pos;
            self.gap_end -= distance;
        } else if pos > self.gap_start {
            let distance = pos - self.gap_start;
            self.buffer
                .copy_within(self.gap_end..self.gap_end + distance, self.gap_start);
            self.gap_start = pos;
            self.gap_end += distance;
        }
    }

    /// Grow the gap so it can take at least `size` bytes
    fn expand_gap(&mut self, size: usize) {
        if self.gap_size() >= size {
            return;
        }

        let new_gap_size = max(size, self.buffer.len() / 2);
        let mut grown = Vec::with_capacity(self.length() + new_gap_size);
        grown.extend_from_slice(&self.buffer[..self.gap_start]);
        grown.resize(self.gap_start + new_gap_size, 0);
        grown.extend_from_slice(&self.buffer[self.gap_end..]);

        self.buffer = grown;
        self.gap_end = self.gap_start + new_gap_size;
    }

    fn byte_at_physical(&self, pos: usize) -> u8 {
        if pos < self.gap_start {
            self.buffer[pos]
        } else {
            self.buffer[pos + self.gap_size()]
        }
    }

    /// Byte at a logical position, or 0 past the end
    pub fn byte_at(&self, pos: usize) -> u8 {
        if pos < self.length() {
            self.byte_at_physical(pos)
        } else {
            0
        }
    }

    pub fn text(&self) -> String {
        let mut result = Vec::with_capacity(self.length());
        result.extend_from_slice(&self.buffer[..self.gap_start]);
        result.extend_from_slice(&self.buffer[self.gap_end..]);
        String::from_utf8_lossy(&result).into_owned()
    }

    /// Text between two byte offsets, clamped to the buffer
    pub fn text_range(&self, start: usize, end: usize) -> String {
        let start = min(start, self.length());
        let end = min(end, self.length());

        if start >= end {
            return String::new();
        }

        let bytes: Vec<u8> = (start..end).map(|i| self.byte_at_physical(i)).collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Replace the whole content. Clears the undo history.
    pub fn set_text(&mut self, text: &str) {
        let gap_size = max(INITIAL_GAP_SIZE, text.len() / 2);

        self.buffer = Vec::with_capacity(text.len() + gap_size);
        self.buffer.extend_from_slice(text.as_bytes());
        self.buffer.resize(text.len() + gap_size, 0);
        self.gap_start = text.len();
        self.gap_end = self.buffer.len();

        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open_group = None;
    }

    pub fn insert(&mut self, pos: usize, text: &str) {
        let pos = min(pos, self.length());
        if text.is_empty() {
            return;
        }

        self.record(Edit::Insert {
            pos,
            text: text.to_string(),
        });

        self.move_gap(pos);
        self.expand_gap(text.len());
        self.buffer[self.gap_start..self.gap_start + text.len()].copy_from_slice(text.as_bytes());
        self.gap_start += text.len();
    }

    pub fn remove(&mut self, start: usize, end: usize) {
        let start = min(start, self.length());
        let end = min(end, self.length());
        if start >= end {
            return;
        }

        self.record(Edit::Delete {
            pos: start,
            text: self.text_range(start, end),
        });

        self.move_gap(start);
        self.gap_end += end - start;
    }

    /// Replace a range with `text`; undone as a single step
    pub fn replace(&mut self, start: usize, end: usize, text: &str) {
        let nested = self.open_group.is_some();
        if !nested {
            self.open_group = Some(Vec::new());
        }

        self.remove(start, end);
        self.insert(start, text);

        if !nested {
            self.close_group();
        }
    }

    fn record(&mut self, edit: Edit) {
        if !self.recording {
            return;
        }
        match self.open_group.as_mut() {
            Some(group) => group.push(edit),
            None => {
                self.undo_stack.push(vec![edit]);
                self.redo_stack.clear();
            }
        }
    }

    fn close_group(&mut self) {
        if let Some(group) = self.open_group.take()
            && !group.is_empty()
        {
            self.undo_stack.push(group);
            self.redo_stack.clear();
        }
    }

    fn apply(&mut self, edit: &Edit) -> usize {
        match edit {
            Edit::Insert { pos, text } => {
                self.insert(*pos, text);
                pos + text.len()
            }
            Edit::Delete { pos, text } => {
                self.remove(*pos, pos + text.len());
                *pos
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Revert the last edit group.
    /// Returns true if something was undone; `cursor` is moved to where the change happened.
    pub fn undo(&mut self, cursor: &mut usize) -> bool {
        let Some(group) = self.undo_stack.pop() else {
            return false;
        };

        self.recording = false;
        for edit in group.iter().rev() {
            *cursor = self.apply(&edit.inverse());
        }
        self.recording = true;

        self.redo_stack.push(group);
        true
    }

    /// Re-apply the last undone edit group
    pub fn redo(&mut self, cursor: &mut usize) -> bool {
        let Some(group) = self.redo_stack.pop() else {
            return false;
        };

        self.recording = false;
        for edit in &group {
            *cursor = self.apply(edit);
        }
        self.recording = true;

        self.undo_stack.push(group);
        true
    }

    // ========================================================================
    // UTF-8 stepping
    // ========================================================================

    /// Next UTF-8 character boundary after `pos`
    pub fn next_char(&self, pos: usize) -> usize {
        if pos >= self.length() {
            return self.length();
        }

        let mut next = pos + 1;
        // continuation bytes are 10xxxxxx
        while next < self.length() && (self.byte_at(next) & 0xC0) == 0x80 {
            next += 1;
        }
        next
    }

    /// Previous UTF-8 character boundary before `pos`
    pub fn prev_char(&self, pos: usize) -> usize {
        if pos == 0 {
            return 0;
        }

        let mut prev = min(pos, self.length()) - 1;
        while prev > 0 && (self.byte_at(prev) & 0xC0) == 0x80 {
            prev -= 1;
        }
        prev
    }

    // ========================================================================
    // Line operations
    // ========================================================================

    /// Offset of the first character of the line containing `pos`
    pub fn line_start(&self, pos: usize) -> usize {
        let mut current = min(pos, self.length());
        while current > 0 {
            if self.byte_at_physical(current - 1) == b'\n' {
                return current;
            }
            current -= 1;
        }
        0
    }

    /// Offset of the newline ending the line containing `pos`, or the buffer end
    pub fn line_end(&self, pos: usize) -> usize {
        let mut current = min(pos, self.length());
        while current < self.length() {
            if self.byte_at_physical(current) == b'\n' {
                return current;
            }
            current += 1;
        }
        self.length()
    }

    pub fn line_text(&self, pos: usize) -> String {
        self.text_range(self.line_start(pos), self.line_end(pos))
    }

    /// Number of newlines in `[start, end)`
    pub fn count_lines(&self, start: usize, end: usize) -> usize {
        let end = min(end, self.length());
        (min(start, end)..end)
            .filter(|&pos| self.byte_at_physical(pos) == b'\n')
            .count()
    }

    /// Offset of the first character `n_lines` lines after `start`,
    /// or the buffer end when there are not that many lines
    pub fn skip_lines(&self, start: usize, n_lines: usize) -> usize {
        if n_lines == 0 {
            return min(start, self.length());
        }

        let mut seen = 0;
        for pos in min(start, self.length())..self.length() {
            if self.byte_at_physical(pos) == b'\n' {
                seen += 1;
                if seen == n_lines {
                    return pos + 1;
                }
            }
        }
        self.length()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
