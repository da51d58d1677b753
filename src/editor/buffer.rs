//! Equation buffer
//!
//! Pure text storage for the equation input: a text value plus a
//! cursor/selection, with no knowledge of mathematics. Positions are
//! character indices (the host textarea reports selectionStart/End the
//! same way) and are clamped on every mutation so the invariant
//! `0 <= start <= end <= len` always holds.

use serde::{Deserialize, Serialize};

/// Token that clears the whole buffer instead of inserting text
pub const CLEAR_TOKEN: &str = "C";

/// A selection range in the buffer (character indices, start <= end).
/// A collapsed selection (start == end) is the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A collapsed selection at `pos`
    pub fn cursor(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// The equation input buffer: text plus cursor/selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationBuffer {
    text: String,
    selection: Selection,
}

impl Default for EquationBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EquationBuffer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            selection: Selection::cursor(0),
        }
    }

    pub fn from_text(text: &str) -> Self {
        let len = text.chars().count();
        Self {
            text: text.to_string(),
            selection: Selection::cursor(len),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole text (host textarea input event), keeping the
    /// given selection clamped to the new length
    pub fn set_text(&mut self, text: &str, start: usize, end: usize) {
        self.text = text.to_string();
        self.set_selection(start, end);
    }

    /// Move the selection, clamping both ends to the text length
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.len();
        self.selection = Selection::new(start.min(len), end.min(len));
    }

    /// Insert a calculator token at the selection.
    ///
    /// The token replaces the current selection (or is inserted at the
    /// cursor when the selection is collapsed) and the cursor lands
    /// immediately after it. Tokens that open a function call (e.g.
    /// `sin(`) follow the same rule; the cursor is not placed inside the
    /// parentheses. The clear sentinel empties the buffer entirely.
    pub fn insert_token(&mut self, token: &str) {
        if token == CLEAR_TOKEN {
            self.clear();
            return;
        }

        let start_byte = self.char_to_byte(self.selection.start);
        let end_byte = self.char_to_byte(self.selection.end);
        self.text.replace_range(start_byte..end_byte, token);

        let cursor = self.selection.start + token.chars().count();
        self.selection = Selection::cursor(cursor);
    }

    /// Empty the buffer and put the cursor at 0
    pub fn clear(&mut self) {
        self.text.clear();
        self.selection = Selection::cursor(0);
    }

    /// The equation as submitted: surrounding whitespace trimmed
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}
