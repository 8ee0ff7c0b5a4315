//! Codepoint-addressed line buffer.
//!
//! The buffer stores Unicode scalar values, not bytes or UTF-16 units, so the
//! cursor and all motion logic stay correct across combining characters and
//! astral-plane codepoints. Every positional argument clamps to `[0, len]`;
//! an interactive session must never abort on a stale cursor reference, so
//! out-of-range requests degrade to the nearest valid position rather than
//! signalling an error.

pub mod motion;
pub mod words;

pub use motion::MotionKind;

/// Decode a string into its codepoint sequence.
///
/// Pure free function: key payloads and initial content arrive as `&str` from
/// the transport layer and are converted exactly once at the boundary.
pub fn codepoints(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// A single editable line plus cursor offset.
///
/// Invariant: `0 <= cursor <= chars.len()` holds after every public call,
/// including clamped out-of-range requests. A violation observed internally
/// is a bug in a primitive, not a user-input condition.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
    dirty: bool,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct from a string with the cursor at the end.
    pub fn from_str(content: &str) -> Self {
        let chars = codepoints(content);
        let cursor = chars.len();
        Self {
            chars,
            cursor,
            dirty: false,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Codepoint at `pos`, or `None` past the end.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Move the cursor, clamping to `[0, len]`.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.chars.len());
        self.check_invariant();
    }

    /// Insert codepoints at a clamped position. The cursor advances by the
    /// inserted length when the insertion point is at or before it.
    pub fn insert(&mut self, pos: usize, content: &[char]) {
        if content.is_empty() {
            return;
        }
        let pos = pos.min(self.chars.len());
        self.chars.splice(pos..pos, content.iter().copied());
        if pos <= self.cursor {
            self.cursor += content.len();
        }
        self.dirty = true;
        self.check_invariant();
    }

    /// Insert a single codepoint at the cursor.
    pub fn insert_at_cursor(&mut self, ch: char) {
        let pos = self.cursor;
        self.insert(pos, &[ch]);
    }

    /// Overwrite the codepoint at `pos`, extending by one when `pos == len`.
    pub fn replace_at(&mut self, pos: usize, ch: char) {
        let pos = pos.min(self.chars.len());
        if pos == self.chars.len() {
            self.chars.push(ch);
        } else {
            self.chars[pos] = ch;
        }
        self.dirty = true;
        self.check_invariant();
    }

    /// Remove `[start, end)` (endpoints clamped, swapped if reversed) and
    /// return the removed run. The cursor collapses onto the start of the
    /// removed span when it was inside it.
    pub fn delete_range(&mut self, start: usize, end: usize) -> Vec<char> {
        let (start, end) = clamp_span(start, end, self.chars.len());
        if start == end {
            return Vec::new();
        }
        let removed: Vec<char> = self.chars.drain(start..end).collect();
        if self.cursor > end {
            self.cursor -= removed.len();
        } else if self.cursor > start {
            self.cursor = start;
        }
        self.dirty = true;
        self.check_invariant();
        removed
    }

    /// Clear content and cursor; used when a line is submitted.
    pub fn reset(&mut self) {
        self.chars.clear();
        self.cursor = 0;
        self.dirty = true;
    }

    /// Replace the whole content and cursor from an undo snapshot.
    pub fn restore(&mut self, content: Vec<char>, cursor: usize) {
        self.chars = content;
        self.cursor = cursor.min(self.chars.len());
        self.dirty = true;
        self.check_invariant();
    }

    /// Consume the dirty flag set by mutating calls. The renderer
    /// notification path polls this once per dispatched key.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn check_invariant(&self) {
        debug_assert!(
            self.cursor <= self.chars.len(),
            "cursor {} past buffer length {}",
            self.cursor,
            self.chars.len()
        );
    }
}

impl std::fmt::Display for LineBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in &self.chars {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

fn clamp_span(a: usize, b: usize, len: usize) -> (usize, usize) {
    let a = a.min(len);
    let b = b.min(len);
    if a <= b { (a, b) } else { (b, a) }
}
