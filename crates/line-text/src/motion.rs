//! Cursor motion family.
//!
//! Motions are pure: they take the buffer plus a starting offset and return a
//! target offset, never mutating anything. Backward motions share one shape,
//! skip the separator run immediately before the offset, then skip the token
//! run before that; forward motions mirror it. Operators reuse the same
//! functions to resolve deletion spans, so motion and change semantics can
//! never drift apart.

use crate::LineBuffer;
use crate::words::{CharClass, is_blank};

/// Motion selector carried by key bindings and operator compositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    Left,
    Right,
    LineStart,
    LineEnd,
    WordForward,
    WordBackward,
    BigWordForward,
    BigWordBackward,
}

/// Compute the target offset for a motion from `from` (clamped to the
/// buffer). Idempotent at the boundary: a backward motion at 0 stays at 0, a
/// forward motion at the end stays at the end.
pub fn target(buf: &LineBuffer, from: usize, kind: MotionKind) -> usize {
    let from = from.min(buf.len());
    match kind {
        MotionKind::Left => from.saturating_sub(1),
        MotionKind::Right => (from + 1).min(buf.len()),
        MotionKind::LineStart => 0,
        MotionKind::LineEnd => buf.len(),
        MotionKind::WordForward => word_forward(buf, from),
        MotionKind::WordBackward => word_backward(buf, from),
        MotionKind::BigWordForward => big_word_forward(buf, from),
        MotionKind::BigWordBackward => big_word_backward(buf, from),
    }
}

/// Start of the previous whitespace-delimited token.
///
/// Two-phase skip: first any contiguous whitespace immediately before the
/// offset, then the contiguous non-whitespace run before that.
pub fn big_word_backward(buf: &LineBuffer, from: usize) -> usize {
    let mut pos = from.min(buf.len());
    while pos > 0 && buf.char_at(pos - 1).is_some_and(is_blank) {
        pos -= 1;
    }
    while pos > 0 && buf.char_at(pos - 1).is_some_and(|c| !is_blank(c)) {
        pos -= 1;
    }
    pos
}

/// Start of the next whitespace-delimited token (or end of buffer).
pub fn big_word_forward(buf: &LineBuffer, from: usize) -> usize {
    let mut pos = from.min(buf.len());
    while pos < buf.len() && buf.char_at(pos).is_some_and(|c| !is_blank(c)) {
        pos += 1;
    }
    while pos < buf.len() && buf.char_at(pos).is_some_and(is_blank) {
        pos += 1;
    }
    pos
}

/// Start of the previous word in the three-class regime: skip whitespace
/// back, then the run of whatever class (word or punctuation) precedes it.
pub fn word_backward(buf: &LineBuffer, from: usize) -> usize {
    let mut pos = from.min(buf.len());
    while pos > 0 && class_at(buf, pos - 1) == Some(CharClass::Whitespace) {
        pos -= 1;
    }
    if pos == 0 {
        return 0;
    }
    let run = class_at(buf, pos - 1);
    while pos > 0 && class_at(buf, pos - 1) == run {
        pos -= 1;
    }
    pos
}

/// Start of the next word: skip the current class run (word or punctuation),
/// then any whitespace after it.
pub fn word_forward(buf: &LineBuffer, from: usize) -> usize {
    let mut pos = from.min(buf.len());
    if let Some(run) = class_at(buf, pos)
        && run != CharClass::Whitespace
    {
        while pos < buf.len() && class_at(buf, pos) == Some(run) {
            pos += 1;
        }
    }
    while pos < buf.len() && class_at(buf, pos) == Some(CharClass::Whitespace) {
        pos += 1;
    }
    pos
}

fn class_at(buf: &LineBuffer, pos: usize) -> Option<CharClass> {
    buf.char_at(pos).map(CharClass::of)
}
