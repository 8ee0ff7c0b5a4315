//! Motion span resolution for operator application.
//!
//! Given a starting offset, a `MotionKind`, and a count, compute the
//! codepoint range `[start, end)` an operator acts on. Counts apply by
//! replaying the motion on a temporary offset; the range never mutates the
//! buffer. Centralizing this guarantees operator application and plain
//! motions can never disagree about where a word starts.

use line_text::{LineBuffer, MotionKind, motion};

/// Resolve the half-open span between `from` and the motion target after
/// `count` applications. Returns a normalized `(start, end)`; equal
/// endpoints mean the motion did not move and the operator has nothing to
/// act on.
pub fn resolve(buf: &LineBuffer, from: usize, kind: MotionKind, count: u32) -> (usize, usize) {
    let from = from.min(buf.len());
    let mut pos = from;
    for _ in 0..count.max(1) {
        let next = motion::target(buf, pos, kind);
        if next == pos {
            break;
        }
        pos = next;
    }
    if pos < from { (pos, from) } else { (from, pos) }
}
