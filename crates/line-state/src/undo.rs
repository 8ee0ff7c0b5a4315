//! Snapshot-based undo/redo history.
//!
//! Snapshots are taken before each mutating operation commits, so undoing N
//! times restores the buffer codepoint-for-codepoint to its state N
//! mutations ago. Undo pops from the past stack onto the future stack; any
//! new recording clears the future stack.

use line_text::LineBuffer;
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use tracing::trace;

/// Default cap on retained snapshots; the oldest entry is dropped on
/// overflow.
pub const UNDO_HISTORY_MAX: usize = 200;

/// Immutable pre-mutation snapshot. The buffer content is copied by value,
/// never aliasing the live buffer's storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoAction {
    pub cursor: usize,
    pub buffer: Vec<char>,
}

impl UndoAction {
    fn capture(cursor: usize, buffer: &LineBuffer) -> Self {
        Self {
            cursor,
            buffer: buffer.as_slice().to_vec(),
        }
    }
}

/// Strict, ordered log of pre-mutation states with pointer-based traversal.
#[derive(Debug)]
pub struct UndoEngine {
    undo_stack: Vec<UndoAction>,
    redo_stack: Vec<UndoAction>,
    capacity: usize,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::with_capacity(UNDO_HISTORY_MAX)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Push a pre-mutation snapshot. Successive identical states are
    /// deduplicated by content hash so repeated no-op dispatches do not pad
    /// the log.
    pub fn record(&mut self, cursor: usize, buffer: &LineBuffer) {
        let hash = content_hash(cursor, buffer.as_slice());
        if let Some(last) = self.undo_stack.last()
            && content_hash(last.cursor, &last.buffer) == hash
        {
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "snapshot_dedupe_skip");
            return;
        }
        self.undo_stack.push(UndoAction::capture(cursor, buffer));
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "record_snapshot");
        if self.undo_stack.len() > self.capacity {
            let _ = self.undo_stack.remove(0);
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Restore the most recent snapshot, moving the displaced current state
    /// onto the redo stack. Returns `false` when there is nothing to undo;
    /// callers surface that however they like (bell, flash), it is not an
    /// error.
    pub fn undo(&mut self, buffer: &mut LineBuffer) -> bool {
        let Some(last) = self.undo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "undo_pop");
        self.redo_stack
            .push(UndoAction::capture(buffer.cursor(), buffer));
        buffer.restore(last.buffer, last.cursor);
        true
    }

    /// Inverse traversal of `undo`. Returns `false` when the redo stack is
    /// empty.
    pub fn redo(&mut self, buffer: &mut LineBuffer) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), "redo_pop");
        self.undo_stack
            .push(UndoAction::capture(buffer.cursor(), buffer));
        buffer.restore(next.buffer, next.cursor);
        true
    }

    /// Drop all history; used when a line is submitted.
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn content_hash(cursor: usize, chars: &[char]) -> u64 {
    let mut h = DefaultHasher::new();
    h.write_usize(cursor);
    for ch in chars {
        h.write_u32(*ch as u32);
    }
    h.finish()
}
