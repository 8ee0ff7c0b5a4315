//! Per-session interaction coordinator.
//!
//! An `Interaction` owns exactly one buffer, one active mode, and one undo
//! history for the lifetime of a logical editing session (one line being
//! composed). Key events arrive one at a time from the transport layer and
//! are processed fully before the next: translate, dispatch, record undo
//! state ahead of any mutation, then notify the renderer listener if the
//! buffer's dirty flag is set. Nothing here blocks, suspends, or shares
//! state across sessions, so concurrent sessions need no locking.

pub mod span;

use line_config::{Config, EditingConfig, KeymapFlavor};
use line_events::{BufferListener, KeyEvent};
use line_keymap::{Action, InsertEntry, KeyTranslator, OperatorKind};
use line_state::{Mode, SelectionModel, UndoEngine};
use line_text::{LineBuffer, MotionKind, motion};
use tracing::{debug, trace};

pub use line_config::load_from as load_config;
pub use line_keymap::Action as KeyAction;

/// Result of feeding one key event through the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Key was bound and processed (possibly a boundary no-op motion).
    Handled,
    /// Key unbound in the current mode; silently dropped.
    Ignored,
    /// End-of-line: the composed content, with the session reset.
    Submitted(String),
    /// Undo or redo found no history to traverse. Callers decide how to
    /// surface this (bell, flash); it is not an error.
    HistoryEmpty,
}

/// One editing session: buffer, mode machine, undo log, pending key state.
pub struct Interaction {
    buffer: LineBuffer,
    mode: Mode,
    initial_mode: Mode,
    undo: UndoEngine,
    translator: KeyTranslator,
    selection: SelectionModel,
    listener: Option<Box<dyn BufferListener>>,
}

impl Interaction {
    /// Fresh session in the configured flavor's initial mode.
    pub fn new(editing: &EditingConfig) -> Self {
        let initial_mode = match editing.keymap {
            KeymapFlavor::Emacs => Mode::Emacs,
            KeymapFlavor::Vi => Mode::Normal,
        };
        Self {
            buffer: LineBuffer::new(),
            mode: initial_mode,
            initial_mode,
            undo: UndoEngine::with_capacity(editing.undo_history),
            translator: KeyTranslator::new(),
            selection: SelectionModel::default(),
            listener: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.file.editing)
    }

    /// Session with pre-filled content, cursor at the end.
    pub fn with_content(editing: &EditingConfig, content: &str) -> Self {
        let mut session = Self::new(editing);
        session.buffer = LineBuffer::from_str(content);
        session
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }

    /// Host-driven undo, equivalent to the bound key. Returns `false` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let restored = self.undo.undo(&mut self.buffer);
        self.notify_if_dirty();
        restored
    }

    /// Host-driven redo; inverse traversal of `undo`.
    pub fn redo(&mut self) -> bool {
        let restored = self.undo.redo(&mut self.buffer);
        self.notify_if_dirty();
        restored
    }

    /// Install the renderer hook fired after every mutating operation.
    pub fn set_listener(&mut self, listener: Box<dyn BufferListener>) {
        self.listener = Some(listener);
    }

    /// Feed one logical key through translate → dispatch → notify.
    pub fn handle_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        let Some(action) = self.translator.translate(self.mode, key) else {
            trace!(target: "engine.dispatch", mode = ?self.mode, key = %key, "key_unbound_or_pending");
            return KeyOutcome::Ignored;
        };
        let outcome = self.dispatch(action);
        self.notify_if_dirty();
        outcome
    }

    /// Return the composed line and reset the session to its initial state.
    pub fn submit_line(&mut self) -> String {
        let line = self.buffer.to_string();
        debug!(target: "engine.dispatch", len = line.chars().count(), "line_submitted");
        self.buffer.reset();
        self.undo.reset();
        self.translator.reset();
        self.selection.clear();
        self.mode = self.initial_mode;
        self.notify_if_dirty();
        line
    }

    fn dispatch(&mut self, action: Action) -> KeyOutcome {
        trace!(target: "engine.dispatch", action = ?action, mode = ?self.mode, cursor = self.buffer.cursor(), "dispatch");
        match action {
            Action::Motion { motion: kind, count } => {
                self.apply_motion(kind, count);
                KeyOutcome::Handled
            }
            Action::ApplyOperator { op, motion: kind, count } => {
                let (start, end) = span::resolve(&self.buffer, self.buffer.cursor(), kind, count);
                self.apply_operator(op, start, end)
            }
            Action::LinewiseOperator { op } => {
                let len = self.buffer.len();
                self.apply_operator(op, 0, len)
            }
            Action::VisualOperator { op } => {
                let span = self
                    .selection
                    .span(self.buffer.cursor(), self.buffer.len());
                self.selection.clear();
                match span {
                    Some((start, end)) => {
                        let outcome = self.apply_operator(op, start, end);
                        if self.mode == Mode::Visual {
                            self.set_mode(Mode::Normal);
                        }
                        outcome
                    }
                    None => {
                        self.set_mode(Mode::Normal);
                        KeyOutcome::Handled
                    }
                }
            }
            Action::InsertChar(c) => {
                self.record_snapshot();
                self.buffer.insert_at_cursor(c);
                KeyOutcome::Handled
            }
            Action::ReplaceChar(c) => {
                self.record_snapshot();
                let pos = self.buffer.cursor();
                self.buffer.replace_at(pos, c);
                self.buffer.set_cursor(pos + 1);
                KeyOutcome::Handled
            }
            Action::DeleteUnder => {
                let pos = self.buffer.cursor();
                if pos < self.buffer.len() {
                    self.record_snapshot();
                    self.buffer.delete_range(pos, pos + 1);
                }
                KeyOutcome::Handled
            }
            Action::DeleteBefore => {
                let pos = self.buffer.cursor();
                if pos > 0 {
                    self.record_snapshot();
                    self.buffer.delete_range(pos - 1, pos);
                }
                KeyOutcome::Handled
            }
            Action::EnterInsert(entry) => {
                let cursor = match entry {
                    InsertEntry::Before => self.buffer.cursor(),
                    InsertEntry::After => self.buffer.cursor() + 1,
                    InsertEntry::LineStart => 0,
                    InsertEntry::LineEnd => self.buffer.len(),
                };
                self.buffer.set_cursor(cursor);
                self.set_mode(Mode::Insert);
                KeyOutcome::Handled
            }
            Action::EnterReplace => {
                self.set_mode(Mode::Replace);
                KeyOutcome::Handled
            }
            Action::ToggleVisual => {
                self.selection.start(self.buffer.cursor());
                self.set_mode(Mode::Visual);
                KeyOutcome::Handled
            }
            Action::EscapeToNormal => {
                if self.mode == Mode::Insert {
                    // Leaving Insert rests the cursor on the last entered
                    // codepoint, modal convention.
                    let pos = self.buffer.cursor();
                    self.buffer.set_cursor(pos.saturating_sub(1));
                }
                self.selection.clear();
                let target = self.mode.escape_target();
                self.set_mode(target);
                KeyOutcome::Handled
            }
            Action::Undo => {
                if self.undo.undo(&mut self.buffer) {
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::HistoryEmpty
                }
            }
            Action::Redo => {
                if self.undo.redo(&mut self.buffer) {
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::HistoryEmpty
                }
            }
            Action::Submit => KeyOutcome::Submitted(self.submit_line()),
        }
    }

    fn apply_motion(&mut self, kind: MotionKind, count: u32) {
        let mut pos = self.buffer.cursor();
        for _ in 0..count.max(1) {
            let next = motion::target(&self.buffer, pos, kind);
            if next == pos {
                break;
            }
            pos = next;
        }
        self.buffer.set_cursor(pos);
    }

    /// Delete `[start, end)`, recording the pre-mutation state first. The
    /// `Change` policy transitions to Insert even when the span was empty.
    fn apply_operator(&mut self, op: OperatorKind, start: usize, end: usize) -> KeyOutcome {
        if start < end {
            self.record_snapshot();
            let removed = self.buffer.delete_range(start, end);
            self.buffer.set_cursor(start);
            debug!(target: "engine.dispatch", op = ?op, start, removed = removed.len(), "operator_applied");
        }
        if op == OperatorKind::Change {
            self.set_mode(Mode::Insert);
        }
        KeyOutcome::Handled
    }

    fn record_snapshot(&mut self) {
        self.undo.record(self.buffer.cursor(), &self.buffer);
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!(target: "engine.dispatch", from = ?self.mode, to = ?mode, "mode_transition");
            self.mode = mode;
            self.translator.reset();
        }
    }

    fn notify_if_dirty(&mut self) {
        if self.buffer.take_dirty()
            && let Some(listener) = self.listener.as_mut()
        {
            listener.buffer_changed(self.buffer.as_slice(), self.buffer.cursor());
        }
    }
}
