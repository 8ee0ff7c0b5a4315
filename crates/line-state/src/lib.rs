//! Edit mode state machine and undo history.
//!
//! Mode is a closed set with exactly one active value per session. The Emacs
//! family is a single state (all bindings live in one table); the vi family
//! is modal. Transitions are driven by dispatched actions, never inside
//! binding functions themselves, so the machine stays inspectable from one
//! place.
//!
//! Undo snapshots capture buffer and cursor but deliberately not mode:
//! undoing a `cw` that dropped you into Insert mode restores the text while
//! leaving you in Insert, matching the convention that leaving Insert with
//! `Esc` then undoing must not re-enter it.

pub mod undo;
pub use undo::{UNDO_HISTORY_MAX, UndoAction, UndoEngine};

/// The active editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Single-state Emacs family: no modal distinction.
    Emacs,
    /// Vi command mode.
    Normal,
    /// Vi text entry.
    Insert,
    /// Vi overwrite entry.
    Replace,
    /// Vi characterwise selection.
    Visual,
}

impl Mode {
    /// True for every vi-family state.
    pub fn is_vi(self) -> bool {
        !matches!(self, Mode::Emacs)
    }

    /// True for states where printable keys enter text directly.
    pub fn is_text_entry(self) -> bool {
        matches!(self, Mode::Emacs | Mode::Insert | Mode::Replace)
    }

    /// Where `Esc` lands from this state. Emacs has nowhere to go; the vi
    /// entry states all fall back to Normal.
    pub fn escape_target(self) -> Mode {
        match self {
            Mode::Emacs => Mode::Emacs,
            _ => Mode::Normal,
        }
    }
}

/// Characterwise selection anchor for Visual mode.
///
/// The anchor is fixed where Visual was entered; the live cursor forms the
/// other endpoint. The span handed to operators is inclusive of the codepoint
/// under the later endpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectionModel {
    pub anchor: Option<usize>,
}

impl SelectionModel {
    pub fn start(&mut self, at: usize) {
        self.anchor = Some(at);
    }

    pub fn clear(&mut self) {
        self.anchor = None;
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Half-open span covering anchor..cursor inclusive of the endpoint
    /// codepoint, clamped to `len`. `None` when no selection is active.
    pub fn span(&self, cursor: usize, len: usize) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        let (a, b) = if anchor <= cursor {
            (anchor, cursor)
        } else {
            (cursor, anchor)
        };
        Some((a.min(len), (b + 1).min(len).max(a.min(len))))
    }
}
