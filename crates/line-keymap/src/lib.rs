//! Stateful key → action translation.
//!
//! Resolution is a pure lookup per `(mode, key)`: each mode owns an explicit
//! binding table and no bound function branches on mode internally. The only
//! carried state is the Normal-mode pending context (count prefixes and a
//! pending operator awaiting its motion), mirroring the operator + motion
//! composition rule: count semantics are multiplicative (`2d3w` deletes six
//! words) and a leading `0` is the line-start motion rather than a count.
//!
//! Unbound keys translate to `None` and are silently dropped by the caller;
//! binding lookup is total for printable input by construction.

use line_events::{KeyCode, KeyEvent, KeyModifiers};
use line_state::Mode;
use line_text::MotionKind;
use tracing::{debug, trace};

/// Upper bound on accumulated counts; prevents overflow on held-down digits.
const COUNT_MAX: u32 = 999_999;

/// Mutation policy composed with a motion by an operator binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// Remove the span, stay in the current mode.
    Delete,
    /// Remove the span, then enter Insert mode.
    Change,
}

/// Cursor placement when entering Insert mode from Normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertEntry {
    /// `i` — insert before the cursor.
    Before,
    /// `a` — insert after the cursor.
    After,
    /// `I` — insert at the start of the line.
    LineStart,
    /// `A` — insert at the end of the line.
    LineEnd,
}

/// Fully composed action handed to the dispatcher. Exactly one is emitted
/// per resolved key; keys that only extend pending state emit nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion {
        motion: MotionKind,
        count: u32,
    },
    /// Operator + motion pair (`dw`, `cb`, `d$`, ...).
    ApplyOperator {
        op: OperatorKind,
        motion: MotionKind,
        count: u32,
    },
    /// Doubled operator (`dd`, `cc`) covering the whole line.
    LinewiseOperator {
        op: OperatorKind,
    },
    /// Operator applied to the active Visual selection.
    VisualOperator {
        op: OperatorKind,
    },
    InsertChar(char),
    ReplaceChar(char),
    /// Delete the codepoint under the cursor (`x`, `C-d`, Delete).
    DeleteUnder,
    /// Delete the codepoint before the cursor (`X`, Backspace).
    DeleteBefore,
    EnterInsert(InsertEntry),
    EnterReplace,
    ToggleVisual,
    /// `Esc` from a vi entry state; also cancels any pending context.
    EscapeToNormal,
    Undo,
    Redo,
    /// End-of-line signalled by the session (`Enter`).
    Submit,
}

/// Pending Normal-mode context plus the per-mode dispatch entrypoint.
#[derive(Debug, Default)]
pub struct KeyTranslator {
    /// Count prefix before an operator or motion (`12w`, `12d...`).
    pending_count: Option<u32>,
    /// Operator awaiting its motion.
    pending_operator: Option<OperatorKind>,
    /// Count between operator and motion (`d3w`).
    post_op_count: Option<u32>,
}

impl KeyTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear pending counts and operator. Invoked on `Esc`, on submit, and
    /// on mode transitions.
    pub fn reset(&mut self) {
        self.pending_count = None;
        self.pending_operator = None;
        self.post_op_count = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending_count.is_some()
            || self.pending_operator.is_some()
            || self.post_op_count.is_some()
    }

    /// Translate one key in the given mode. `None` means either an unbound
    /// key (dropped) or a key that only extended pending state.
    pub fn translate(&mut self, mode: Mode, key: &KeyEvent) -> Option<Action> {
        trace!(target: "keymap.translate", mode = ?mode, key = %key, "translate_key");
        match mode {
            Mode::Emacs => map_emacs(key),
            Mode::Insert => map_insert(key),
            Mode::Replace => map_replace(key),
            Mode::Visual => map_visual(key),
            Mode::Normal => self.translate_normal(key),
        }
    }

    fn translate_normal(&mut self, key: &KeyEvent) -> Option<Action> {
        if key.mods.contains(KeyModifiers::CTRL) {
            if let KeyCode::Char('r') = key.code {
                self.reset();
                return Some(Action::Redo);
            }
            return None;
        }
        match key.code {
            KeyCode::Esc => {
                // Cancel pending state; Normal has no further escape target.
                self.reset();
                None
            }
            KeyCode::Enter => {
                self.reset();
                Some(Action::Submit)
            }
            KeyCode::Char(c) => self.translate_normal_char(c, key),
            _ => {
                // Named keys (arrows, Home/End) act as motions with any
                // accumulated count.
                let motion = normal_motion(key)?;
                let count = self.take_counts();
                Some(Action::Motion { motion, count })
            }
        }
    }

    fn translate_normal_char(&mut self, c: char, key: &KeyEvent) -> Option<Action> {
        if let Some(op) = self.pending_operator {
            return self.translate_operator_pending(op, c, key);
        }
        if c.is_ascii_digit() {
            if c == '0' && self.pending_count.is_none() {
                return Some(Action::Motion {
                    motion: MotionKind::LineStart,
                    count: 1,
                });
            }
            self.pending_count = Some(extend_count(self.pending_count, c));
            return None;
        }
        if let Some(op) = operator_for(c) {
            self.pending_operator = Some(op);
            self.post_op_count = None;
            debug!(target: "keymap.translate", op = ?op, "operator_pending");
            return None;
        }
        if let Some(motion) = normal_motion(key) {
            let count = self.take_counts();
            return Some(Action::Motion { motion, count });
        }
        // Non-motion command keys drop any accumulated count.
        self.pending_count = None;
        match c {
            'x' => Some(Action::DeleteUnder),
            'X' => Some(Action::DeleteBefore),
            'D' => Some(Action::ApplyOperator {
                op: OperatorKind::Delete,
                motion: MotionKind::LineEnd,
                count: 1,
            }),
            'C' => Some(Action::ApplyOperator {
                op: OperatorKind::Change,
                motion: MotionKind::LineEnd,
                count: 1,
            }),
            'i' => Some(Action::EnterInsert(InsertEntry::Before)),
            'a' => Some(Action::EnterInsert(InsertEntry::After)),
            'I' => Some(Action::EnterInsert(InsertEntry::LineStart)),
            'A' => Some(Action::EnterInsert(InsertEntry::LineEnd)),
            'R' => Some(Action::EnterReplace),
            'v' => Some(Action::ToggleVisual),
            'u' => Some(Action::Undo),
            _ => None,
        }
    }

    fn translate_operator_pending(
        &mut self,
        op: OperatorKind,
        c: char,
        key: &KeyEvent,
    ) -> Option<Action> {
        if c.is_ascii_digit() {
            if c == '0' && self.post_op_count.is_none() {
                // `d0` — leading zero is the line-start motion.
                let count = self.take_counts();
                self.pending_operator = None;
                return Some(Action::ApplyOperator {
                    op,
                    motion: MotionKind::LineStart,
                    count,
                });
            }
            self.post_op_count = Some(extend_count(self.post_op_count, c));
            return None;
        }
        if operator_for(c) == Some(op) {
            self.pending_operator = None;
            self.take_counts();
            debug!(target: "keymap.translate", op = ?op, "linewise_operator");
            return Some(Action::LinewiseOperator { op });
        }
        if let Some(motion) = normal_motion(key) {
            let count = self.take_counts();
            self.pending_operator = None;
            debug!(target: "keymap.translate", op = ?op, motion = ?motion, count, "apply_operator");
            return Some(Action::ApplyOperator { op, motion, count });
        }
        // Not a motion: cancel the operator and retranslate the key plainly.
        self.pending_operator = None;
        self.post_op_count = None;
        self.translate_normal_char(c, key)
    }

    /// Consume prefix and post-operator counts multiplicatively.
    fn take_counts(&mut self) -> u32 {
        let prefix = self.pending_count.take().unwrap_or(1);
        let post = self.post_op_count.take().unwrap_or(1);
        prefix.saturating_mul(post).clamp(1, COUNT_MAX)
    }
}

fn extend_count(current: Option<u32>, digit: char) -> u32 {
    let d = (digit as u8 - b'0') as u32;
    current
        .unwrap_or(0)
        .saturating_mul(10)
        .saturating_add(d)
        .min(COUNT_MAX)
}

fn operator_for(c: char) -> Option<OperatorKind> {
    match c {
        'd' => Some(OperatorKind::Delete),
        'c' => Some(OperatorKind::Change),
        _ => None,
    }
}

/// Normal/Visual motion keys. `0` is handled earlier because of the count
/// ambiguity.
fn normal_motion(key: &KeyEvent) -> Option<MotionKind> {
    if key.mods.contains(KeyModifiers::CTRL) || key.mods.contains(KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Some(MotionKind::Left),
        KeyCode::Char('l') | KeyCode::Right => Some(MotionKind::Right),
        KeyCode::Char('$') | KeyCode::End => Some(MotionKind::LineEnd),
        KeyCode::Home => Some(MotionKind::LineStart),
        KeyCode::Char('w') => Some(MotionKind::WordForward),
        KeyCode::Char('b') => Some(MotionKind::WordBackward),
        KeyCode::Char('W') => Some(MotionKind::BigWordForward),
        KeyCode::Char('B') => Some(MotionKind::BigWordBackward),
        _ => None,
    }
}

fn motion(motion: MotionKind) -> Option<Action> {
    Some(Action::Motion { motion, count: 1 })
}

/// Emacs binding table: one state, chords select among motions, kills, and
/// self-insertion.
fn map_emacs(key: &KeyEvent) -> Option<Action> {
    if key.mods.contains(KeyModifiers::CTRL) {
        return match key.code {
            KeyCode::Char('a') => motion(MotionKind::LineStart),
            KeyCode::Char('e') => motion(MotionKind::LineEnd),
            KeyCode::Char('b') => motion(MotionKind::Left),
            KeyCode::Char('f') => motion(MotionKind::Right),
            KeyCode::Char('d') => Some(Action::DeleteUnder),
            KeyCode::Char('h') => Some(Action::DeleteBefore),
            // Kill bindings reuse the operator family.
            KeyCode::Char('k') => Some(Action::ApplyOperator {
                op: OperatorKind::Delete,
                motion: MotionKind::LineEnd,
                count: 1,
            }),
            KeyCode::Char('u') => Some(Action::ApplyOperator {
                op: OperatorKind::Delete,
                motion: MotionKind::LineStart,
                count: 1,
            }),
            KeyCode::Char('w') => Some(Action::ApplyOperator {
                op: OperatorKind::Delete,
                motion: MotionKind::BigWordBackward,
                count: 1,
            }),
            KeyCode::Char('_') | KeyCode::Char('/') => Some(Action::Undo),
            _ => None,
        };
    }
    if key.mods.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('b') => motion(MotionKind::WordBackward),
            KeyCode::Char('f') => motion(MotionKind::WordForward),
            KeyCode::Char('d') => Some(Action::ApplyOperator {
                op: OperatorKind::Delete,
                motion: MotionKind::WordForward,
                count: 1,
            }),
            KeyCode::Backspace => Some(Action::ApplyOperator {
                op: OperatorKind::Delete,
                motion: MotionKind::WordBackward,
                count: 1,
            }),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(c) => Some(Action::InsertChar(c)),
        KeyCode::Backspace => Some(Action::DeleteBefore),
        KeyCode::Delete => Some(Action::DeleteUnder),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Left => motion(MotionKind::Left),
        KeyCode::Right => motion(MotionKind::Right),
        KeyCode::Home => motion(MotionKind::LineStart),
        KeyCode::End => motion(MotionKind::LineEnd),
        KeyCode::Tab | KeyCode::Esc => None,
    }
}

fn map_insert(key: &KeyEvent) -> Option<Action> {
    if key.mods.contains(KeyModifiers::CTRL) || key.mods.contains(KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(Action::InsertChar(c)),
        KeyCode::Esc => Some(Action::EscapeToNormal),
        KeyCode::Backspace => Some(Action::DeleteBefore),
        KeyCode::Delete => Some(Action::DeleteUnder),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Left => motion(MotionKind::Left),
        KeyCode::Right => motion(MotionKind::Right),
        KeyCode::Home => motion(MotionKind::LineStart),
        KeyCode::End => motion(MotionKind::LineEnd),
        KeyCode::Tab => None,
    }
}

fn map_replace(key: &KeyEvent) -> Option<Action> {
    if key.mods.contains(KeyModifiers::CTRL) || key.mods.contains(KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(Action::ReplaceChar(c)),
        KeyCode::Esc => Some(Action::EscapeToNormal),
        // Backspace in Replace retreats without restoring overwritten text.
        KeyCode::Backspace | KeyCode::Left => motion(MotionKind::Left),
        KeyCode::Right => motion(MotionKind::Right),
        KeyCode::Enter => Some(Action::Submit),
        _ => None,
    }
}

fn map_visual(key: &KeyEvent) -> Option<Action> {
    if key.mods.contains(KeyModifiers::CTRL) || key.mods.contains(KeyModifiers::ALT) {
        return None;
    }
    if let Some(m) = normal_motion(key) {
        return Some(Action::Motion {
            motion: m,
            count: 1,
        });
    }
    match key.code {
        KeyCode::Char('0') => motion(MotionKind::LineStart),
        KeyCode::Char('d') | KeyCode::Char('x') => Some(Action::VisualOperator {
            op: OperatorKind::Delete,
        }),
        KeyCode::Char('c') => Some(Action::VisualOperator {
            op: OperatorKind::Change,
        }),
        KeyCode::Char('v') | KeyCode::Esc => Some(Action::EscapeToNormal),
        KeyCode::Enter => Some(Action::Submit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feed(seq: &str) -> Vec<Action> {
        let mut tr = KeyTranslator::new();
        seq.chars()
            .filter_map(|c| tr.translate(Mode::Normal, &KeyEvent::char(c)))
            .collect()
    }

    #[test]
    fn simple_motion() {
        assert_eq!(
            feed("w"),
            vec![Action::Motion {
                motion: MotionKind::WordForward,
                count: 1
            }]
        );
    }

    #[test]
    fn count_prefix_motion() {
        assert_eq!(
            feed("5w"),
            vec![Action::Motion {
                motion: MotionKind::WordForward,
                count: 5
            }]
        );
    }

    #[test]
    fn leading_zero_is_line_start() {
        assert_eq!(
            feed("0"),
            vec![Action::Motion {
                motion: MotionKind::LineStart,
                count: 1
            }]
        );
    }

    #[test]
    fn zero_extends_existing_count() {
        assert_eq!(
            feed("10l"),
            vec![Action::Motion {
                motion: MotionKind::Left,
                count: 10
            }]
        );
    }

    #[test]
    fn operator_motion_composition() {
        assert_eq!(
            feed("dw"),
            vec![Action::ApplyOperator {
                op: OperatorKind::Delete,
                motion: MotionKind::WordForward,
                count: 1
            }]
        );
        assert_eq!(
            feed("cB"),
            vec![Action::ApplyOperator {
                op: OperatorKind::Change,
                motion: MotionKind::BigWordBackward,
                count: 1
            }]
        );
    }

    #[test]
    fn multiplicative_counts() {
        assert_eq!(
            feed("2d3w"),
            vec![Action::ApplyOperator {
                op: OperatorKind::Delete,
                motion: MotionKind::WordForward,
                count: 6
            }]
        );
    }

    #[test]
    fn doubled_operator_is_linewise() {
        assert_eq!(
            feed("dd"),
            vec![Action::LinewiseOperator {
                op: OperatorKind::Delete
            }]
        );
        assert_eq!(
            feed("cc"),
            vec![Action::LinewiseOperator {
                op: OperatorKind::Change
            }]
        );
    }

    #[test]
    fn d0_deletes_to_line_start() {
        assert_eq!(
            feed("d0"),
            vec![Action::ApplyOperator {
                op: OperatorKind::Delete,
                motion: MotionKind::LineStart,
                count: 1
            }]
        );
    }

    #[test]
    fn esc_cancels_pending_operator() {
        let mut tr = KeyTranslator::new();
        assert_eq!(tr.translate(Mode::Normal, &KeyEvent::char('d')), None);
        assert!(tr.has_pending());
        assert_eq!(
            tr.translate(Mode::Normal, &KeyEvent::named(KeyCode::Esc)),
            None
        );
        assert!(!tr.has_pending());
        // Next 'w' is a plain motion, not a deletion.
        assert_eq!(
            tr.translate(Mode::Normal, &KeyEvent::char('w')),
            Some(Action::Motion {
                motion: MotionKind::WordForward,
                count: 1
            })
        );
    }

    #[test]
    fn non_motion_after_operator_cancels_it() {
        assert_eq!(feed("dx"), vec![Action::DeleteUnder]);
    }

    #[test]
    fn shorthand_line_end_operators() {
        assert_eq!(
            feed("D"),
            vec![Action::ApplyOperator {
                op: OperatorKind::Delete,
                motion: MotionKind::LineEnd,
                count: 1
            }]
        );
        assert_eq!(
            feed("C"),
            vec![Action::ApplyOperator {
                op: OperatorKind::Change,
                motion: MotionKind::LineEnd,
                count: 1
            }]
        );
    }

    #[test]
    fn unbound_normal_key_is_noop() {
        assert_eq!(feed("q"), vec![]);
    }

    #[test]
    fn redo_is_ctrl_r() {
        let mut tr = KeyTranslator::new();
        assert_eq!(
            tr.translate(Mode::Normal, &KeyEvent::ctrl('r')),
            Some(Action::Redo)
        );
    }

    #[test]
    fn emacs_kill_bindings_compose_operators() {
        let mut tr = KeyTranslator::new();
        assert_eq!(
            tr.translate(Mode::Emacs, &KeyEvent::ctrl('w')),
            Some(Action::ApplyOperator {
                op: OperatorKind::Delete,
                motion: MotionKind::BigWordBackward,
                count: 1
            })
        );
        assert_eq!(
            tr.translate(Mode::Emacs, &KeyEvent::alt('d')),
            Some(Action::ApplyOperator {
                op: OperatorKind::Delete,
                motion: MotionKind::WordForward,
                count: 1
            })
        );
        assert_eq!(
            tr.translate(Mode::Emacs, &KeyEvent::ctrl('k')),
            Some(Action::ApplyOperator {
                op: OperatorKind::Delete,
                motion: MotionKind::LineEnd,
                count: 1
            })
        );
    }

    #[test]
    fn emacs_printable_self_inserts() {
        let mut tr = KeyTranslator::new();
        assert_eq!(
            tr.translate(Mode::Emacs, &KeyEvent::char('d')),
            Some(Action::InsertChar('d'))
        );
    }

    #[test]
    fn insert_mode_printable_and_escape() {
        let mut tr = KeyTranslator::new();
        assert_eq!(
            tr.translate(Mode::Insert, &KeyEvent::char('x')),
            Some(Action::InsertChar('x'))
        );
        assert_eq!(
            tr.translate(Mode::Insert, &KeyEvent::named(KeyCode::Esc)),
            Some(Action::EscapeToNormal)
        );
    }

    #[test]
    fn replace_mode_overwrites() {
        let mut tr = KeyTranslator::new();
        assert_eq!(
            tr.translate(Mode::Replace, &KeyEvent::char('z')),
            Some(Action::ReplaceChar('z'))
        );
    }

    #[test]
    fn visual_operators_and_exit() {
        let mut tr = KeyTranslator::new();
        assert_eq!(
            tr.translate(Mode::Visual, &KeyEvent::char('d')),
            Some(Action::VisualOperator {
                op: OperatorKind::Delete
            })
        );
        assert_eq!(
            tr.translate(Mode::Visual, &KeyEvent::char('v')),
            Some(Action::EscapeToNormal)
        );
    }
}
