//! Codepoint classification for word motions.
//!
//! Two regimes exist because they produce different motions: the word regime
//! distinguishes word characters, punctuation, and whitespace (vi `w`/`b`),
//! while the big-word regime only distinguishes whitespace from everything
//! else (vi `W`/`B`). Both are pure functions with no state.

/// Three-class regime used by word motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    Word,
    Punctuation,
}

impl CharClass {
    /// Classify a codepoint: word characters are alphanumerics plus `_`.
    pub fn of(ch: char) -> Self {
        if ch.is_whitespace() {
            CharClass::Whitespace
        } else if ch == '_' || ch.is_alphanumeric() {
            CharClass::Word
        } else {
            CharClass::Punctuation
        }
    }
}

/// Two-class big-word regime: token boundaries are whitespace only.
pub fn is_blank(ch: char) -> bool {
    ch.is_whitespace()
}
