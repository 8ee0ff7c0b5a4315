//! Key event model and renderer notification boundary.
//!
//! The engine consumes one logical key at a time; escape-sequence parsing and
//! raw byte handling belong to the transport layer feeding this type. The
//! renderer side of the boundary is the `BufferListener` trait, fired after
//! every mutating operation with a snapshot of the buffer and cursor.

use std::fmt;

/// Normalized logical key consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    /// Plain printable key with no modifiers.
    pub fn char(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            mods: KeyModifiers::empty(),
        }
    }

    /// Control-chord over a printable key.
    pub fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            mods: KeyModifiers::CTRL,
        }
    }

    /// Alt/meta-chord over a printable key.
    pub fn alt(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            mods: KeyModifiers::ALT,
        }
    }

    pub fn named(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::empty(),
        }
    }
}

/// Logical key identity. Printable input arrives as `Char`; everything else
/// is a named key already decoded by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Delete,
    Left,
    Right,
    Home,
    End,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

/// Renderer-facing notification hook. Consumers own any diffing or redraw
/// policy; the engine only reports that the buffer changed.
pub trait BufferListener {
    fn buffer_changed(&mut self, buffer: &[char], cursor: usize);
}

/// Default no-op listener.
pub struct NoopBufferListener;

impl BufferListener for NoopBufferListener {
    fn buffer_changed(&mut self, _buffer: &[char], _cursor: usize) {}
}
