//! Shared session builders and key-feeding helpers for integration tests.
#![allow(dead_code)] // not every suite uses every helper

use line_config::{EditingConfig, KeymapFlavor};
use line_engine::{Interaction, KeyOutcome};
use line_events::{KeyCode, KeyEvent};

pub fn vi_session(content: &str) -> Interaction {
    Interaction::with_content(
        &EditingConfig {
            keymap: KeymapFlavor::Vi,
            undo_history: 200,
        },
        content,
    )
}

pub fn emacs_session(content: &str) -> Interaction {
    Interaction::with_content(&EditingConfig::default(), content)
}

/// Feed a sequence of printable keys (`"2dw"`, `"ihello"`, ...).
pub fn feed(session: &mut Interaction, keys: &str) -> KeyOutcome {
    let mut last = KeyOutcome::Ignored;
    for c in keys.chars() {
        last = session.handle_key(&KeyEvent::char(c));
    }
    last
}

pub fn esc(session: &mut Interaction) -> KeyOutcome {
    session.handle_key(&KeyEvent::named(KeyCode::Esc))
}

pub fn enter(session: &mut Interaction) -> KeyOutcome {
    session.handle_key(&KeyEvent::named(KeyCode::Enter))
}
