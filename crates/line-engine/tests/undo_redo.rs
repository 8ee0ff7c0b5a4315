//! Undo/redo round trips through the full key pipeline.

mod common;
use common::*;

use line_engine::KeyOutcome;
use line_events::KeyEvent;
use line_state::Mode;

#[test]
fn undo_once_per_mutation_restores_original() {
    let mut s = vi_session("hello world");
    feed(&mut s, "dbx0x");
    assert_ne!(s.buffer().to_string(), "hello world");
    let mutations = s.undo_depth();
    for _ in 0..mutations {
        assert!(s.undo());
    }
    assert_eq!(s.buffer().to_string(), "hello world");
    assert_eq!(s.cursor(), 11);
}

#[test]
fn undo_key_in_normal_mode() {
    let mut s = vi_session("abc");
    feed(&mut s, "x");
    // Cursor at end: X-style delete via "X" then undo with 'u'.
    feed(&mut s, "X");
    assert_eq!(s.buffer().to_string(), "ab");
    assert_eq!(feed(&mut s, "u"), KeyOutcome::Handled);
    assert_eq!(s.buffer().to_string(), "abc");
    assert_eq!(feed(&mut s, "u"), KeyOutcome::HistoryEmpty);
}

#[test]
fn redo_reapplies_undone_mutation() {
    let mut s = vi_session("hello world");
    feed(&mut s, "db");
    assert_eq!(s.buffer().to_string(), "hello ");
    assert!(s.undo());
    assert_eq!(s.buffer().to_string(), "hello world");
    assert_eq!(
        s.handle_key(&KeyEvent::ctrl('r')),
        KeyOutcome::Handled
    );
    assert_eq!(s.buffer().to_string(), "hello ");
}

#[test]
fn new_mutation_after_undo_clears_redo() {
    let mut s = vi_session("hello world");
    feed(&mut s, "db");
    assert!(s.undo());
    feed(&mut s, "X");
    assert_eq!(
        s.handle_key(&KeyEvent::ctrl('r')),
        KeyOutcome::HistoryEmpty
    );
}

#[test]
fn change_word_backward_snapshot_scenario() {
    // "abc", cursor at end, Normal mode: change-word-backward empties the
    // buffer, enters Insert, and leaves exactly one snapshot of the
    // pre-mutation state. Undo restores text and cursor; mode is not part
    // of undo state and stays Insert.
    let mut s = vi_session("abc");
    assert_eq!(s.cursor(), 3);
    feed(&mut s, "cb");
    assert_eq!(s.buffer().to_string(), "");
    assert_eq!(s.mode(), Mode::Insert);
    assert_eq!(s.undo_depth(), 1);
    assert!(s.undo());
    assert_eq!(s.buffer().to_string(), "abc");
    assert_eq!(s.cursor(), 3);
    assert_eq!(s.mode(), Mode::Insert);
}

#[test]
fn undo_restores_codepoint_for_codepoint() {
    let mut s = vi_session("héllo 😀 wörld");
    let original = s.buffer().to_string();
    feed(&mut s, "dB");
    feed(&mut s, "dB");
    for _ in 0..s.undo_depth() {
        assert!(s.undo());
    }
    assert_eq!(s.buffer().to_string(), original);
}

#[test]
fn typing_undoes_per_keystroke() {
    let mut s = vi_session("");
    feed(&mut s, "iab");
    assert_eq!(s.buffer().to_string(), "ab");
    assert!(s.undo());
    assert_eq!(s.buffer().to_string(), "a");
    assert!(s.undo());
    assert_eq!(s.buffer().to_string(), "");
    assert!(!s.undo());
}

#[test]
fn emacs_undo_binding() {
    let mut s = emacs_session("");
    feed(&mut s, "ab");
    assert_eq!(
        s.handle_key(&KeyEvent::ctrl('_')),
        KeyOutcome::Handled
    );
    assert_eq!(s.buffer().to_string(), "a");
}
