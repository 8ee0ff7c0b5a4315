//! Big-word motion walks and renderer notification contract.

mod common;
use common::*;

use line_events::{BufferListener, KeyEvent};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn backward_big_word_walks_token_starts() {
    // Cursor at the end; each B lands on the start of the previous
    // whitespace-delimited token.
    let mut s = vi_session("hello   world foo");
    feed(&mut s, "B");
    assert_eq!(s.cursor(), 14);
    feed(&mut s, "B");
    assert_eq!(s.cursor(), 8);
    feed(&mut s, "B");
    assert_eq!(s.cursor(), 0);
    // Idempotent at the start of the buffer.
    feed(&mut s, "B");
    assert_eq!(s.cursor(), 0);
}

#[test]
fn backward_big_word_never_advances() {
    let s = vi_session("  a-b  c!d  ");
    let len = s.buffer().len();
    for start in 0..=len {
        let mut s = vi_session("  a-b  c!d  ");
        feed(&mut s, "0");
        for _ in 0..start {
            feed(&mut s, "l");
        }
        let before = s.cursor();
        feed(&mut s, "B");
        assert!(s.cursor() <= before);
    }
}

#[test]
fn count_applies_big_word_motion_iteratively() {
    let mut s = vi_session("hello   world foo");
    feed(&mut s, "2B");
    assert_eq!(s.cursor(), 8);
    let mut s = vi_session("hello   world foo");
    feed(&mut s, "9B");
    assert_eq!(s.cursor(), 0);
}

#[derive(Default)]
struct RecordingListener {
    snapshots: Rc<RefCell<Vec<(String, usize)>>>,
}

impl BufferListener for RecordingListener {
    fn buffer_changed(&mut self, buffer: &[char], cursor: usize) {
        self.snapshots
            .borrow_mut()
            .push((buffer.iter().collect(), cursor));
    }
}

#[test]
fn listener_fires_after_each_mutation_only() {
    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let mut s = emacs_session("");
    s.set_listener(Box::new(RecordingListener {
        snapshots: snapshots.clone(),
    }));

    feed(&mut s, "ab");
    // Pure motion: no notification.
    s.handle_key(&KeyEvent::ctrl('a'));
    s.handle_key(&KeyEvent::ctrl('e'));
    feed(&mut s, "c");

    let seen = snapshots.borrow();
    assert_eq!(
        *seen,
        vec![
            ("a".to_string(), 1),
            ("ab".to_string(), 2),
            ("abc".to_string(), 3),
        ]
    );
}

#[test]
fn listener_sees_undo_restores() {
    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let mut s = vi_session("abc");
    s.set_listener(Box::new(RecordingListener {
        snapshots: snapshots.clone(),
    }));
    feed(&mut s, "X");
    feed(&mut s, "u");
    let seen = snapshots.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1], ("abc".to_string(), 3));
}

#[test]
fn submit_notifies_reset_buffer() {
    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let mut s = emacs_session("hi");
    s.set_listener(Box::new(RecordingListener {
        snapshots: snapshots.clone(),
    }));
    let line = s.submit_line();
    assert_eq!(line, "hi");
    let seen = snapshots.borrow();
    assert_eq!(*seen, vec![(String::new(), 0)]);
}
