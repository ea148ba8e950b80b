//! End-to-end flow tests for Latch
//!
//! These drive the host application with key presses over an on-disk
//! passcode store: first-run setup, unlock, change, auto-lock and disable.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use latch_core::{LocalPasscodeStore, PasscodeStore};
use latch_tui::app::LatchConfig;
use latch_tui::{App, SectionId};

fn press(app: &mut App, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Type the passcode into both fields of a create/change section
fn enter_twice(app: &mut App, passcode: &str) {
    type_text(app, passcode);
    press(app, KeyCode::Enter);
    type_text(app, passcode);
    press(app, KeyCode::Enter);
}

/// Walks a passcode through its whole lifecycle
#[test]
fn test_full_passcode_lifecycle() {
    let dir = tempfile::tempdir().unwrap();

    // ==========================================
    // STEP 1: First run asks for a new passcode
    // ==========================================
    let mut app = App::new(Some(dir.path().to_path_buf())).unwrap();
    assert_eq!(app.current(), Some(SectionId::PasscodeCreate));

    enter_twice(&mut app, "open sesame");
    assert_eq!(app.current(), Some(SectionId::PasscodeManage));

    let store = LocalPasscodeStore::open_in(dir.path()).unwrap();
    assert!(store.has_passcode());
    assert!(store.check_passcode(b"open sesame"));
    drop(app);

    // ==========================================
    // STEP 2: Next start is gated by the passcode
    // ==========================================
    let mut app = App::new(Some(dir.path().to_path_buf())).unwrap();
    assert_eq!(app.current(), Some(SectionId::PasscodeCheck));

    type_text(&mut app, "wrong");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.current(), Some(SectionId::PasscodeCheck));
    assert_eq!(app.services().flood.borrow().bad_tries(), 1);

    // Selected text is replaced by the next keystroke.
    type_text(&mut app, "open sesame");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.current(), Some(SectionId::PasscodeManage));
    assert_eq!(app.services().flood.borrow().bad_tries(), 0);

    // ==========================================
    // STEP 3: Change it
    // ==========================================
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.current(), Some(SectionId::PasscodeChange));

    enter_twice(&mut app, "open sesame");
    assert_eq!(app.current(), Some(SectionId::PasscodeChange));

    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Enter);
    enter_twice(&mut app, "close sesame");
    assert_eq!(app.current(), Some(SectionId::PasscodeManage));

    let store = LocalPasscodeStore::open_in(dir.path()).unwrap();
    assert!(store.check_passcode(b"close sesame"));
    assert!(!store.check_passcode(b"open sesame"));

    // ==========================================
    // STEP 4: Going idle locks again
    // ==========================================
    app.tick(Instant::now() + Duration::from_secs(2 * 3600));
    assert_eq!(app.current(), Some(SectionId::PasscodeCheck));

    type_text(&mut app, "close sesame");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.current(), Some(SectionId::PasscodeManage));

    // ==========================================
    // STEP 5: Disable removes the passcode file
    // ==========================================
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    assert!(app.should_quit());

    let store = LocalPasscodeStore::open_in(dir.path()).unwrap();
    assert!(!store.has_passcode());
    assert!(!store.path().exists());

    let app = App::new(Some(dir.path().to_path_buf())).unwrap();
    assert_eq!(app.current(), Some(SectionId::PasscodeCreate));
}

#[test]
fn test_auto_lock_choice_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(Some(dir.path().to_path_buf())).unwrap();
    enter_twice(&mut app, "1234");

    // Auto-lock row, pick the first option.
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    for _ in 0..4 {
        press(&mut app, KeyCode::Up);
    }
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.services().settings.auto_lock(), 60);

    let config = LatchConfig::load_from(&LatchConfig::file_in(dir.path()));
    assert_eq!(config.auto_lock, 60);

    // A fresh start locks after a minute of silence.
    drop(app);
    let mut app = App::new(Some(dir.path().to_path_buf())).unwrap();
    type_text(&mut app, "1234");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.current(), Some(SectionId::PasscodeManage));

    app.tick(Instant::now() + Duration::from_secs(61));
    assert_eq!(app.current(), Some(SectionId::PasscodeCheck));
}
