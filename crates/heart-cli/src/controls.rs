//! Keyboard controls

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use heart_capture::CollectionControl;
use heart_core::Label;

/// Key help shown while collecting
pub const COLLECT_HELP: &str = "H/N: instant | A/D: label auto | Q: Quit";

/// Key help shown while detecting
pub const DETECT_HELP: &str = "Press Q to quit";

/// Raw terminal mode for the lifetime of the guard
pub struct RawMode;

impl RawMode {
    pub fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Next pending key press, without blocking past `timeout`
pub fn poll_key(timeout: Duration) -> io::Result<Option<KeyEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => Ok(Some(key)),
        _ => Ok(None),
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        // Raw mode swallows SIGINT
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Collection control bound to `key`, if any
pub fn collect_control(key: &KeyEvent) -> Option<CollectionControl> {
    if is_quit(key) {
        return Some(CollectionControl::Quit);
    }
    match key.code {
        KeyCode::Char('h') | KeyCode::Char('H') => Some(CollectionControl::LabelNow(Label::Heart)),
        KeyCode::Char('n') | KeyCode::Char('N') => {
            Some(CollectionControl::LabelNow(Label::NotHeart))
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(CollectionControl::ConfirmPending(Label::Heart))
        }
        KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(CollectionControl::ConfirmPending(Label::NotHeart))
        }
        _ => None,
    }
}

/// Whether `key` ends a detection run
pub fn detect_quit(key: &KeyEvent) -> bool {
    is_quit(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_collect_bindings() {
        assert_eq!(
            collect_control(&key('h')),
            Some(CollectionControl::LabelNow(Label::Heart))
        );
        assert_eq!(
            collect_control(&key('N')),
            Some(CollectionControl::LabelNow(Label::NotHeart))
        );
        assert_eq!(
            collect_control(&key('a')),
            Some(CollectionControl::ConfirmPending(Label::Heart))
        );
        assert_eq!(
            collect_control(&key('d')),
            Some(CollectionControl::ConfirmPending(Label::NotHeart))
        );
        assert_eq!(collect_control(&key('q')), Some(CollectionControl::Quit));
        assert_eq!(collect_control(&key('x')), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(detect_quit(&ctrl_c));
        assert!(!detect_quit(&key('c')));
        assert!(detect_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
    }
}
