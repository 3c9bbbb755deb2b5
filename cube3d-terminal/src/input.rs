/// crossterm-backed input source
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use cube3d_core::{InputEvent, InputSource};
use std::io;

/// Key that restores the default transform state
pub const RESET_KEY: char = '0';

/// Blocking reader over the terminal event stream
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TerminalInput {
    type Error = io::Error;

    fn next_event(&mut self) -> io::Result<InputEvent> {
        loop {
            if let Some(event) = translate(event::read()?) {
                return Ok(event);
            }
        }
    }
}

/// Map a raw terminal event onto an [`InputEvent`].
///
/// Key releases, mouse and focus events yield `None`.
pub fn translate(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if kind == KeyEventKind::Release {
                return None;
            }
            match code {
                KeyCode::Esc => Some(InputEvent::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(InputEvent::Quit)
                }
                KeyCode::Char(c) => Some(InputEvent::Key(c)),
                _ => None,
            }
        }
        Event::Resize(cols, rows) => Some(InputEvent::Resize(cols, rows)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_translate_keys() {
        assert_eq!(
            translate(key(KeyCode::Char('u'), KeyModifiers::NONE)),
            Some(InputEvent::Key('u'))
        );
        assert_eq!(
            translate(key(KeyCode::Char('U'), KeyModifiers::SHIFT)),
            Some(InputEvent::Key('U'))
        );
        assert_eq!(translate(key(KeyCode::Esc, KeyModifiers::NONE)), Some(InputEvent::Quit));
        assert_eq!(
            translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
        assert_eq!(translate(key(KeyCode::Up, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_translate_release_and_resize() {
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('w'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(translate(release), None);
        assert_eq!(translate(Event::Resize(120, 40)), Some(InputEvent::Resize(120, 40)));
        assert_eq!(translate(Event::FocusGained), None);
    }
}
