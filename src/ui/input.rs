/// Input state tracker.
///
/// A guessing game has no held-key actions, so this only tracks
/// edge-triggered presses: each physical key press is one action.
/// Only `KeyEventKind::Press` counts; `Repeat` events from terminals
/// with the keyboard enhancement protocol are ignored so a held key
/// cannot spam guesses.
///
/// Letter keys are reserved for guessing. Control actions use
/// non-letter keys only, otherwise words containing those letters
/// would be unplayable.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub struct InputState {
    /// Key events freshly pressed during the most recent drain_events() call.
    fresh_presses: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            fresh_presses: Vec::with_capacity(8),
        }
    }

    /// Drain all pending terminal events without blocking.
    /// Call once per frame, before the simulation tick.
    pub fn drain_events(&mut self) {
        self.fresh_presses.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind == KeyEventKind::Press {
                    self.fresh_presses.push(key);
                }
            }
        }
    }

    /// Was this key pressed this frame?
    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.fresh_presses.iter().any(|k| k.code == code)
    }

    /// Letters pressed this frame, in arrival order, for guessing.
    /// Fast typing can land several presses in one frame; none are dropped.
    /// Keys chorded with Ctrl or Alt are control input, not guesses.
    pub fn pressed_letters(&self) -> Vec<char> {
        self.fresh_presses
            .iter()
            .filter_map(|k| match k.code {
                KeyCode::Char(c)
                    if c.is_alphabetic()
                        && !k
                            .modifiers
                            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    Some(c)
                }
                _ => None,
            })
            .collect()
    }

    /// Check if any event this frame was Ctrl+C.
    pub fn ctrl_c_pressed(&self) -> bool {
        self.fresh_presses.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_letters_are_guesses() {
        let input = InputState {
            fresh_presses: vec![press(KeyCode::Char('r'), KeyModifiers::NONE)],
        };
        assert_eq!(input.pressed_letters(), vec!['r']);
    }

    #[test]
    fn every_letter_in_a_frame_is_kept_in_order() {
        let input = InputState {
            fresh_presses: vec![
                press(KeyCode::Char('a'), KeyModifiers::NONE),
                press(KeyCode::F(2), KeyModifiers::NONE),
                press(KeyCode::Char('b'), KeyModifiers::NONE),
            ],
        };
        assert_eq!(input.pressed_letters(), vec!['a', 'b']);
    }

    #[test]
    fn chorded_letters_are_not_guesses() {
        let input = InputState {
            fresh_presses: vec![press(KeyCode::Char('c'), KeyModifiers::CONTROL)],
        };
        assert!(input.pressed_letters().is_empty());
        assert!(input.ctrl_c_pressed());
    }

    #[test]
    fn non_letter_keys_are_not_guesses() {
        let input = InputState {
            fresh_presses: vec![
                press(KeyCode::F(2), KeyModifiers::NONE),
                press(KeyCode::Char('3'), KeyModifiers::NONE),
            ],
        };
        assert!(input.pressed_letters().is_empty());
        assert!(input.was_pressed(KeyCode::F(2)));
    }
}
