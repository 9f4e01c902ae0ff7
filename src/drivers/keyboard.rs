use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Smooths over platform differences in key reporting before events reach
/// the card.
#[derive(Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(mut key) => {
                if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                    key.code = KeyCode::BackTab;
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                match key.kind {
                    KeyEventKind::Release => {
                        if key.code == KeyCode::Esc {
                            self.esc_down = false;
                        }
                        return None;
                    }
                    // Held keys must not fire Escape or Enter over and over.
                    KeyEventKind::Repeat => return None,
                    KeyEventKind::Press => {}
                }
                if cfg!(windows) && key.code == KeyCode::Esc {
                    if self.esc_down {
                        return None;
                    }
                    self.esc_down = true;
                } else {
                    self.esc_down = false;
                }
                Some(Event::Key(key))
            }
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn tab_with_shift_becomes_backtab() {
        let mut norm = KeyboardNormalizer::new();
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        let out = norm.normalize(Event::Key(key)).expect("should return event");
        if let Event::Key(k) = out {
            assert!(matches!(k.code, KeyCode::BackTab));
            assert!(!k.modifiers.contains(KeyModifiers::SHIFT));
        } else {
            panic!("expected key event");
        }
    }

    #[test]
    fn release_and_repeat_are_ignored() {
        let mut norm = KeyboardNormalizer::new();
        let mut key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(norm.normalize(Event::Key(key)).is_none());
        key.kind = KeyEventKind::Repeat;
        assert!(norm.normalize(Event::Key(key)).is_none());
    }

    #[test]
    fn non_key_events_pass_through() {
        let mut norm = KeyboardNormalizer::new();
        let out = norm.normalize(Event::Resize(10, 20));
        assert!(matches!(out, Some(Event::Resize(10, 20))));
    }
}
