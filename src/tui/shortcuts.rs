//! Centralized keyboard shortcuts.
//!
//! Complete reference:
//!
//! | Action         | Keys                            |
//! |----------------|---------------------------------|
//! | Send           | Enter                           |
//! | Scroll         | ↑ ↓ PageUp PageDown             |
//! | Model selector | Alt+M, µ (Option+M Mac)         |
//! | API key        | Alt+K, ˚ (Option+K Mac)         |
//! | Clear chat     | Ctrl+N                          |
//! | Dismiss/cancel | Esc                             |
//! | Quit           | Ctrl+C                          |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Detected shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Model selector (Alt+M)
    ModelSelector,
    /// API key popup (Alt+K)
    ApiKey,
    /// Clear the chat (Ctrl+N)
    ClearChat,
    /// Quit (Ctrl+C)
    Quit,
}

/// Characters produced by Option+key on Mac (Option not configured as Meta).
/// Option+M = µ (U+00B5), Option+K = ˚ (U+02DA).
const MAC_OPTION_M: char = '\u{00B5}';
const MAC_OPTION_K: char = '\u{02DA}';

impl Shortcut {
    /// Returns the shortcut if the key matches.
    pub fn match_key(key: &KeyEvent) -> Option<Shortcut> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Shortcut::Quit)
            }
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Shortcut::ClearChat)
            }
            KeyCode::Char('m') if key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Shortcut::ModelSelector)
            }
            KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Shortcut::ApiKey)
            }
            KeyCode::Char(MAC_OPTION_M) => Some(Shortcut::ModelSelector),
            KeyCode::Char(MAC_OPTION_K) => Some(Shortcut::ApiKey),
            _ => None,
        }
    }

    /// True if key is Escape.
    pub fn is_escape(key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press && key.code == KeyCode::Esc
    }
}

#[cfg(test)]
mod tests {
    use super::Shortcut;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_c_is_quit() {
        let k = key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Shortcut::match_key(&k), Some(Shortcut::Quit));
    }

    #[test]
    fn ctrl_n_is_clear_chat() {
        let k = key(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(Shortcut::match_key(&k), Some(Shortcut::ClearChat));
    }

    #[test]
    fn alt_m_is_model_selector() {
        let k = key(KeyCode::Char('m'), KeyModifiers::ALT);
        assert_eq!(Shortcut::match_key(&k), Some(Shortcut::ModelSelector));
    }

    #[test]
    fn alt_k_is_api_key() {
        let k = key(KeyCode::Char('k'), KeyModifiers::ALT);
        assert_eq!(Shortcut::match_key(&k), Some(Shortcut::ApiKey));
    }

    #[test]
    fn mac_option_chars_map_to_shortcuts() {
        let m = key(KeyCode::Char('\u{00B5}'), KeyModifiers::NONE);
        assert_eq!(Shortcut::match_key(&m), Some(Shortcut::ModelSelector));
        let k = key(KeyCode::Char('\u{02DA}'), KeyModifiers::NONE);
        assert_eq!(Shortcut::match_key(&k), Some(Shortcut::ApiKey));
    }

    #[test]
    fn plain_chars_are_not_shortcuts() {
        let k = key(KeyCode::Char('m'), KeyModifiers::NONE);
        assert_eq!(Shortcut::match_key(&k), None);
    }
}
