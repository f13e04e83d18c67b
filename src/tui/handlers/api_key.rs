//! Handler for the API key popup.

use crossterm::event::{KeyCode, KeyModifiers};

use super::super::app::{App, KeyPopupState};

/// Action to apply after handling an API key popup key.
pub(crate) enum KeyPopupAction {
    Close,
    /// Persist the entered key (already trimmed, non-empty).
    Save(String),
    /// Delete the stored key, keeping the popup open.
    Clear,
    Keep,
}

/// Handle key when the API key popup is open. Returns action to apply;
/// caller applies to app.
pub(crate) fn handle_key_popup_key(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    popup: &mut KeyPopupState,
) -> KeyPopupAction {
    match (key_code, key_modifiers) {
        (KeyCode::Esc, _) => KeyPopupAction::Close,
        (KeyCode::Enter, _) => {
            let trimmed = popup.input.trim();
            if trimmed.is_empty() {
                // Empty submissions are ignored; the stored key stays intact.
                KeyPopupAction::Keep
            } else {
                KeyPopupAction::Save(trimmed.to_string())
            }
        }
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
            popup.reveal = !popup.reveal;
            KeyPopupAction::Keep
        }
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => KeyPopupAction::Clear,
        (KeyCode::Backspace, _) => {
            popup.input.pop();
            KeyPopupAction::Keep
        }
        (KeyCode::Char(c), mods) => {
            if mods.contains(KeyModifiers::ALT) || mods.contains(KeyModifiers::CONTROL) {
                return KeyPopupAction::Keep;
            }
            popup.input.push(c);
            KeyPopupAction::Keep
        }
        _ => KeyPopupAction::Keep,
    }
}

/// Apply a key popup action against the app's key store.
pub(crate) fn apply_key_popup_action(app: &mut App, action: KeyPopupAction) {
    match action {
        KeyPopupAction::Close => {
            app.key_popup = None;
        }
        KeyPopupAction::Save(key) => match app.key_store.save(&key) {
            Ok(()) => {
                app.key_popup = None;
                app.set_toast("API Key Saved", "Your API key is stored locally.", false);
            }
            Err(e) => {
                app.set_toast("Save Failed", &e.to_string(), true);
            }
        },
        KeyPopupAction::Clear => match app.key_store.clear() {
            Ok(()) => {
                if let Some(popup) = app.key_popup.as_mut() {
                    popup.input.clear();
                }
                app.set_toast("API Key Cleared", "Your API key has been removed.", false);
            }
            Err(e) => {
                app.set_toast("Clear Failed", &e.to_string(), true);
            }
        },
        KeyPopupAction::Keep => {}
    }
}

/// Open the API key popup with an empty input.
pub(crate) fn open_key_popup(app: &mut App) {
    app.key_popup = Some(KeyPopupState {
        input: String::new(),
        reveal: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn popup() -> KeyPopupState {
        KeyPopupState {
            input: String::new(),
            reveal: false,
        }
    }

    #[test]
    fn enter_with_whitespace_only_is_ignored() {
        let mut p = popup();
        p.input = "   ".to_string();
        assert!(matches!(
            handle_key_popup_key(KeyCode::Enter, KeyModifiers::NONE, &mut p),
            KeyPopupAction::Keep
        ));
    }

    #[test]
    fn enter_trims_before_saving() {
        let mut p = popup();
        p.input = "  sk-test-123  ".to_string();
        match handle_key_popup_key(KeyCode::Enter, KeyModifiers::NONE, &mut p) {
            KeyPopupAction::Save(key) => assert_eq!(key, "sk-test-123"),
            _ => panic!("expected save"),
        }
    }

    #[test]
    fn ctrl_r_toggles_reveal() {
        let mut p = popup();
        handle_key_popup_key(KeyCode::Char('r'), KeyModifiers::CONTROL, &mut p);
        assert!(p.reveal);
        handle_key_popup_key(KeyCode::Char('r'), KeyModifiers::CONTROL, &mut p);
        assert!(!p.reveal);
    }

    #[test]
    fn typing_appends_and_backspace_removes() {
        let mut p = popup();
        handle_key_popup_key(KeyCode::Char('s'), KeyModifiers::NONE, &mut p);
        handle_key_popup_key(KeyCode::Char('k'), KeyModifiers::NONE, &mut p);
        assert_eq!(p.input, "sk");
        handle_key_popup_key(KeyCode::Backspace, KeyModifiers::NONE, &mut p);
        assert_eq!(p.input, "s");
    }
}
