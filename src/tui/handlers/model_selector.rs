//! Handler for model selector popup.

use crossterm::event::{KeyCode, KeyModifiers};

use ratatui::widgets::ListState;

use crate::core::catalog::{self, ModelDescriptor};

use super::super::app::{App, ModelSelectorState};

/// Action to apply after handling a model selector key.
pub(crate) enum ModelSelectorAction {
    Close,
    Select(ModelDescriptor),
    /// No action; keep the selector open.
    Keep,
}

/// Handle key when model selector is open. Returns action to apply; caller applies to app.
pub(crate) fn handle_model_selector_key(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    selector: &mut ModelSelectorState,
) -> ModelSelectorAction {
    // Filter input
    match key_code {
        KeyCode::Backspace => {
            selector.filter.pop();
        }
        KeyCode::Char(c) if !key_modifiers.contains(KeyModifiers::CONTROL) => {
            selector.filter.push(c);
        }
        _ => {}
    }

    let visible = catalog::visible_models(&selector.filter);
    match key_code {
        KeyCode::Esc => ModelSelectorAction::Close,
        KeyCode::Up => {
            selector.selected_index = selector.selected_index.saturating_sub(1);
            ModelSelectorAction::Keep
        }
        KeyCode::Down => {
            if !visible.is_empty() {
                selector.selected_index =
                    (selector.selected_index + 1).min(visible.len().saturating_sub(1));
            }
            ModelSelectorAction::Keep
        }
        KeyCode::Enter => {
            if selector.selected_index < visible.len() {
                ModelSelectorAction::Select(visible[selector.selected_index].clone())
            } else {
                ModelSelectorAction::Keep
            }
        }
        KeyCode::Backspace | KeyCode::Char(_) => {
            selector.selected_index = selector
                .selected_index
                .min(visible.len().saturating_sub(1));
            ModelSelectorAction::Keep
        }
        _ => ModelSelectorAction::Keep,
    }
}

/// Open the model selector with the current model preselected.
pub(crate) fn open_model_selector(app: &mut App) {
    let visible = catalog::visible_models("");
    let selected_index = app
        .selected_model
        .as_ref()
        .and_then(|current| visible.iter().position(|m| m.id == current.id))
        .unwrap_or(0);
    app.model_selector = Some(ModelSelectorState {
        selected_index,
        list_state: ListState::default(),
        filter: String::new(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_narrows_and_clamps_selection() {
        let mut selector = ModelSelectorState {
            selected_index: 20,
            list_state: ListState::default(),
            filter: String::new(),
        };
        for c in "grok".chars() {
            handle_model_selector_key(KeyCode::Char(c), KeyModifiers::NONE, &mut selector);
        }
        assert_eq!(selector.filter, "grok");
        assert_eq!(selector.selected_index, 0);
        match handle_model_selector_key(KeyCode::Enter, KeyModifiers::NONE, &mut selector) {
            ModelSelectorAction::Select(model) => assert_eq!(model.id, "x-ai/grok-4.1-fast"),
            _ => panic!("expected selection"),
        }
    }

    #[test]
    fn escape_closes() {
        let mut selector = ModelSelectorState {
            selected_index: 0,
            list_state: ListState::default(),
            filter: String::new(),
        };
        assert!(matches!(
            handle_model_selector_key(KeyCode::Esc, KeyModifiers::NONE, &mut selector),
            ModelSelectorAction::Close
        ));
    }
}
