//! Handler for main input (chat input, send, scroll).

use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::core::transcript::{ChatTurn, NewTurn};

use super::super::app::{App, ScrollPosition};
use super::super::constants;
use super::PendingCompletion;
use super::completion;

/// Handle main input keys (when no popup is open).
pub(crate) fn handle_main_input(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    app: &mut App,
    pending: &mut Option<PendingCompletion>,
    rt: &Arc<Runtime>,
) -> super::HandleResult {
    match (key_code, key_modifiers) {
        (KeyCode::Enter, _) => {
            send_current_input(app, pending, rt);
            super::HandleResult::Continue
        }
        (KeyCode::Backspace, _) => {
            app.input.pop();
            super::HandleResult::Continue
        }
        (KeyCode::Up, _) => {
            app.scroll_up(constants::SCROLL_LINES_SMALL);
            super::HandleResult::Continue
        }
        (KeyCode::Down, _) => {
            app.scroll_down(constants::SCROLL_LINES_SMALL);
            super::HandleResult::Continue
        }
        (KeyCode::PageUp, _) => {
            app.scroll_up(constants::SCROLL_LINES_PAGE);
            super::HandleResult::Continue
        }
        (KeyCode::PageDown, _) => {
            app.scroll_down(constants::SCROLL_LINES_PAGE);
            super::HandleResult::Continue
        }
        (KeyCode::Char(c), mods) => {
            // Ignore Alt+key: user likely intended a shortcut (e.g. Alt+M)
            if mods.contains(KeyModifiers::ALT) || mods.contains(KeyModifiers::CONTROL) {
                return super::HandleResult::Continue;
            }
            app.input.push(c);
            super::HandleResult::Continue
        }
        _ => super::HandleResult::Continue,
    }
}

/// Send the trimmed input as a user turn and start a completion for it.
/// No-op while a completion is in flight. Missing key or model blocks the
/// send with an error toast and leaves the input untouched.
pub(crate) fn send_current_input(
    app: &mut App,
    pending: &mut Option<PendingCompletion>,
    rt: &Arc<Runtime>,
) {
    let content = app.input.trim().to_string();
    if content.is_empty() || pending.is_some() {
        return;
    }
    let Some(api_key) = app.key_store.key().map(str::to_string) else {
        app.set_toast(
            "API Key Required",
            "Please configure your API key first.",
            true,
        );
        return;
    };
    let Some(model) = app.selected_model.clone() else {
        app.set_toast("Model Required", "Please select an AI model first.", true);
        return;
    };

    app.input.clear();
    app.transcript.append(NewTurn::user(content));
    // History handed to the call ends at the user turn; the placeholder that
    // follows is the call's output slot, not its input.
    let turns: Vec<ChatTurn> = app.transcript.turns().to_vec();
    let assistant_id = app
        .transcript
        .append(NewTurn::assistant_placeholder(&model.name));
    app.transcript.mark_streaming(assistant_id);
    app.scroll = ScrollPosition::Bottom;

    *pending = Some(completion::spawn_completion(
        rt,
        Arc::clone(&app.simulator),
        api_key,
        model,
        turns,
        assistant_id,
    ));
}
