//! Event handlers for the TUI keyboard input.

mod api_key;
mod completion;
mod input;
mod model_selector;

use crossterm::event::KeyEventKind;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::core::transcript::TurnPatch;

use super::app::App;
use super::shortcuts::Shortcut;

pub(crate) use completion::PendingCompletion;

/// Shown in place of the assistant reply when the completion fails.
pub(crate) const COMPLETION_FALLBACK: &str =
    "Sorry, an error occurred while processing your request. Please check your API key and try again.";

/// Result of handling an event: continue the loop or exit.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    Continue,
    Break,
}

/// Context for key event handling. Bundles mutable state to reduce parameter count.
pub struct HandleKeyContext<'a> {
    pub app: &'a mut App,
    pub pending: &'a mut Option<PendingCompletion>,
    pub rt: &'a Arc<Runtime>,
}

/// Handle a key event. Returns HandleResult::Break to exit the main loop.
pub fn handle_key(key: crossterm::event::KeyEvent, ctx: HandleKeyContext<'_>) -> HandleResult {
    let HandleKeyContext { app, pending, rt } = ctx;

    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    if let Some(shortcut) = Shortcut::match_key(&key) {
        match shortcut {
            Shortcut::Quit => {
                if let Some(pc) = pending.as_ref() {
                    pc.cancel_token.cancel();
                }
                return HandleResult::Break;
            }
            Shortcut::ClearChat => {
                // The in-flight completion is cancelled but its handle stays
                // alive; drain_pending retires it when the result arrives.
                if let Some(pc) = pending.as_ref() {
                    pc.cancel_token.cancel();
                }
                app.clear_chat();
                return HandleResult::Continue;
            }
            Shortcut::ModelSelector => {
                app.key_popup = None;
                model_selector::open_model_selector(app);
                return HandleResult::Continue;
            }
            Shortcut::ApiKey => {
                app.model_selector = None;
                api_key::open_key_popup(app);
                return HandleResult::Continue;
            }
        }
    }

    // Model selector popup
    if let Some(mut selector) = app.model_selector.take() {
        match model_selector::handle_model_selector_key(key.code, key.modifiers, &mut selector) {
            model_selector::ModelSelectorAction::Close => {}
            model_selector::ModelSelectorAction::Select(model) => {
                app.selected_model = Some(model);
            }
            model_selector::ModelSelectorAction::Keep => {
                app.model_selector = Some(selector);
            }
        }
        return HandleResult::Continue;
    }

    // API key popup
    if let Some(mut popup) = app.key_popup.take() {
        let action = api_key::handle_key_popup_key(key.code, key.modifiers, &mut popup);
        app.key_popup = Some(popup);
        api_key::apply_key_popup_action(app, action);
        return HandleResult::Continue;
    }

    // Esc: dismiss the error alert first, else cancel the in-flight completion.
    if Shortcut::is_escape(&key) {
        if app.error_alert.is_some() {
            app.dismiss_error();
        } else if let Some(pc) = pending.as_ref() {
            pc.cancel_token.cancel();
        }
        return HandleResult::Continue;
    }

    input::handle_main_input(key.code, key.modifiers, app, pending, rt)
}

/// Pump snapshots and the final result from the in-flight completion into the
/// transcript. Called once per loop tick; also the seam the tests drive.
pub(crate) fn drain_pending(app: &mut App, pending: &mut Option<PendingCompletion>) {
    let Some(pc) = pending.as_ref() else {
        return;
    };

    // Each snapshot is the cumulative text so far; replace, never append.
    while let Ok(snapshot) = pc.snapshot_rx.try_recv() {
        app.transcript.patch(pc.turn_id, TurnPatch::content(snapshot));
    }

    if let Ok(result) = pc.result_rx.try_recv() {
        let turn_id = pc.turn_id;
        match result {
            Ok(text) => {
                app.transcript.patch(turn_id, TurnPatch::finalize(text));
            }
            Err(crate::core::llm::ChatError::Cancelled) => {
                // Keep whatever partial content already streamed in.
                app.transcript.patch(turn_id, TurnPatch::stop_streaming());
            }
            Err(crate::core::llm::ChatError::Api(e)) => {
                app.transcript
                    .patch(turn_id, TurnPatch::finalize(COMPLETION_FALLBACK));
                app.error_alert = Some(e);
            }
        }
        app.transcript.clear_streaming();
        *pending = None;
    }
}
