//! TUI rendering: layout and widgets for the chat interface.

mod header;
mod input;
mod popups;
mod transcript;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::app::App;
use super::constants::ACCENT;

pub(super) fn draw(f: &mut Frame, app: &mut App, area: Rect) {
    let alert_height = if app.error_alert.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(alert_height),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    header::draw_header(f, app, chunks[0], ACCENT);
    transcript::draw_transcript(f, app, chunks[1]);
    if let Some(ref error) = app.error_alert {
        popups::draw_error_alert(f, chunks[2], error);
    }
    input::draw_input_block(f, app, chunks[3]);
    input::draw_bottom_bar(f, app, chunks[4]);

    if let Some(ref mut selector) = app.model_selector {
        popups::draw_model_selector_popup(f, area, selector, app.selected_model.as_ref());
    }
    if let Some(ref popup) = app.key_popup {
        popups::draw_key_popup(f, area, popup, app.key_store.key().is_some());
    }
    if let Some(ref toast) = app.toast {
        popups::draw_toast(f, area, toast);
    }
}
