//! Header: app title, active model, key status.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::app;

use super::super::app::App;

/// Max width for the model display in the header; longer names are truncated with "…".
const MODEL_HEADER_WIDTH: u16 = 40;
/// Width for the key status display ("key set" / "no key").
const KEY_HEADER_WIDTH: u16 = 10;

pub(crate) fn draw_header(f: &mut Frame, app_state: &mut App, area: Rect, accent: Color) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(MODEL_HEADER_WIDTH),
            Constraint::Length(KEY_HEADER_WIDTH),
        ])
        .split(area);

    let title_area = header_chunks[0];
    let model_area = header_chunks[1];
    let key_area = header_chunks[2];

    let title = Line::from(Span::styled(
        format!("{} ", app::NAME),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(title), title_area);

    let model_text = match app_state.selected_model {
        Some(ref model) => format!("{} · {}", model.provider, model.name),
        None => "no model (Alt+M)".to_string(),
    };
    let max_len = MODEL_HEADER_WIDTH as usize;
    let model_display = if model_text.chars().count() > max_len {
        let chars: Vec<char> = model_text.chars().collect();
        let start = chars.len().saturating_sub(max_len.saturating_sub(1));
        format!("…{}", chars[start..].iter().collect::<String>())
    } else {
        model_text
    };
    let model_line = Line::from(Span::styled(
        model_display,
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(
        Paragraph::new(model_line).alignment(ratatui::layout::Alignment::Right),
        model_area,
    );

    let (key_text, key_color) = if app_state.key_store.key().is_some() {
        ("key set", accent)
    } else {
        ("no key", Color::Red)
    };
    let key_line = Line::from(Span::styled(key_text, Style::default().fg(key_color)));
    f.render_widget(
        Paragraph::new(key_line).alignment(ratatui::layout::Alignment::Right),
        key_area,
    );
}
