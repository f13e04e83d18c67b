//! Input block and bottom shortcut bar.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::app::App;

/// Draw the input block and set cursor position.
pub(crate) fn draw_input_block(f: &mut Frame, app: &mut App, input_area: Rect) {
    let placeholder = if app.transcript.is_loading() {
        "Waiting for the reply..."
    } else if app.key_store.key().is_none() {
        "Set your API key with Alt+K, then ask anything..."
    } else {
        "Ask anything..."
    };
    let input_content = if app.input.is_empty() {
        Span::styled(placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.input.as_str())
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = input_block.inner(input_area);
    let input_paragraph = Paragraph::new(Line::from(input_content))
        .block(input_block)
        .style(Style::default().fg(Color::White));
    f.render_widget(input_paragraph, input_area);
    let cx = inner.x + app.input.chars().count().min(inner.width as usize) as u16;
    let cy = input_area.y + 1;
    f.set_cursor_position(Position::new(cx, cy));
}

/// Bottom bar: model id on the left, shortcuts on the right.
pub(crate) fn draw_bottom_bar(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(64)])
        .split(area);
    let model_area = chunks[0];
    let shortcuts_area = chunks[1];

    let model_id = app
        .selected_model
        .as_ref()
        .map(|m| m.id.as_str())
        .unwrap_or("-");
    let model_line = Line::from(Span::styled(
        model_id.to_string(),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(
        Paragraph::new(model_line).alignment(ratatui::layout::Alignment::Left),
        model_area,
    );

    let key_style = Style::default().fg(Color::DarkGray);
    let shortcuts = Line::from(vec![
        Span::styled("Alt+M ", key_style),
        Span::raw("model  "),
        Span::styled("Alt+K ", key_style),
        Span::raw("key  "),
        Span::styled("Ctrl+N ", key_style),
        Span::raw("clear  "),
        Span::styled("Esc ", key_style),
        Span::raw("cancel  "),
        Span::styled("Ctrl+C ", key_style),
        Span::raw("quit"),
    ]);
    f.render_widget(
        Paragraph::new(shortcuts).alignment(ratatui::layout::Alignment::Right),
        shortcuts_area,
    );
}
