//! Chat transcript: message blocks, streaming cursor, and scrollbar.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::core::transcript::{ChatTurn, Role};

use super::super::app::App;
use super::super::constants::{ACCENT, ACCENT_SECONDARY, STREAM_CURSOR};
use super::super::text::wrap_message;

/// Repeat a character to fill width (approximate; chars may have different display widths).
fn repeat_char(c: char, n: usize) -> String {
    std::iter::repeat_n(c, n).collect()
}

/// Parameters for rendering a message block.
struct TurnBlockParams<'a> {
    label: &'a str,
    content: &'a str,
    content_width: usize,
    wrap_width: usize,
    is_user: bool,
    stream_cursor: bool,
    time: String,
}

/// Add a user or assistant turn block with borders and a trailing separator.
fn add_turn_block(lines: &mut Vec<Line<'static>>, p: TurnBlockParams<'_>) {
    let border_color = if p.is_user {
        Color::DarkGray
    } else {
        ACCENT_SECONDARY
    };
    let border_style = Style::default().fg(border_color);

    // Top border: "┌─ Label 14:32 ───...──┐"
    let top_label = format!("┌─ {} {} ", p.label, p.time);
    let top_trail_len = p.wrap_width.saturating_sub(top_label.chars().count() + 1);
    let top_line = format!("{}{}┐", top_label, repeat_char('─', top_trail_len));
    lines.push(Line::from(Span::styled(top_line, border_style)));

    for chunk in wrap_message(p.content, p.content_width) {
        lines.push(Line::from(vec![
            Span::styled("│ ", border_style),
            Span::styled("  ", Style::default()),
            Span::styled(chunk, Style::default()),
        ]));
    }

    if p.stream_cursor {
        lines.push(Line::from(vec![
            Span::styled("│ ", border_style),
            Span::styled(
                format!("  {} ", STREAM_CURSOR),
                Style::default().fg(ACCENT_SECONDARY),
            ),
        ]));
    }

    let bottom_line = format!("└{}┘", repeat_char('─', p.wrap_width.saturating_sub(2)));
    lines.push(Line::from(Span::styled(bottom_line, border_style)));

    let sep_line = repeat_char('─', p.wrap_width);
    lines.push(Line::from(Span::styled(
        sep_line,
        Style::default().fg(Color::DarkGray),
    )));
}

fn turn_label(turn: &ChatTurn) -> &str {
    match turn.role {
        Role::User => "You",
        Role::Assistant => turn.model.as_deref().unwrap_or("Assistant"),
        Role::System => "System",
    }
}

/// Welcome screen shown while the transcript is empty.
fn draw_welcome(f: &mut Frame, app: &mut App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Try out AI model APIs with your own key.",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if app.key_store.key().is_none() {
        lines.push(Line::from(Span::styled(
            "Press Alt+K to configure your API key.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Press Alt+M to pick a model, then type a message and press Enter.",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "Responses are simulated locally; nothing is sent to any provider.",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(
        Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
        area,
    );
}

pub(crate) fn draw_transcript(f: &mut Frame, app: &mut App, transcript_area: Rect) {
    if app.transcript.is_empty() {
        app.last_max_scroll = 0;
        draw_welcome(f, app, transcript_area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(transcript_area);
    let text_area = chunks[0];
    let scrollbar_area = chunks[1];
    let wrap_width = text_area.width as usize;
    let content_width = wrap_width.saturating_sub(5);

    let mut lines: Vec<Line<'static>> = Vec::new();
    for turn in app.transcript.turns() {
        add_turn_block(
            &mut lines,
            TurnBlockParams {
                label: turn_label(turn),
                content: &turn.content,
                content_width,
                wrap_width,
                is_user: turn.role == Role::User,
                stream_cursor: turn.streaming,
                time: turn.timestamp.format("%H:%M").to_string(),
            },
        );
    }

    let total_lines = lines.len();
    let visible = text_area.height as usize;
    let max_scroll = total_lines.saturating_sub(visible.max(1));
    app.last_max_scroll = max_scroll;
    let scroll_pos = app.scroll_line().min(max_scroll);
    let start = scroll_pos;
    let end = (start + visible).min(total_lines);
    let visible_lines: Vec<Line> = lines.into_iter().skip(start).take(end - start).collect();

    f.render_widget(Paragraph::new(visible_lines), text_area);

    let mut scrollbar_state = ScrollbarState::default()
        .position(scroll_pos)
        .content_length(total_lines);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_symbol("█")
        .thumb_style(Style::default().fg(ACCENT_SECONDARY))
        .track_symbol(Some("│"));
    f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}
