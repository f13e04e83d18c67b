//! Popups and overlays: model selector, API key form, toasts, error alert.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use crate::core::catalog::{self, ModelDescriptor};
use crate::core::llm::ApiError;

use super::super::app::{KeyPopupState, ModelSelectorState, Toast};
use super::super::constants::ACCENT;

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let vertical_areas = vertical.split(area);
    let horizontal_areas = horizontal.split(vertical_areas[0]);
    horizontal_areas[0]
}

/// One row of the selector list: a provider heading or a selectable model.
enum SelectorRow<'a> {
    Provider(&'a str),
    Model {
        model: &'a ModelDescriptor,
        flat_index: usize,
    },
}

/// Build the visible rows: provider headings interleaved with their models,
/// flat indices matching `catalog::visible_models` order.
fn selector_rows(filter: &str) -> Vec<SelectorRow<'static>> {
    let filtered = catalog::filter_models(catalog::models(), filter);
    let mut rows = Vec::new();
    let mut flat_index = 0;
    for (provider, models) in catalog::grouped(&filtered) {
        rows.push(SelectorRow::Provider(provider));
        for model in models {
            rows.push(SelectorRow::Model { model, flat_index });
            flat_index += 1;
        }
    }
    rows
}

fn model_details_lines(model: &ModelDescriptor) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            model.name.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(model.provider.clone(), dim)),
        Line::from(""),
        Line::from(Span::raw(model.description.clone())),
        Line::from(""),
    ];
    if let Some(ref parameters) = model.parameters {
        lines.push(Line::from(vec![
            Span::styled("Parameters: ", dim),
            Span::raw(parameters.clone()),
        ]));
    }
    if let Some(ref active) = model.active_parameters {
        lines.push(Line::from(vec![
            Span::styled("Active: ", dim),
            Span::raw(active.clone()),
        ]));
    }
    if let Some(ref context_window) = model.context_window {
        lines.push(Line::from(vec![
            Span::styled("Context: ", dim),
            Span::raw(context_window.clone()),
        ]));
    }
    if let Some(max_tokens) = model.max_tokens {
        lines.push(Line::from(vec![
            Span::styled("Max tokens: ", dim),
            Span::raw(max_tokens.to_string()),
        ]));
    }
    if let Some(ref features) = model.features {
        lines.push(Line::from(vec![
            Span::styled("Features: ", dim),
            Span::raw(features.join(", ")),
        ]));
    }
    lines
}

pub(crate) fn draw_model_selector_popup(
    f: &mut Frame,
    area: Rect,
    selector: &mut ModelSelectorState,
    current: Option<&ModelDescriptor>,
) {
    let popup_rect = popup_area(area, 80, 70);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Select model (Alt+M) ");

    let inner = block.inner(popup_rect);
    f.render_widget(Clear, popup_rect);
    f.render_widget(block, popup_rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);
    let filter_area = chunks[0];
    let body_area = chunks[1];
    let hint_area = chunks[2];

    let filter_content = if selector.filter.is_empty() {
        Span::styled("Filter... ", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(selector.filter.as_str())
    };
    let filter_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let filter_inner = filter_block.inner(filter_area);
    let filter_para = Paragraph::new(Line::from(filter_content))
        .block(filter_block)
        .style(Style::default().fg(Color::White));
    f.render_widget(filter_para, filter_area);
    let cx = filter_inner.x
        + selector
            .filter
            .chars()
            .count()
            .min(filter_inner.width as usize) as u16;
    let cy = filter_area.y + 1;
    f.set_cursor_position(ratatui::layout::Position::new(cx, cy));

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(body_area);
    let list_area = body_chunks[0];
    let details_area = body_chunks[1];

    let visible = catalog::visible_models(&selector.filter);
    if visible.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "No models match filter",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
        f.render_widget(para, list_area);
    } else {
        selector.selected_index = selector.selected_index.min(visible.len() - 1);

        let rows = selector_rows(&selector.filter);
        let mut selected_row = 0;
        let items: Vec<ListItem> = rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| match row {
                SelectorRow::Provider(provider) => ListItem::new(provider.to_string()).style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                ),
                SelectorRow::Model { model, flat_index } => {
                    let selected = *flat_index == selector.selected_index;
                    if selected {
                        selected_row = row_idx;
                    }
                    let marker = if current.is_some_and(|c| c.id == model.id) {
                        "● "
                    } else {
                        "  "
                    };
                    let style = if selected {
                        Style::default().fg(Color::Black).bg(ACCENT)
                    } else {
                        Style::default()
                    };
                    ListItem::new(format!(" {}{} ", marker, model.name)).style(style)
                }
            })
            .collect();

        selector.list_state.select(Some(selected_row));
        let list = List::new(items);
        f.render_stateful_widget(list, list_area, &mut selector.list_state);

        let details = model_details_lines(visible[selector.selected_index]);
        f.render_widget(
            Paragraph::new(details).wrap(Wrap { trim: false }),
            details_area,
        );
    }

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("↑↓ ", Style::default().fg(Color::DarkGray)),
        Span::raw("select  "),
        Span::styled("Enter ", Style::default().fg(Color::DarkGray)),
        Span::raw("confirm  "),
        Span::styled("Esc ", Style::default().fg(Color::DarkGray)),
        Span::raw("cancel  "),
        Span::styled("type ", Style::default().fg(Color::DarkGray)),
        Span::raw("filter"),
    ]));
    f.render_widget(hint, hint_area);
}

pub(crate) fn draw_key_popup(f: &mut Frame, area: Rect, popup: &KeyPopupState, has_stored: bool) {
    let popup_rect = popup_area(area, 60, 30);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" API key (Alt+K) ");
    let inner = block.inner(popup_rect);
    f.render_widget(Clear, popup_rect);
    f.render_widget(block, popup_rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);
    let status_area = chunks[0];
    let input_area = chunks[1];
    let hint_area = chunks[3];

    let status = if has_stored {
        Span::styled("A key is stored locally.", Style::default().fg(ACCENT))
    } else {
        Span::styled("No key configured.", Style::default().fg(Color::DarkGray))
    };
    f.render_widget(Paragraph::new(Line::from(status)), status_area);

    let shown = if popup.reveal {
        popup.input.clone()
    } else {
        "•".repeat(popup.input.chars().count())
    };
    let input_content = if popup.input.is_empty() {
        Span::styled("Paste your key... ", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(shown)
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let input_inner = input_block.inner(input_area);
    let input_para = Paragraph::new(Line::from(input_content))
        .block(input_block)
        .style(Style::default().fg(Color::White));
    f.render_widget(input_para, input_area);
    let cx = input_inner.x
        + popup
            .input
            .chars()
            .count()
            .min(input_inner.width as usize) as u16;
    f.set_cursor_position(ratatui::layout::Position::new(cx, input_area.y + 1));

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Enter ", Style::default().fg(Color::DarkGray)),
        Span::raw("save  "),
        Span::styled("Ctrl+R ", Style::default().fg(Color::DarkGray)),
        Span::raw("reveal  "),
        Span::styled("Ctrl+D ", Style::default().fg(Color::DarkGray)),
        Span::raw("delete stored  "),
        Span::styled("Esc ", Style::default().fg(Color::DarkGray)),
        Span::raw("close"),
    ]));
    f.render_widget(hint, hint_area);
}

/// Toast: bottom right, above the input bar. Opaque background so it reads
/// over the transcript.
pub(crate) fn draw_toast(f: &mut Frame, area: Rect, toast: &Toast) {
    let border_color = if toast.is_error { Color::Red } else { ACCENT };
    let content_width = toast
        .title
        .chars()
        .count()
        .max(toast.body.chars().count())
        .min(area.width.saturating_sub(6) as usize) as u16;
    let toast_width = content_width + 4;
    let toast_height = 4u16;
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(toast_width).saturating_sub(1),
        y: area.y + area.height.saturating_sub(toast_height + 4),
        width: toast_width,
        height: toast_height,
    };
    f.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(Color::Black));
    let text = vec![
        Line::from(Span::styled(
            toast.title.clone(),
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(toast.body.clone())),
    ];
    let para = Paragraph::new(text)
        .block(block)
        .style(Style::default().bg(Color::Black));
    f.render_widget(para, toast_area);
}

/// Inline alert bar between the transcript and the input.
pub(crate) fn draw_error_alert(f: &mut Frame, area: Rect, error: &ApiError) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(format!(" API Error ({}) ", error.kind.as_str()));
    let line = Line::from(vec![
        Span::styled(error.message.clone(), Style::default().fg(Color::Red)),
        Span::styled("  Esc to dismiss", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);
}
