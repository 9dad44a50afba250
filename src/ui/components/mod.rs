pub mod status_bar;
pub mod task_list;

use crate::app::mode::Mode;
use crate::app::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use remotodo::task::Filter;

pub fn render(f: &mut Frame, state: &mut AppState) {
    // Paint the themed background first so the light/dark switch covers
    // the whole screen.
    f.render_widget(
        Block::default().style(Style::default().bg(state.theme.background)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // New task input
            Constraint::Length(1), // Filter bar
            Constraint::Min(1),    // Task list
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_input(f, state, chunks[0]);
    render_filter_bar(f, state, chunks[1]);
    task_list::render(f, state, chunks[2]);
    status_bar::render(f, state, chunks[3]);

    if state.mode == Mode::Edit {
        render_edit_overlay(f, state);
    }

    if state.show_help {
        render_help_overlay(f, state);
    }
}

fn render_input(f: &mut Frame, state: &AppState, area: Rect) {
    let theme = &state.theme;
    let active = state.mode == Mode::Insert;

    let border_style = if active {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.border)
    };

    let title = if active {
        " New task (Enter to add, Esc to leave) "
    } else {
        " New task (press a) "
    };

    let input = Paragraph::new(state.input_buffer.as_str())
        .style(Style::default().fg(theme.foreground).bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );
    f.render_widget(input, area);

    if active {
        let cursor_col = state.input_buffer[..state.input_cursor].chars().count() as u16;
        f.set_cursor_position((area.x + 1 + cursor_col, area.y + 1));
    }
}

fn render_filter_bar(f: &mut Frame, state: &AppState, area: Rect) {
    let theme = &state.theme;
    let mut spans: Vec<Span> = vec![Span::raw(" ")];

    for (i, filter) in [Filter::All, Filter::Completed, Filter::Pending]
        .into_iter()
        .enumerate()
    {
        let style = if filter == state.filter {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.hint)
        };
        spans.push(Span::styled(format!("[{}] {}", i + 1, filter.label()), style));
        spans.push(Span::raw("  "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_edit_overlay(f: &mut Frame, state: &AppState) {
    let Some(edit) = state.edit.as_ref() else {
        return;
    };
    let theme = &state.theme;

    let popup = centered_rect(60, 4, f.area());
    f.render_widget(Clear, popup);

    let hint = if edit.saving {
        Span::styled("saving...", Style::default().fg(theme.accent))
    } else {
        Span::styled("Enter save   Esc cancel", Style::default().fg(theme.hint))
    };

    let lines = vec![
        Line::from(Span::styled(
            edit.buffer.clone(),
            Style::default().fg(theme.foreground),
        )),
        Line::from(hint),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Edit task ")
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.background));

    f.render_widget(Paragraph::new(lines).block(block), popup);

    if !edit.saving {
        let cursor_col = edit.buffer[..edit.cursor].chars().count() as u16;
        f.set_cursor_position((popup.x + 1 + cursor_col, popup.y + 1));
    }
}

fn render_help_overlay(f: &mut Frame, state: &AppState) {
    let theme = &state.theme;
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(theme.foreground);
    let section_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let entries: &[(&str, &str)] = &[
        ("", "Navigation"),
        ("j / \u{2193}", "Move cursor down"),
        ("k / \u{2191}", "Move cursor up"),
        ("g / G", "Jump to top / bottom"),
        ("", "Tasks"),
        ("a / i", "Type a new task"),
        ("e", "Edit selected task"),
        ("x / Space", "Toggle done/undone"),
        ("d", "Delete selected task"),
        ("r", "Refresh from server"),
        ("", "View"),
        ("f / Tab", "Cycle filter"),
        ("1 / 2 / 3", "All / Completed / Pending"),
        ("t", "Toggle light/dark theme"),
        ("", "Other"),
        ("?", "Toggle this help"),
        ("q", "Quit"),
    ];

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "  remotodo Help",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (key, desc) in entries {
        if key.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  -- {} --", desc),
                section_style,
            )));
        } else {
            lines.push(Line::from(vec![
                Span::styled(format!("    {:<12}", key), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
    }

    let popup = centered_rect(60, lines.len() as u16 + 2, f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.background));

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width * percent_x / 100).max(20).min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
