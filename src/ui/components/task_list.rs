use crate::app::AppState;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = state.theme.clone();

    let items: Vec<ListItem> = state
        .visible_tasks()
        .iter()
        .map(|task| {
            let checkbox = if task.completed { "[x] " } else { "[ ] " };
            let title_style = if task.completed {
                Style::default()
                    .fg(theme.done)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(theme.foreground)
            };

            ListItem::new(Line::from(vec![
                Span::styled(checkbox, Style::default().fg(theme.accent)),
                Span::styled(task.title.clone(), title_style),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Tasks [{}] ", state.filter.label()))
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.background));

    if items.is_empty() {
        let hint = if state.tasks.is_empty() {
            "No tasks. Press a to add one."
        } else {
            "Nothing matches this filter."
        };
        let placeholder = Paragraph::new(hint)
            .style(Style::default().fg(theme.hint))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.accent)
                .fg(theme.background)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut state.list_state);
}
