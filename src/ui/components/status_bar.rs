use crate::app::mode::Mode;
use crate::app::AppState;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    if state.mode == Mode::ConfirmDelete {
        render_confirm_delete(f, state, area);
        return;
    }

    let sync_indicator = if state.pending_requests > 0 {
        format!(" | syncing ({})", state.pending_requests)
    } else {
        String::new()
    };

    let left_content = format!(
        " {} | {} | {} tasks ({} done){}",
        state.mode,
        state.filter.label(),
        state.tasks.len(),
        state.done_count(),
        sync_indicator
    );
    let right_content = format!("? help  q quit  v{VERSION} ");

    let padding = area
        .width
        .saturating_sub(left_content.len() as u16 + right_content.len() as u16);

    let status_line = format!(
        "{}{:padding$}{}",
        left_content,
        "",
        right_content,
        padding = padding as usize
    );

    let style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg);

    let status = Paragraph::new(Line::from(vec![Span::styled(status_line, style)]));
    f.render_widget(status, area);
}

fn render_confirm_delete(f: &mut Frame, state: &AppState, area: Rect) {
    let title = state.pending_delete_title().unwrap_or("this task");
    let prompt = format!(" Delete '{}'? (Y/n) ", title);

    let style = Style::default()
        .fg(ratatui::style::Color::White)
        .bg(ratatui::style::Color::Rgb(180, 100, 0))
        .add_modifier(Modifier::BOLD);

    let padding = area.width.saturating_sub(prompt.len() as u16);
    let status_line = format!("{}{:padding$}", prompt, "", padding = padding as usize);

    let status = Paragraph::new(Line::from(vec![Span::styled(status_line, style)]));
    f.render_widget(status, area);
}
