use super::mode::Mode;
use super::state::AppState;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use remotodo::task::Filter;
use remotodo::utils::unicode::{next_char_boundary, prev_char_boundary};

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Result<()> {
    if state.show_help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                state.show_help = false;
            }
            _ => {}
        }
        return Ok(());
    }

    match state.mode {
        Mode::Navigate => handle_navigate_mode(key, state),
        Mode::Insert => handle_insert_mode(key, state),
        Mode::Edit => handle_edit_mode(key, state),
        Mode::ConfirmDelete => handle_confirm_delete_mode(key, state),
    }
    Ok(())
}

fn handle_navigate_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
        }
        KeyCode::Char('?') => {
            state.show_help = true;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.move_cursor_down();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.move_cursor_up();
        }
        KeyCode::Char('g') => {
            state.move_cursor_top();
        }
        KeyCode::Char('G') => {
            state.move_cursor_bottom();
        }
        KeyCode::Char('a') | KeyCode::Char('i') => {
            state.input_cursor = state.input_buffer.len();
            state.mode = Mode::Insert;
        }
        KeyCode::Char('e') => {
            state.begin_edit();
        }
        KeyCode::Char('x') | KeyCode::Char(' ') => {
            state.request_toggle();
        }
        KeyCode::Char('d') => {
            state.begin_delete();
        }
        KeyCode::Char('f') | KeyCode::Tab => {
            state.cycle_filter();
        }
        KeyCode::Char('1') => {
            state.set_filter(Filter::All);
        }
        KeyCode::Char('2') => {
            state.set_filter(Filter::Completed);
        }
        KeyCode::Char('3') => {
            state.set_filter(Filter::Pending);
        }
        KeyCode::Char('t') => {
            state.toggle_theme();
        }
        KeyCode::Char('r') => {
            state.request_refresh();
        }
        _ => {}
    }
}

fn handle_insert_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            // Leave the draft in place; it only clears on a confirmed
            // create.
            state.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            state.submit_add();
        }
        KeyCode::Backspace => {
            if state.input_cursor > 0 {
                let prev = prev_char_boundary(&state.input_buffer, state.input_cursor);
                state.input_buffer.drain(prev..state.input_cursor);
                state.input_cursor = prev;
            }
        }
        KeyCode::Delete => {
            if state.input_cursor < state.input_buffer.len() {
                let next = next_char_boundary(&state.input_buffer, state.input_cursor);
                state.input_buffer.drain(state.input_cursor..next);
            }
        }
        KeyCode::Left => {
            if state.input_cursor > 0 {
                state.input_cursor = prev_char_boundary(&state.input_buffer, state.input_cursor);
            }
        }
        KeyCode::Right => {
            if state.input_cursor < state.input_buffer.len() {
                state.input_cursor = next_char_boundary(&state.input_buffer, state.input_cursor);
            }
        }
        KeyCode::Home => {
            state.input_cursor = 0;
        }
        KeyCode::End => {
            state.input_cursor = state.input_buffer.len();
        }
        KeyCode::Char(c) => {
            state.input_buffer.insert(state.input_cursor, c);
            state.input_cursor += c.len_utf8();
        }
        _ => {}
    }
}

fn handle_edit_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            state.cancel_edit();
            return;
        }
        KeyCode::Enter => {
            state.save_edit();
            return;
        }
        _ => {}
    }

    let Some(edit) = state.edit.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Backspace => {
            if edit.cursor > 0 {
                let prev = prev_char_boundary(&edit.buffer, edit.cursor);
                edit.buffer.drain(prev..edit.cursor);
                edit.cursor = prev;
            }
        }
        KeyCode::Delete => {
            if edit.cursor < edit.buffer.len() {
                let next = next_char_boundary(&edit.buffer, edit.cursor);
                edit.buffer.drain(edit.cursor..next);
            }
        }
        KeyCode::Left => {
            if edit.cursor > 0 {
                edit.cursor = prev_char_boundary(&edit.buffer, edit.cursor);
            }
        }
        KeyCode::Right => {
            if edit.cursor < edit.buffer.len() {
                edit.cursor = next_char_boundary(&edit.buffer, edit.cursor);
            }
        }
        KeyCode::Home => {
            edit.cursor = 0;
        }
        KeyCode::End => {
            edit.cursor = edit.buffer.len();
        }
        KeyCode::Char(c) => {
            edit.buffer.insert(edit.cursor, c);
            edit.cursor += c.len_utf8();
        }
        _ => {}
    }
}

fn handle_confirm_delete_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            state.confirm_delete();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.abort_delete();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use remotodo::api::TaskGateway;
    use remotodo::storage::{ColorScheme, ThemePrefs};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_state() -> AppState {
        let dir = tempfile::tempdir().unwrap();
        let gateway = TaskGateway::new("http://127.0.0.1:1").unwrap();
        let prefs = ThemePrefs::with_path(dir.keep().join("theme"));
        AppState::new(gateway, prefs, ColorScheme::Dark)
    }

    #[test]
    fn test_q_quits() {
        let mut state = test_state();
        handle_key_event(press(KeyCode::Char('q')), &mut state).unwrap();
        assert!(state.should_quit);
    }

    #[test]
    fn test_a_enters_insert_mode_and_typing_appends() {
        let mut state = test_state();

        handle_key_event(press(KeyCode::Char('a')), &mut state).unwrap();
        assert_eq!(state.mode, Mode::Insert);

        for c in "hi".chars() {
            handle_key_event(press(KeyCode::Char(c)), &mut state).unwrap();
        }
        assert_eq!(state.input_buffer, "hi");
        assert_eq!(state.input_cursor, 2);

        handle_key_event(press(KeyCode::Backspace), &mut state).unwrap();
        assert_eq!(state.input_buffer, "h");
    }

    #[test]
    fn test_esc_keeps_the_draft() {
        let mut state = test_state();
        state.mode = Mode::Insert;
        state.input_buffer = "half-typed".to_string();
        state.input_cursor = state.input_buffer.len();

        handle_key_event(press(KeyCode::Esc), &mut state).unwrap();

        assert_eq!(state.mode, Mode::Navigate);
        assert_eq!(state.input_buffer, "half-typed");
    }

    #[test]
    fn test_filter_keys() {
        let mut state = test_state();

        handle_key_event(press(KeyCode::Char('2')), &mut state).unwrap();
        assert_eq!(state.filter, Filter::Completed);

        handle_key_event(press(KeyCode::Char('f')), &mut state).unwrap();
        assert_eq!(state.filter, Filter::Pending);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut state = test_state();
        state.show_help = true;

        handle_key_event(press(KeyCode::Char('t')), &mut state).unwrap();
        assert_eq!(state.scheme, ColorScheme::Dark);

        handle_key_event(press(KeyCode::Esc), &mut state).unwrap();
        assert!(!state.show_help);
    }
}
