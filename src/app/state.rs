use super::mode::Mode;
use super::remote::{self, RemoteEvent};
use crate::ui::theme::Theme;
use remotodo::api::TaskGateway;
use remotodo::storage::{ColorScheme, ThemePrefs};
use remotodo::task::{Filter, Task};
use ratatui::widgets::ListState;
use std::sync::mpsc;
use tracing::debug;

/// The one in-progress retitle, addressed by server id so that an
/// in-flight response can never land on the wrong task when the
/// sequence shifts underneath it.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub id: i64,
    pub buffer: String,
    pub cursor: usize,
    /// Set once the update request is in flight; the session clears
    /// only when the matching server echo arrives.
    pub saving: bool,
}

pub struct AppState {
    /// Local mirror of the server's task collection, in server return
    /// order. Mutated only by [`AppState::apply_remote_event`].
    pub tasks: Vec<Task>,
    pub filter: Filter,
    /// Cursor into the currently filtered view.
    pub cursor_position: usize,
    pub mode: Mode,
    pub input_buffer: String,
    pub input_cursor: usize,
    pub edit: Option<EditSession>,
    /// Task id awaiting delete confirmation.
    pub pending_delete: Option<i64>,
    pub scheme: ColorScheme,
    pub theme: Theme,
    pub prefs: ThemePrefs,
    pub gateway: TaskGateway,
    pub should_quit: bool,
    pub show_help: bool,
    /// Requests in flight; each spawn sends back exactly one event.
    pub pending_requests: usize,
    pub list_state: ListState,
    remote_tx: mpsc::Sender<RemoteEvent>,
    remote_rx: mpsc::Receiver<RemoteEvent>,
}

impl AppState {
    pub fn new(gateway: TaskGateway, prefs: ThemePrefs, scheme: ColorScheme) -> Self {
        let (remote_tx, remote_rx) = mpsc::channel();

        Self {
            tasks: Vec::new(),
            filter: Filter::All,
            cursor_position: 0,
            mode: Mode::Navigate,
            input_buffer: String::new(),
            input_cursor: 0,
            edit: None,
            pending_delete: None,
            scheme,
            theme: Theme::for_scheme(scheme),
            prefs,
            gateway,
            should_quit: false,
            show_help: false,
            pending_requests: 0,
            list_state: ListState::default(),
            remote_tx,
            remote_rx,
        }
    }

    // --- view -----------------------------------------------------------

    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter.apply(&self.tasks)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().into_iter().nth(self.cursor_position)
    }

    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
        self.sync_list_state();
    }

    pub fn move_cursor_down(&mut self) {
        let len = self.visible_tasks().len();
        if self.cursor_position + 1 < len {
            self.cursor_position += 1;
        }
        self.sync_list_state();
    }

    pub fn move_cursor_top(&mut self) {
        self.cursor_position = 0;
        self.sync_list_state();
    }

    pub fn move_cursor_bottom(&mut self) {
        self.cursor_position = self.visible_tasks().len().saturating_sub(1);
        self.sync_list_state();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.clamp_cursor();
        self.sync_list_state();
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.cycle());
    }

    pub fn toggle_theme(&mut self) {
        self.scheme = self.scheme.toggled();
        self.theme = Theme::for_scheme(self.scheme);
        // Best effort; a failed write is logged inside the store.
        self.prefs.store(self.scheme);
    }

    // --- intents that hit the network -----------------------------------

    pub fn request_initial_load(&mut self) {
        self.pending_requests += 1;
        remote::spawn_load(self.gateway.clone(), self.remote_tx.clone());
    }

    pub fn request_refresh(&mut self) {
        self.request_initial_load();
    }

    /// Issues the create request unless the trimmed draft is empty, in
    /// which case nothing happens at all. The draft is cleared only
    /// when the server confirms.
    pub fn submit_add(&mut self) {
        let title = self.input_buffer.trim().to_string();
        if title.is_empty() {
            return;
        }

        self.pending_requests += 1;
        remote::spawn_create(self.gateway.clone(), title, self.remote_tx.clone());
        self.mode = Mode::Navigate;
    }

    /// Full record with the completion flag inverted, for the selected
    /// task. The local copy stays untouched until the echo arrives.
    pub fn toggle_payload(&self) -> Option<Task> {
        let task = self.selected_task()?;
        Some(Task {
            completed: !task.completed,
            ..task.clone()
        })
    }

    pub fn request_toggle(&mut self) {
        let Some(payload) = self.toggle_payload() else {
            return;
        };
        self.pending_requests += 1;
        remote::spawn_update(self.gateway.clone(), payload, self.remote_tx.clone());
    }

    /// Starts (or restarts) the edit session for the selected task,
    /// seeding the draft with its current title. An existing session is
    /// simply replaced.
    pub fn begin_edit(&mut self) {
        if let Some(task) = self.selected_task() {
            self.edit = Some(EditSession {
                id: task.id,
                buffer: task.title.clone(),
                cursor: task.title.len(),
                saving: false,
            });
            self.mode = Mode::Edit;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
        self.mode = Mode::Navigate;
    }

    /// Full record carrying the draft title and the unchanged
    /// completion flag. None if the session's task has vanished.
    pub fn edit_payload(&self) -> Option<Task> {
        let edit = self.edit.as_ref()?;
        let current = self.tasks.iter().find(|t| t.id == edit.id)?;
        Some(Task {
            id: edit.id,
            title: edit.buffer.clone(),
            completed: current.completed,
        })
    }

    pub fn save_edit(&mut self) {
        let Some(payload) = self.edit_payload() else {
            // Task was deleted while editing; nothing left to save.
            self.cancel_edit();
            return;
        };

        if let Some(edit) = self.edit.as_mut() {
            edit.saving = true;
        }
        self.pending_requests += 1;
        remote::spawn_update(self.gateway.clone(), payload, self.remote_tx.clone());
    }

    pub fn begin_delete(&mut self) {
        if let Some(task) = self.selected_task() {
            self.pending_delete = Some(task.id);
            self.mode = Mode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.pending_requests += 1;
            remote::spawn_delete(self.gateway.clone(), id, self.remote_tx.clone());
        }
        self.mode = Mode::Navigate;
    }

    pub fn abort_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::Navigate;
    }

    pub fn pending_delete_title(&self) -> Option<&str> {
        let id = self.pending_delete?;
        self.tasks.iter().find(|t| t.id == id).map(|t| t.title.as_str())
    }

    // --- reconciliation -------------------------------------------------

    /// Applies every response that has arrived since the last tick, in
    /// arrival order.
    pub fn drain_remote_events(&mut self) {
        while let Ok(event) = self.remote_rx.try_recv() {
            self.apply_remote_event(event);
        }
    }

    /// The single place where server responses touch local state. The
    /// server's echo is authoritative: local records are replaced with
    /// whatever came back, never with a locally computed value.
    pub fn apply_remote_event(&mut self, event: RemoteEvent) {
        self.pending_requests = self.pending_requests.saturating_sub(1);

        match event {
            RemoteEvent::Loaded(tasks) => {
                debug!(count = tasks.len(), "task list loaded");
                self.tasks = tasks;
                self.clamp_cursor();
            }
            RemoteEvent::Created(task) => {
                debug!(id = task.id, "task created");
                self.tasks.push(task);
                self.input_buffer.clear();
                self.input_cursor = 0;
            }
            RemoteEvent::Updated(task) => {
                let id = task.id;
                // A record deleted while the update was in flight has
                // nowhere to land; the echo is dropped.
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
                    *slot = task;
                }
                if self.edit.as_ref().is_some_and(|e| e.saving && e.id == id) {
                    self.edit = None;
                    if self.mode == Mode::Edit {
                        self.mode = Mode::Navigate;
                    }
                }
                self.clamp_cursor();
            }
            RemoteEvent::Deleted(id) => {
                debug!(id, "task deleted");
                self.tasks.retain(|t| t.id != id);
                if self.edit.as_ref().is_some_and(|e| e.id == id) {
                    self.edit = None;
                    if self.mode == Mode::Edit {
                        self.mode = Mode::Navigate;
                    }
                }
                self.clamp_cursor();
            }
            RemoteEvent::Failed { op, id, message } => {
                // Terminal: log it and leave local state as it was.
                tracing::error!(%op, ?id, "request failed: {message}");
                if let Some(edit) = self.edit.as_mut()
                    && edit.saving
                    && Some(edit.id) == id
                {
                    edit.saving = false;
                }
            }
        }

        self.sync_list_state();
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_tasks().len();
        if len == 0 {
            self.cursor_position = 0;
        } else if self.cursor_position >= len {
            self.cursor_position = len - 1;
        }
    }

    pub fn sync_list_state(&mut self) {
        let len = self.visible_tasks().len();
        self.list_state
            .select((len > 0).then_some(self.cursor_position));
    }
}

#[cfg(test)]
mod tests {
    use super::super::remote::RemoteOp;
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(id: i64, title: &str, completed: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            completed,
        }
    }

    fn test_state() -> AppState {
        let dir = tempfile::tempdir().unwrap();
        let gateway = TaskGateway::new("http://127.0.0.1:1").unwrap();
        let prefs = ThemePrefs::with_path(dir.keep().join("theme"));
        AppState::new(gateway, prefs, ColorScheme::Dark)
    }

    fn state_with_tasks(tasks: Vec<Task>) -> AppState {
        let mut state = test_state();
        state.apply_remote_event(RemoteEvent::Loaded(tasks));
        state
    }

    #[test]
    fn test_loaded_replaces_sequence_in_server_order() {
        let mut state = test_state();

        state.apply_remote_event(RemoteEvent::Loaded(vec![
            task(3, "c", false),
            task(1, "a", true),
            task(2, "b", false),
        ]));

        let ids: Vec<i64> = state.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_created_appends_and_clears_draft() {
        let mut state = state_with_tasks(vec![task(1, "existing", false)]);
        state.input_buffer = "Buy milk".to_string();
        state.input_cursor = state.input_buffer.len();

        state.apply_remote_event(RemoteEvent::Created(task(2, "Buy milk", false)));

        assert_eq!(state.tasks.last(), Some(&task(2, "Buy milk", false)));
        assert_eq!(state.tasks.len(), 2);
        assert!(state.input_buffer.is_empty());
        assert_eq!(state.input_cursor, 0);
    }

    #[test]
    fn test_empty_add_is_rejected_without_a_request() {
        let mut state = test_state();
        state.mode = Mode::Insert;

        for draft in ["", "   "] {
            state.input_buffer = draft.to_string();
            state.submit_add();

            assert_eq!(state.pending_requests, 0);
            assert!(state.tasks.is_empty());
            assert_eq!(state.mode, Mode::Insert);
        }
    }

    #[test]
    fn test_nonempty_add_issues_one_request() {
        let mut state = test_state();
        state.mode = Mode::Insert;
        state.input_buffer = "Buy milk".to_string();

        state.submit_add();

        assert_eq!(state.pending_requests, 1);
        // No optimistic insert; the task appears only on Created.
        assert!(state.tasks.is_empty());
        assert_eq!(state.mode, Mode::Navigate);
    }

    #[test]
    fn test_toggle_payload_inverts_flag_only() {
        let state = state_with_tasks(vec![task(2, "X", false)]);

        let payload = state.toggle_payload().unwrap();

        assert_eq!(payload, task(2, "X", true));
    }

    #[test]
    fn test_updated_applies_server_echo_verbatim() {
        let mut state = state_with_tasks(vec![task(2, "X", false)]);

        // The server is free to echo something other than what was
        // sent; the local record becomes exactly the echo.
        state.apply_remote_event(RemoteEvent::Updated(task(2, "X (normalized)", true)));

        assert_eq!(state.tasks, vec![task(2, "X (normalized)", true)]);
    }

    #[test]
    fn test_failed_update_leaves_state_unchanged() {
        let mut state = state_with_tasks(vec![task(2, "X", false)]);

        state.apply_remote_event(RemoteEvent::Failed {
            op: RemoteOp::Update,
            id: Some(2),
            message: "boom".to_string(),
        });

        assert_eq!(state.tasks, vec![task(2, "X", false)]);
    }

    #[test]
    fn test_delete_removes_only_after_confirmation_event() {
        let mut state = state_with_tasks(vec![task(1, "a", false), task(2, "b", false)]);

        state.apply_remote_event(RemoteEvent::Failed {
            op: RemoteOp::Delete,
            id: Some(2),
            message: "boom".to_string(),
        });
        assert_eq!(state.tasks.len(), 2);

        state.apply_remote_event(RemoteEvent::Deleted(2));
        let ids: Vec<i64> = state.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_begin_edit_seeds_draft_with_current_title() {
        let mut state = state_with_tasks(vec![task(5, "Buy milk", false)]);

        state.begin_edit();

        let edit = state.edit.as_ref().unwrap();
        assert_eq!(edit.id, 5);
        assert_eq!(edit.buffer, "Buy milk");
        assert_eq!(edit.cursor, "Buy milk".len());
        assert!(!edit.saving);
        assert_eq!(state.mode, Mode::Edit);
    }

    #[test]
    fn test_edit_payload_keeps_completion_flag() {
        let mut state = state_with_tasks(vec![task(5, "Buy milk", true)]);
        state.begin_edit();
        state.edit.as_mut().unwrap().buffer = "Buy bread".to_string();

        let payload = state.edit_payload().unwrap();

        assert_eq!(payload, task(5, "Buy bread", true));
    }

    #[test]
    fn test_edit_session_clears_only_on_matching_echo() {
        let mut state = state_with_tasks(vec![task(5, "Buy milk", false), task(6, "other", false)]);
        state.begin_edit();
        state.edit.as_mut().unwrap().saving = true;

        // An unrelated toggle echo must not close the session.
        state.apply_remote_event(RemoteEvent::Updated(task(6, "other", true)));
        assert!(state.edit.is_some());

        state.apply_remote_event(RemoteEvent::Updated(task(5, "Buy bread", false)));
        assert!(state.edit.is_none());
        assert_eq!(state.mode, Mode::Navigate);
        assert_eq!(state.tasks[0].title, "Buy bread");
    }

    #[test]
    fn test_failed_save_keeps_session_open_with_draft() {
        let mut state = state_with_tasks(vec![task(5, "Buy milk", false)]);
        state.begin_edit();
        state.edit.as_mut().unwrap().buffer = "Buy bread".to_string();
        state.edit.as_mut().unwrap().saving = true;

        state.apply_remote_event(RemoteEvent::Failed {
            op: RemoteOp::Update,
            id: Some(5),
            message: "boom".to_string(),
        });

        let edit = state.edit.as_ref().unwrap();
        assert_eq!(edit.buffer, "Buy bread");
        assert!(!edit.saving);
        assert_eq!(state.mode, Mode::Edit);
        // The local title is still the old one.
        assert_eq!(state.tasks[0].title, "Buy milk");
    }

    #[test]
    fn test_editing_a_task_deleted_remotely_drops_the_session() {
        let mut state = state_with_tasks(vec![task(5, "Buy milk", false)]);
        state.begin_edit();

        state.apply_remote_event(RemoteEvent::Deleted(5));

        assert!(state.edit.is_none());
        assert_eq!(state.mode, Mode::Navigate);
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn test_filter_change_clamps_cursor() {
        let mut state = state_with_tasks(vec![
            task(1, "a", false),
            task(2, "b", false),
            task(3, "c", true),
        ]);
        state.move_cursor_bottom();
        assert_eq!(state.cursor_position, 2);

        state.set_filter(Filter::Completed);

        assert_eq!(state.visible_tasks().len(), 1);
        assert_eq!(state.cursor_position, 0);
        assert_eq!(state.selected_task().unwrap().id, 3);
    }

    #[test]
    fn test_selected_task_respects_filter() {
        let mut state = state_with_tasks(vec![
            task(1, "a", true),
            task(2, "b", false),
            task(3, "c", true),
        ]);
        state.set_filter(Filter::Completed);
        state.move_cursor_down();

        assert_eq!(state.selected_task().unwrap().id, 3);
    }

    #[test]
    fn test_toggle_theme_flips_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme");
        let gateway = TaskGateway::new("http://127.0.0.1:1").unwrap();
        let mut state = AppState::new(
            gateway,
            ThemePrefs::with_path(path.clone()),
            ColorScheme::Dark,
        );

        state.toggle_theme();

        assert_eq!(state.scheme, ColorScheme::Light);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "light");
    }

    #[test]
    fn test_pending_requests_decrement_on_any_event() {
        let mut state = test_state();
        state.pending_requests = 2;

        state.apply_remote_event(RemoteEvent::Loaded(vec![]));
        assert_eq!(state.pending_requests, 1);

        state.apply_remote_event(RemoteEvent::Failed {
            op: RemoteOp::Load,
            id: None,
            message: "boom".to_string(),
        });
        assert_eq!(state.pending_requests, 0);
    }

    #[test]
    fn test_failed_initial_load_leaves_sequence_empty() {
        let mut state = test_state();

        state.apply_remote_event(RemoteEvent::Failed {
            op: RemoteOp::Load,
            id: None,
            message: "connection refused".to_string(),
        });

        assert!(state.tasks.is_empty());
        assert_eq!(state.cursor_position, 0);
    }
}
