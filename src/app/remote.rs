use remotodo::api::{ApiError, TaskGateway};
use remotodo::task::Task;
use std::fmt;
use std::sync::mpsc::Sender;
use std::thread;

/// Which gateway call a [`RemoteEvent::Failed`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOp {
    Load,
    Create,
    Update,
    Delete,
}

impl fmt::Display for RemoteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteOp::Load => write!(f, "load"),
            RemoteOp::Create => write!(f, "create"),
            RemoteOp::Update => write!(f, "update"),
            RemoteOp::Delete => write!(f, "delete"),
        }
    }
}

/// Outcome of one background gateway call.
///
/// Every spawn below sends exactly one event. The UI loop drains the
/// channel once per tick and applies events in arrival order, which is
/// the "last response wins" policy for overlapping operations.
#[derive(Debug)]
pub enum RemoteEvent {
    Loaded(Vec<Task>),
    Created(Task),
    Updated(Task),
    Deleted(i64),
    Failed {
        op: RemoteOp,
        id: Option<i64>,
        message: String,
    },
}

fn failed(op: RemoteOp, id: Option<i64>, error: ApiError) -> RemoteEvent {
    RemoteEvent::Failed {
        op,
        id,
        message: error.to_string(),
    }
}

pub fn spawn_load(gateway: TaskGateway, tx: Sender<RemoteEvent>) {
    thread::spawn(move || {
        let event = match gateway.list_tasks() {
            Ok(tasks) => RemoteEvent::Loaded(tasks),
            Err(e) => failed(RemoteOp::Load, None, e),
        };
        let _ = tx.send(event);
    });
}

pub fn spawn_create(gateway: TaskGateway, title: String, tx: Sender<RemoteEvent>) {
    thread::spawn(move || {
        let event = match gateway.create_task(&title) {
            Ok(task) => RemoteEvent::Created(task),
            Err(e) => failed(RemoteOp::Create, None, e),
        };
        let _ = tx.send(event);
    });
}

pub fn spawn_update(gateway: TaskGateway, task: Task, tx: Sender<RemoteEvent>) {
    thread::spawn(move || {
        let id = task.id;
        let event = match gateway.update_task(&task) {
            Ok(echo) => RemoteEvent::Updated(echo),
            Err(e) => failed(RemoteOp::Update, Some(id), e),
        };
        let _ = tx.send(event);
    });
}

pub fn spawn_delete(gateway: TaskGateway, id: i64, tx: Sender<RemoteEvent>) {
    thread::spawn(move || {
        let event = match gateway.delete_task(id) {
            Ok(()) => RemoteEvent::Deleted(id),
            Err(e) => failed(RemoteOp::Delete, Some(id), e),
        };
        let _ = tx.send(event);
    });
}
