use serde::{Deserialize, Serialize};

/// A single to-do item as stored by the remote service.
///
/// Ids are assigned by the server; a `Task` value only ever exists as a
/// deserialized server response, never as something built up locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

/// Request body for creating a task. The server answers with the
/// persisted [`Task`] including its assigned id.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }
}
