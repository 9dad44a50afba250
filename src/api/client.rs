use super::error::ApiError;
use crate::task::{NewTask, Task};
use reqwest::blocking::{Client, Response};

/// Thin client for the remote todos API.
///
/// Each operation is a single blocking round trip with no retry and no
/// client-side timeout; callers run them on background threads (see
/// `app::remote` in the binary). Cloning shares the underlying
/// connection pool.
#[derive(Debug, Clone)]
pub struct TaskGateway {
    client: Client,
    base_url: String,
}

impl TaskGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("remotodo/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Fetches the full task collection in server order.
    pub fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.client.get(self.todos_url()).send()?;
        Ok(check_status(response)?.json()?)
    }

    /// Creates a task and returns the persisted record, including the
    /// server-assigned id. Callers must reject empty titles before
    /// getting here.
    pub fn create_task(&self, title: &str) -> Result<Task, ApiError> {
        let response = self
            .client
            .post(self.todos_url())
            .json(&NewTask::new(title))
            .send()?;
        Ok(check_status(response)?.json()?)
    }

    /// Replaces the full record for `task.id` and returns the server's
    /// authoritative echo.
    pub fn update_task(&self, task: &Task) -> Result<Task, ApiError> {
        let response = self
            .client
            .put(self.todo_url(task.id))
            .json(task)
            .send()?;
        Ok(check_status(response)?.json()?)
    }

    /// Removes a task. The response body is ignored; any non-2xx status
    /// is a failure.
    pub fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        let response = self.client.delete(self.todo_url(id)).send()?;
        check_status(response)?;
        Ok(())
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn todo_url(&self, id: i64) -> String {
        format!("{}/todos/{}", self.base_url, id)
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(response.status()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_rooted_at_todos() {
        let gateway = TaskGateway::new("http://localhost:8000").unwrap();

        assert_eq!(gateway.todos_url(), "http://localhost:8000/todos");
        assert_eq!(gateway.todo_url(7), "http://localhost:8000/todos/7");
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let gateway = TaskGateway::new("http://localhost:8000/").unwrap();

        assert_eq!(gateway.todos_url(), "http://localhost:8000/todos");
    }
}
