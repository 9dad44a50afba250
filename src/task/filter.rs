use super::Task;
use anyhow::{anyhow, Error};
use std::fmt;
use std::str::FromStr;

/// View-level predicate over the task sequence. Filtering never touches
/// the underlying sequence; it only selects which tasks are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => task.completed,
            Filter::Pending => !task.completed,
        }
    }

    /// Selects the visible tasks in sequence order.
    pub fn apply(self, tasks: &[Task]) -> Vec<&Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    pub fn cycle(self) -> Self {
        match self {
            Filter::All => Filter::Completed,
            Filter::Completed => Filter::Pending,
            Filter::Pending => Filter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Completed => "Completed",
            Filter::Pending => "Pending",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "completed" => Ok(Filter::Completed),
            "pending" => Ok(Filter::Pending),
            other => Err(anyhow!(
                "unknown filter '{other}' (expected all, completed or pending)"
            )),
        }
    }
}
