//! Task data structure and related functionality.
//!
//! This module defines the `Task` record held by the controller and the
//! opaque `TaskId` used to address it independently of its list position.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Stable identifier of a task. Never reused within one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub created_at_utc: i64,
}

impl Task {
    /// Create an incomplete task stamped with the current time.
    ///
    /// `text` is expected to be already trimmed and non-empty.
    pub fn new(id: TaskId, text: String) -> Self {
        Task {
            id,
            text,
            completed: false,
            created_at_utc: Utc::now().timestamp(),
        }
    }

    /// Whether this task's text matches `query` as a case-insensitive substring.
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.text.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Normalise task text for duplicate comparison: trimmed and lowercased.
pub fn normalise_text(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_text() {
        assert_eq!(normalise_text("  Buy Milk "), "buy milk");
        assert_eq!(normalise_text("buy milk"), "buy milk");
        assert_eq!(normalise_text("   "), "");
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let task = Task::new(TaskId(1), "Wash car".to_string());
        assert!(task.matches("wash"));
        assert!(task.matches("CAR"));
        assert!(task.matches(""));
        assert!(!task.matches("bike"));
    }

    #[test]
    fn test_new_task_is_incomplete() {
        let task = Task::new(TaskId(7), "A".to_string());
        assert_eq!(task.id, TaskId(7));
        assert!(!task.completed);
        assert!(task.created_at_utc > 0);
    }
}
