//! The task list state machine.
//!
//! `TaskListController` exclusively owns the ordered task list together with
//! the transient draft, edit target and search query. Every command either
//! applies fully or returns a `TaskError` without touching state.

use tracing::debug;

use crate::error::{TaskError, ValidationError};
use crate::fields::{Counts, DuplicatePolicy, Mode};
use crate::task::{normalise_text, Task, TaskId};

/// In-memory task list with add/edit draft handling and search filtering.
#[derive(Debug, Default)]
pub struct TaskListController {
    tasks: Vec<Task>,
    draft_text: String,
    editing_id: Option<TaskId>,
    search_query: String,
    policy: DuplicatePolicy,
    last_id: u64,
}

impl TaskListController {
    /// Create an empty controller in add mode.
    pub fn new(policy: DuplicatePolicy) -> Self {
        TaskListController {
            policy,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn editing_id(&self) -> Option<TaskId> {
        self.editing_id
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Current draft mode, keyed by the presence of an edit target.
    pub fn mode(&self) -> Mode {
        match self.editing_id {
            Some(id) => Mode::Edit(id),
            None => Mode::Add,
        }
    }

    /// Get a task by ID.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn position(&self, id: TaskId) -> Result<usize, TaskError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))
    }

    /// Total, completed and remaining task counts.
    pub fn counts(&self) -> Counts {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        Counts {
            total: self.tasks.len(),
            completed,
            remaining: self.tasks.len() - completed,
        }
    }

    /// Replace the draft text. No validation happens here.
    pub fn set_draft_text(&mut self, s: impl Into<String>) {
        self.draft_text = s.into();
    }

    /// Replace the search query used by `visible_tasks`.
    pub fn set_search_query(&mut self, q: impl Into<String>) {
        self.search_query = q.into();
    }

    /// Validate the trimmed draft against emptiness and, under
    /// `DuplicatePolicy::Reject`, against every task other than `except`.
    fn validated_draft(&self, except: Option<TaskId>) -> Result<String, ValidationError> {
        let text = self.draft_text.trim();
        if text.is_empty() {
            return Err(ValidationError::Empty);
        }
        if self.policy == DuplicatePolicy::Reject {
            let normalised = normalise_text(text);
            let clash = self
                .tasks
                .iter()
                .filter(|t| Some(t.id) != except)
                .any(|t| normalise_text(&t.text) == normalised);
            if clash {
                return Err(ValidationError::Duplicate);
            }
        }
        Ok(text.to_string())
    }

    /// Append a new task from the draft and clear the draft.
    pub fn add_task(&mut self) -> Result<TaskId, TaskError> {
        let text = self.validated_draft(None).map_err(|e| {
            debug!(draft = %self.draft_text, error = %e, "add rejected");
            e
        })?;

        self.last_id += 1;
        let id = TaskId(self.last_id);
        self.tasks.push(Task::new(id, text));
        self.draft_text.clear();
        debug!(%id, total = self.tasks.len(), "task added");
        Ok(id)
    }

    /// Enter edit mode for `id`, loading its text into the draft.
    pub fn begin_edit(&mut self, id: TaskId) -> Result<(), TaskError> {
        let idx = self.position(id)?;
        self.draft_text = self.tasks[idx].text.clone();
        self.editing_id = Some(id);
        debug!(%id, "edit started");
        Ok(())
    }

    /// Overwrite the edited task's text with the trimmed draft and return to add mode.
    ///
    /// The draft goes through the same checks as `add_task`, ignoring the task
    /// being edited. If the edit target has disappeared the controller stays in
    /// edit mode so the user can cancel.
    pub fn save_edit(&mut self) -> Result<TaskId, TaskError> {
        let id = self
            .editing_id
            .ok_or(TaskError::InvalidState("not editing"))?;
        let idx = self.position(id)?;
        let text = self.validated_draft(Some(id)).map_err(|e| {
            debug!(%id, error = %e, "save rejected");
            e
        })?;

        self.tasks[idx].text = text;
        self.draft_text.clear();
        self.editing_id = None;
        debug!(%id, "edit saved");
        Ok(id)
    }

    /// Leave edit mode and clear the draft. No-op when already in add mode
    /// apart from clearing the draft.
    pub fn cancel_edit(&mut self) {
        if let Some(id) = self.editing_id.take() {
            debug!(%id, "edit cancelled");
        }
        self.draft_text.clear();
    }

    /// Flip the completion flag of `id`, returning the new value.
    pub fn toggle_complete(&mut self, id: TaskId) -> Result<bool, TaskError> {
        let idx = self.position(id)?;
        let task = &mut self.tasks[idx];
        task.completed = !task.completed;
        debug!(%id, completed = task.completed, "task toggled");
        Ok(task.completed)
    }

    /// Remove `id`, keeping the order of the remaining tasks.
    ///
    /// Removing the task under edit also leaves edit mode.
    pub fn remove_task(&mut self, id: TaskId) -> Result<Task, TaskError> {
        let idx = self.position(id)?;
        let removed = self.tasks.remove(idx);
        if self.editing_id == Some(id) {
            self.cancel_edit();
        }
        debug!(%id, total = self.tasks.len(), "task removed");
        Ok(removed)
    }

    /// Remove every task. Draft, edit target and search query are left as they are.
    pub fn clear_all(&mut self) {
        let cleared = self.tasks.len();
        self.tasks.clear();
        debug!(cleared, "all tasks cleared");
    }

    /// Tasks matching the search query in insertion order; all tasks when the
    /// query is empty.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.matches(&self.search_query))
            .collect()
    }
}
