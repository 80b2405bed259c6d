//! Enumerations for TUI state management.

use crate::task::TaskId;

/// Which screen layer currently receives key events.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AppState {
    Main,
    Help,
    Confirm(ConfirmAction),
    /// Blocking notice for a rejected action; any key dismisses it.
    Notice(String),
}

/// Which widget on the main screen has keyboard focus.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Draft,
    List,
    Search,
}

impl Focus {
    /// Next widget in Tab order.
    pub fn next(self) -> Self {
        match self {
            Focus::Draft => Focus::List,
            Focus::List => Focus::Search,
            Focus::Search => Focus::Draft,
        }
    }
}

/// Destructive action awaiting confirmation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ConfirmAction {
    Remove { id: TaskId, text: String },
    ClearAll { count: usize },
}

impl ConfirmAction {
    pub fn describe(&self) -> String {
        match self {
            ConfirmAction::Remove { text, .. } => format!("Delete task '{}'", text),
            ConfirmAction::ClearAll { count } => format!("Delete all {} task(s)", count),
        }
    }
}
