//! # todo - single-screen to-do list
//!
//! An in-memory to-do list driven by a small state machine,
//! [`controller::TaskListController`], with two views on top of it:
//!
//! - an interactive terminal UI (`todo ui`) with an input line that doubles as
//!   the editor, a searchable task list, completion toggling, deletion and
//!   clear-all;
//! - a headless script driver (`todo script`) that replays JSON-lines UI
//!   events and prints state snapshots.
//!
//! Nothing is persisted. Tasks live until the program exits.
//!
//! ## Variants
//!
//! - **unique** (default): adding text that matches an existing task, ignoring
//!   case and surrounding whitespace, is rejected as a duplicate.
//! - **simple**: any non-empty text may be added.
//!
//! In both variants, saving an edit validates the draft the same way adding
//! does: empty text is always rejected, and duplicate text is rejected in the
//! unique variant. Deleting the task that is being edited cancels the edit.
//!
//! ```
//! use todo_list::controller::TaskListController;
//! use todo_list::fields::DuplicatePolicy;
//!
//! let mut list = TaskListController::new(DuplicatePolicy::Reject);
//! list.set_draft_text("Wash car");
//! let id = list.add_task().unwrap();
//! list.toggle_complete(id).unwrap();
//! list.set_search_query("WASH");
//! assert_eq!(list.visible_tasks().len(), 1);
//! ```

pub mod cli;
pub mod cmd;
pub mod controller;
pub mod error;
pub mod fields;
pub mod logging;
pub mod script;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}
