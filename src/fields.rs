//! Enumerations used to configure and describe controller state.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// Application variant selectable from the command line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Any text may be added any number of times.
    Simple,
    /// Adding text equal to an existing task (ignoring case and padding) is rejected.
    Unique,
}

impl Variant {
    pub fn policy(self) -> DuplicatePolicy {
        match self {
            Variant::Simple => DuplicatePolicy::Allow,
            Variant::Unique => DuplicatePolicy::Reject,
        }
    }
}

/// How the controller treats task text that already exists in the list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    Allow,
    #[default]
    Reject,
}

/// Whether the draft will create a new task or overwrite an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Add,
    Edit(TaskId),
}

impl Mode {
    /// Short lowercase label for display and snapshots.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Add => "add",
            Mode::Edit(_) => "edit",
        }
    }
}

/// Summary counts over the whole task list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Counts {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}
