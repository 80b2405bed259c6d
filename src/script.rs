//! Headless driver that replays UI events from a JSON-lines script.
//!
//! Each non-blank line that does not start with `#` is one `ScriptEvent`.
//! Events are applied to a `TaskListController` in order; `snapshot` events and
//! rejected commands produce one JSON line of output each.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::controller::TaskListController;
use crate::error::{AppError, TaskError};
use crate::fields::Counts;
use crate::task::{Task, TaskId};

/// One user interaction, as the view layer would report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptEvent {
    SetDraft { text: String },
    Add,
    BeginEdit { id: TaskId },
    SaveEdit,
    CancelEdit,
    Toggle { id: TaskId },
    Remove { id: TaskId },
    ClearAll,
    Search { query: String },
    Snapshot,
}

/// State as the view layer would render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: String,
    pub editing_id: Option<TaskId>,
    pub draft: String,
    pub search: String,
    pub counts: Counts,
    pub visible: Vec<Task>,
}

impl Snapshot {
    pub fn capture(controller: &TaskListController) -> Self {
        Snapshot {
            mode: controller.mode().label().to_string(),
            editing_id: controller.editing_id(),
            draft: controller.draft_text().to_string(),
            search: controller.search_query().to_string(),
            counts: controller.counts(),
            visible: controller.visible_tasks().into_iter().cloned().collect(),
        }
    }
}

/// A rejected command, reported with its 1-based script line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub error: String,
    pub line: usize,
}

/// Totals for a finished script run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptSummary {
    pub applied: usize,
    pub rejected: usize,
    pub snapshots: usize,
}

/// Apply a single event. Returns `Ok(true)` when the event asks for a snapshot.
pub fn apply_event(controller: &mut TaskListController, event: ScriptEvent) -> Result<bool, TaskError> {
    match event {
        ScriptEvent::SetDraft { text } => controller.set_draft_text(text),
        ScriptEvent::Add => {
            controller.add_task()?;
        }
        ScriptEvent::BeginEdit { id } => controller.begin_edit(id)?,
        ScriptEvent::SaveEdit => {
            controller.save_edit()?;
        }
        ScriptEvent::CancelEdit => controller.cancel_edit(),
        ScriptEvent::Toggle { id } => {
            controller.toggle_complete(id)?;
        }
        ScriptEvent::Remove { id } => {
            controller.remove_task(id)?;
        }
        ScriptEvent::ClearAll => controller.clear_all(),
        ScriptEvent::Search { query } => controller.set_search_query(query),
        ScriptEvent::Snapshot => return Ok(true),
    }
    Ok(false)
}

fn write_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), AppError> {
    serde_json::to_writer(&mut *out, value).map_err(AppError::Encode)?;
    writeln!(out)?;
    Ok(())
}

/// Replay every event from `input` against `controller`, writing snapshots and
/// rejections to `out`.
///
/// Rejected commands are reported and the run continues; a line that is not a
/// valid event aborts the run.
pub fn run_script<R: BufRead, W: Write>(
    controller: &mut TaskListController,
    input: R,
    out: &mut W,
) -> Result<ScriptSummary, AppError> {
    let mut summary = ScriptSummary::default();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| AppError::ScriptRead { line: line_no, source })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let event: ScriptEvent = serde_json::from_str(trimmed)
            .map_err(|source| AppError::Script { line: line_no, source })?;

        match apply_event(controller, event) {
            Ok(true) => {
                write_line(out, &Snapshot::capture(controller))?;
                summary.snapshots += 1;
            }
            Ok(false) => summary.applied += 1,
            Err(e) => {
                debug!(line = line_no, error = %e, "command rejected");
                write_line(out, &Rejection { error: e.to_string(), line: line_no })?;
                summary.rejected += 1;
            }
        }
    }

    out.flush()?;
    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        snapshots = summary.snapshots,
        "script finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::DuplicatePolicy;

    fn run(policy: DuplicatePolicy, script: &str) -> (ScriptSummary, Vec<serde_json::Value>) {
        let mut c = TaskListController::new(policy);
        let mut out = Vec::new();
        let summary = run_script(&mut c, script.as_bytes(), &mut out).unwrap();
        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (summary, lines)
    }

    #[test]
    fn test_parse_events() {
        let e: ScriptEvent = serde_json::from_str(r#"{"op":"set_draft","text":"x"}"#).unwrap();
        assert_eq!(e, ScriptEvent::SetDraft { text: "x".into() });
        let e: ScriptEvent = serde_json::from_str(r#"{"op":"toggle","id":3}"#).unwrap();
        assert_eq!(e, ScriptEvent::Toggle { id: TaskId(3) });
        let e: ScriptEvent = serde_json::from_str(r#"{"op":"clear_all"}"#).unwrap();
        assert_eq!(e, ScriptEvent::ClearAll);
    }

    #[test]
    fn test_snapshot_and_rejection_lines() {
        let script = r#"
# wash car scenario
{"op":"set_draft","text":"Wash car"}
{"op":"add"}
{"op":"add"}
{"op":"search","query":"WASH"}
{"op":"snapshot"}
"#;
        let (summary, lines) = run(DuplicatePolicy::Reject, script);
        assert_eq!(summary, ScriptSummary { applied: 3, rejected: 1, snapshots: 1 });
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["error"], "empty task");
        assert_eq!(lines[0]["line"], 5);
        assert_eq!(lines[1]["mode"], "add");
        assert_eq!(lines[1]["visible"][0]["text"], "Wash car");
        assert_eq!(lines[1]["visible"][0]["completed"], false);
        assert_eq!(lines[1]["counts"]["total"], 1);
    }

    #[test]
    fn test_malformed_line_is_fatal() {
        let mut c = TaskListController::new(DuplicatePolicy::Reject);
        let mut out = Vec::new();
        let err = run_script(&mut c, "{\"op\":\"add\"}\n{\"op\":\"fly\"}\n".as_bytes(), &mut out)
            .unwrap_err();
        assert!(matches!(err, AppError::Script { line: 2, .. }));
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let mut c = TaskListController::new(DuplicatePolicy::Reject);
        let mut out = Vec::new();
        let input: &[u8] = b"{\"op\":\"add\"}\n{\"op\":\"set_draft\",\"text\":\"\xff\"}\n";
        let err = run_script(&mut c, input, &mut out).unwrap_err();
        assert!(matches!(err, AppError::ScriptRead { line: 2, .. }));
        assert!(err.to_string().starts_with("script line 2:"));
    }
}
