use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::goals::GoalEntry;
use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

// Tasks serialize in their on-disk (camelCase) shape, so the JSON output
// reuses the model types directly.

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub tasks: &'a [Task],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<&'a [Task]>,
}

#[derive(Serialize)]
pub struct AddJson<'a> {
    pub id: u64,
    pub text: &'a str,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub active: usize,
    pub archived: usize,
    pub unprioritized: usize,
    pub by_priority: BTreeMap<u8, usize>,
}

#[derive(Serialize)]
pub struct GoalsJson<'a> {
    pub recorded_today: bool,
    pub goals: &'a [GoalEntry],
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format an active task as a one-line summary.
/// `*` marks a task whose text has been refined.
pub fn format_task_line(task: &Task) -> String {
    let priority = task
        .priority
        .map(|p| format!("P{}", p))
        .unwrap_or_else(|| "--".to_string());
    let marker = if task.ai_refined { " *" } else { "" };
    format!("[{:>3}] {:>3}. {}{}", priority, task.id, task.text, marker)
}

/// Format an archived task: completion date, text, priority tag.
pub fn format_archive_line(task: &Task) -> String {
    let when = task
        .completed_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "          ".to_string());
    let tag = task
        .priority
        .map(|p| format!("  [P{}]", p))
        .unwrap_or_default();
    format!("{}  {:>3}. {}{}", when, task.id, task.text, tag)
}

/// Format detailed task view.
pub fn format_task_detail(task: &Task, archived: bool) -> Vec<String> {
    let mut lines = vec![format_task_line(task)];
    if task.text != task.original {
        lines.push(format!("original: {}", task.original));
    }
    lines.push(format!(
        "refined: {}",
        if task.ai_refined { "yes" } else { "no" }
    ));
    if archived {
        let when = task
            .completed_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        lines.push(format!("completed: {}", when));
    }
    lines
}

/// Format a recorded goal as a one-line summary.
pub fn format_goal_line(entry: &GoalEntry) -> String {
    format!("{}  {}", entry.at.format("%Y-%m-%d"), entry.text)
}

/// Count tasks per priority for the stats view.
pub fn priority_breakdown(tasks: &[Task]) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for task in tasks {
        if let Some(p) = task.priority {
            *counts.entry(p).or_insert(0) += 1;
        }
    }
    counts
}
