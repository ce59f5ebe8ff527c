use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::io::kv::{FEEDBACK_KEY, GOALS_KEY, KvStore, LAST_GOAL_DATE_KEY, load_json, save_json};

/// One recorded daily goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalEntry {
    pub at: DateTime<Utc>,
    pub text: String,
}

/// Today's date as stored in the last-goal-date key.
fn today_str() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Record a daily goal (newest first) and stamp today as the last goal
/// date. Returns false (no-op) on whitespace-only input.
pub fn record_goal(kv: &dyn KvStore, text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    let mut log = goals(kv);
    log.insert(
        0,
        GoalEntry {
            at: Utc::now(),
            text: trimmed.to_string(),
        },
    );
    save_json(kv, GOALS_KEY, &log);
    save_json(kv, LAST_GOAL_DATE_KEY, &today_str());
    true
}

/// The recorded goal log, newest first.
pub fn goals(kv: &dyn KvStore) -> Vec<GoalEntry> {
    load_json(kv, GOALS_KEY).unwrap_or_default()
}

/// Whether a goal has already been recorded today.
pub fn goal_recorded_today(kv: &dyn KvStore) -> bool {
    load_json::<String>(kv, LAST_GOAL_DATE_KEY).is_some_and(|d| d == today_str())
}

/// Save the free-text feedback note, replacing any previous one.
pub fn save_feedback(kv: &dyn KvStore, text: &str) {
    save_json(kv, FEEDBACK_KEY, &text);
}

/// The saved feedback note, if any.
pub fn feedback(kv: &dyn KvStore) -> Option<String> {
    load_json(kv, FEEDBACK_KEY)
}
