use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest priority value; unprioritized tasks compare as this when sorting.
pub const PRIORITY_FLOOR: u8 = 10;

/// A single to-do item.
///
/// Serialized with camelCase field names to stay compatible with the
/// historical on-disk JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable unique ID, assigned at creation, never reused.
    pub id: u64,
    /// Current display text (may have been rewritten by refinement).
    pub text: String,
    /// The text captured at add time; `undo` restores this.
    pub original: String,
    /// Priority 1 (most urgent) to 10 (least); `None` = unprioritized.
    #[serde(default)]
    pub priority: Option<u8>,
    /// True once any refinement (AI or local) has been applied.
    #[serde(default)]
    pub ai_refined: bool,
    /// Completion timestamp; present exactly when the task is archived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a fresh, unrefined task. `text` must already be trimmed.
    pub fn new(id: u64, text: String) -> Self {
        Task {
            id,
            original: text.clone(),
            text,
            priority: None,
            ai_refined: false,
            completed_at: None,
        }
    }

    /// Priority value used for ordering (`None` sorts last).
    pub fn sort_priority(&self) -> u8 {
        self.priority.unwrap_or(PRIORITY_FLOOR)
    }

    /// Whether the task has been moved to the archive.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_unrefined() {
        let task = Task::new(1, "Write the report".into());
        assert_eq!(task.text, "Write the report");
        assert_eq!(task.original, "Write the report");
        assert_eq!(task.priority, None);
        assert!(!task.ai_refined);
        assert!(!task.is_completed());
    }

    #[test]
    fn sort_priority_defaults_to_floor() {
        let mut task = Task::new(1, "x".into());
        assert_eq!(task.sort_priority(), PRIORITY_FLOOR);
        task.priority = Some(3);
        assert_eq!(task.sort_priority(), 3);
    }

    #[test]
    fn serde_uses_camel_case() {
        let task = Task::new(7, "Call the bank".into());
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"aiRefined\":false"));
        assert!(json.contains("\"priority\":null"));
        // completed_at is omitted while active
        assert!(!json.contains("completedAt"));
    }

    #[test]
    fn serde_tolerates_missing_optional_fields() {
        // Early on-disk records carried only text/original
        let task: Task =
            serde_json::from_str(r#"{"id":1,"text":"a","original":"a"}"#).unwrap();
        assert_eq!(task.priority, None);
        assert!(!task.ai_refined);
        assert!(task.completed_at.is_none());
    }
}
