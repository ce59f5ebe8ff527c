use chrono::Utc;

use crate::io::kv::{ARCHIVE_KEY, KvStore, NEXT_ID_KEY, TASKS_KEY, load_json, save_json};
use crate::model::task::{PRIORITY_FLOOR, Task};
use crate::refine::Refined;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(u64),
    #[error("invalid priority {0} (expected 1-10)")]
    InvalidPriority(u8),
}

/// The task store: the active list, the archive, and the persistence port.
///
/// The active list is kept sorted ascending by priority with
/// unprioritized tasks last; ties keep their relative order. The archive
/// is most-recently-archived first. Every mutation ends with a
/// best-effort persist; a failed persist is logged and never rolls the
/// mutation back.
pub struct TaskStore {
    active: Vec<Task>,
    archive: Vec<Task>,
    next_id: u64,
    kv: Box<dyn KvStore>,
}

impl TaskStore {
    /// Load the store from the persistence port. Missing or unreadable
    /// values start empty rather than failing.
    pub fn load(kv: Box<dyn KvStore>) -> Self {
        let active: Vec<Task> = load_json(kv.as_ref(), TASKS_KEY).unwrap_or_default();
        let archive: Vec<Task> = load_json(kv.as_ref(), ARCHIVE_KEY).unwrap_or_default();
        let next_id = load_json::<u64>(kv.as_ref(), NEXT_ID_KEY).unwrap_or_else(|| {
            // Records written before the counter existed: resume past the
            // highest id ever issued.
            active
                .iter()
                .chain(archive.iter())
                .map(|t| t.id)
                .max()
                .map_or(1, |m| m + 1)
        });
        TaskStore {
            active,
            archive,
            next_id,
            kv,
        }
    }

    /// Active tasks in priority order.
    pub fn active(&self) -> &[Task] {
        &self.active
    }

    /// Archived tasks, most recently archived first.
    pub fn archive(&self) -> &[Task] {
        &self.archive
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add a new unrefined task. Returns `None` (and changes nothing) if
    /// the text trims to empty.
    pub fn add(&mut self, text: &str) -> Option<u64> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.active.push(Task::new(id, trimmed.to_string()));
        self.persist_active();
        self.persist_next_id();
        Some(id)
    }

    /// Set a task's priority and re-sort the active list.
    pub fn set_priority(&mut self, id: u64, priority: u8) -> Result<(), StoreError> {
        if !(1..=PRIORITY_FLOOR).contains(&priority) {
            return Err(StoreError::InvalidPriority(priority));
        }
        let task = self
            .active
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.priority = Some(priority);
        self.sort_active();
        self.persist_active();
        Ok(())
    }

    /// Move a task to the front of the archive, stamping its completion
    /// time. Returns false (no-op) if the id is not active.
    pub fn complete(&mut self, id: u64) -> bool {
        let Some(idx) = self.active.iter().position(|t| t.id == id) else {
            return false;
        };
        let mut task = self.active.remove(idx);
        task.completed_at = Some(Utc::now());
        self.archive.insert(0, task);
        self.persist_active();
        self.persist_archive();
        true
    }

    /// Permanently remove a task from the active list. Returns false
    /// (no-op) if the id is not active.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|t| t.id != id);
        if self.active.len() == before {
            return false;
        }
        self.persist_active();
        true
    }

    /// Reset every active task to its add-time text, clearing priority
    /// and refinement state. Idempotent; the archive is untouched.
    pub fn undo_all(&mut self) {
        for task in &mut self.active {
            task.text = task.original.clone();
            task.priority = None;
            task.ai_refined = false;
        }
        self.persist_active();
    }

    /// Empty the archive irreversibly.
    pub fn clear_archive(&mut self) {
        self.archive.clear();
        self.persist_archive();
    }

    /// Bulk-move the named active tasks to the front of the archive,
    /// preserving their priority and refinement state. Unknown ids are
    /// skipped; remaining active tasks keep their relative order.
    /// Returns the number of tasks moved.
    pub fn archive_checked(&mut self, ids: &[u64]) -> usize {
        let mut moved = Vec::new();
        self.active.retain(|t| {
            if ids.contains(&t.id) {
                moved.push(t.clone());
                false
            } else {
                true
            }
        });
        if moved.is_empty() {
            return 0;
        }
        let now = Utc::now();
        let count = moved.len();
        for (i, mut task) in moved.into_iter().enumerate() {
            task.completed_at = Some(now);
            self.archive.insert(i, task);
        }
        self.persist_active();
        self.persist_archive();
        count
    }

    /// Apply a refinement batch positionally onto the active list:
    /// new display text, clamped priority, refined flag. The add-time
    /// `original` is preserved so undo keeps working. Re-sorts.
    ///
    /// The caller guarantees `refined` is length-aligned with the active
    /// list (the refinement client validates this).
    pub fn apply_refinements(&mut self, refined: &[Refined]) {
        for (task, r) in self.active.iter_mut().zip(refined) {
            task.text = r.text.clone();
            task.priority = Some(r.priority.clamp(1, PRIORITY_FLOOR));
            task.ai_refined = true;
        }
        self.sort_active();
        self.persist_active();
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn sort_active(&mut self) {
        // sort_by_key is stable: equal priorities keep relative order
        self.active.sort_by_key(|t| t.sort_priority());
    }

    fn persist_active(&self) {
        save_json(self.kv.as_ref(), TASKS_KEY, &self.active);
    }

    fn persist_archive(&self) {
        save_json(self.kv.as_ref(), ARCHIVE_KEY, &self.archive);
    }

    fn persist_next_id(&self) {
        save_json(self.kv.as_ref(), NEXT_ID_KEY, &self.next_id);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
