// Task record and its stable identifier

use serde::{Deserialize, Serialize};

/// Stable identifier for a task within one store session
///
/// Ids are handed out in increasing order by the owning store and are never
/// reused, so an id captured before a removal keeps pointing at the same task
/// (or at nothing) instead of silently sliding onto its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One to-do entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    text: String,
    completed: bool,
}

impl Task {
    pub(crate) fn new(id: TaskId, text: String, completed: bool) -> Self {
        Self { id, text, completed }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Display text, already trimmed
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub(crate) fn to_stored(&self) -> StoredTaskRef<'_> {
        StoredTaskRef {
            text: &self.text,
            completed: self.completed,
        }
    }
}

/// Persisted shape of a task, as read back from the slot
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredTask {
    pub text: String,
    pub completed: bool,
}

/// Borrowed persisted shape, used when writing
#[derive(Debug, Serialize)]
pub(crate) struct StoredTaskRef<'a> {
    pub text: &'a str,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_accessors() {
        let task = Task::new(TaskId::new(7), "Beli susu".to_string(), false);

        assert_eq!(task.id(), TaskId::new(7));
        assert_eq!(task.text(), "Beli susu");
        assert!(!task.completed());
    }

    #[test]
    fn test_task_id_display() {
        assert_eq!(TaskId::new(3).to_string(), "#3");
    }

    #[test]
    fn test_stored_shape_omits_id() {
        let task = Task::new(TaskId::new(1), "Cuci piring".to_string(), true);
        let json = serde_json::to_string(&task.to_stored()).unwrap();
        assert_eq!(json, r#"{"text":"Cuci piring","completed":true}"#);
    }
}
