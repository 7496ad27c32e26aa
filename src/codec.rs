// Text encoding of the task list

use crate::task::{StoredTask, Task};

/// Encode the full list as a JSON array of `{text, completed}` objects
///
/// Ids are session scoped and never written.
pub fn encode(tasks: &[Task]) -> serde_json::Result<String> {
    let stored: Vec<_> = tasks.iter().map(Task::to_stored).collect();
    serde_json::to_string(&stored)
}

/// Decode a slot value back into stored tasks
///
/// Fails on anything that is not an array of objects carrying a string
/// `text` and a boolean `completed`. Extra fields are ignored.
pub fn decode(data: &str) -> serde_json::Result<Vec<StoredTask>> {
    serde_json::from_str(data)
}
