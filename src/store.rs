// Task store with write-through persistence to a durable slot

use crate::codec;
use crate::error::{StoreError, StoreResult};
use crate::filter::Filter;
use crate::slot::Slot;
use crate::task::{Task, TaskId};
use tracing::{debug, info, warn};

/// Key under which the full task list is persisted
pub const DEFAULT_KEY: &str = "tasks";

/// Ordered task list mirrored to a durable slot
///
/// Every mutating operation re-encodes the whole list and writes it to the
/// slot before returning. There is no dirty state to flush, and a failed
/// write leaves the list as it was before the call.
pub struct TaskStore<S: Slot> {
    slot: S,
    key: String,
    tasks: Vec<Task>,
    filter: Filter,
    next_id: u64,
}

impl<S: Slot> TaskStore<S> {
    /// Load the task list from `slot` under the default key
    pub fn load(slot: S) -> StoreResult<Self> {
        Self::load_with_key(slot, DEFAULT_KEY)
    }

    /// Load the task list from `slot` under `key`
    ///
    /// A missing key or a value that does not decode as a task list yields an
    /// empty store. Only a failing backend is reported as an error.
    pub fn load_with_key(slot: S, key: impl Into<String>) -> StoreResult<Self> {
        let key = key.into();
        let raw = slot.get(&key).map_err(StoreError::Storage)?;

        let mut store = Self {
            slot,
            key,
            tasks: Vec::new(),
            filter: Filter::default(),
            next_id: 1,
        };

        let Some(raw) = raw else {
            debug!(key = %store.key, "No stored tasks, starting empty");
            return Ok(store);
        };

        match codec::decode(&raw) {
            Ok(stored) => {
                for entry in stored {
                    let id = store.allocate_id();
                    store.tasks.push(Task::new(id, entry.text, entry.completed));
                }
                info!(key = %store.key, count = store.tasks.len(), "Loaded tasks");
            }
            Err(e) => {
                warn!(key = %store.key, error = ?e, "Stored tasks are malformed, starting empty");
            }
        }

        Ok(store)
    }

    /// Write the full task list to the slot, replacing what was there
    pub fn save(&mut self) -> StoreResult<()> {
        let encoded = codec::encode(&self.tasks)?;
        self.slot.set(&self.key, &encoded).map_err(StoreError::Storage)?;
        debug!(key = %self.key, count = self.tasks.len(), "Saved tasks");
        Ok(())
    }

    /// Append a new open task and persist
    ///
    /// Surrounding whitespace is trimmed. Text that is empty after trimming is
    /// rejected with [`StoreError::EmptyText`] and nothing changes.
    pub fn add(&mut self, raw_text: &str) -> StoreResult<TaskId> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }

        let id = self.allocate_id();
        self.tasks.push(Task::new(id, text.to_string(), false));
        debug!(%id, "Added task");

        if let Err(e) = self.save() {
            self.tasks.pop();
            return Err(e);
        }
        Ok(id)
    }

    /// Flip the completed flag of `id` and persist, returning the new value
    pub fn toggle(&mut self, id: TaskId) -> StoreResult<bool> {
        let index = self.index_of(id)?;
        let completed = !self.tasks[index].completed();
        self.write_completed(index, completed)?;
        debug!(%id, completed, "Toggled task");
        Ok(completed)
    }

    /// Set the completed flag of `id` and persist
    pub fn set_completed(&mut self, id: TaskId, completed: bool) -> StoreResult<()> {
        let index = self.index_of(id)?;
        self.write_completed(index, completed)?;
        debug!(%id, completed, "Set task completion");
        Ok(())
    }

    /// Remove `id` from the list and persist, returning the removed task
    pub fn remove(&mut self, id: TaskId) -> StoreResult<Task> {
        let index = self.index_of(id)?;
        let task = self.tasks.remove(index);

        if let Err(e) = self.save() {
            self.tasks.insert(index, task);
            return Err(e);
        }
        debug!(%id, index, "Removed task");
        Ok(task)
    }

    /// Remove every completed task and persist, returning how many went
    pub fn clear_completed(&mut self) -> StoreResult<usize> {
        let previous = self.tasks.clone();
        self.tasks.retain(|t| !t.completed());
        let removed = previous.len() - self.tasks.len();

        if let Err(e) = self.save() {
            self.tasks = previous;
            return Err(e);
        }
        debug!(removed, "Cleared completed tasks");
        Ok(removed)
    }

    /// Tasks passing `filter`, paired with their position in the full list
    ///
    /// The iterator borrows the store and can be cloned to walk it again.
    pub fn view(&self, filter: Filter) -> impl Iterator<Item = (usize, &Task)> + Clone + '_ {
        self.tasks
            .iter()
            .enumerate()
            .filter(move |(_, task)| filter.matches(task))
    }

    /// [`view`](Self::view) with the current filter
    pub fn visible(&self) -> impl Iterator<Item = (usize, &Task)> + Clone + '_ {
        self.view(self.filter)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Change the current filter. Not persisted.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Total number of tasks, ignoring the filter
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Current position of `id` in the full list
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id() == id)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Give back the underlying slot
    pub fn into_slot(self) -> S {
        self.slot
    }

    fn index_of(&self, id: TaskId) -> StoreResult<usize> {
        self.position(id).ok_or(StoreError::UnknownTask(id))
    }

    // Failed writes restore the previous flag
    fn write_completed(&mut self, index: usize, completed: bool) -> StoreResult<()> {
        let previous = self.tasks[index].completed();
        self.tasks[index].set_completed(completed);

        if let Err(e) = self.save() {
            self.tasks[index].set_completed(previous);
            return Err(e);
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        id
    }
}
