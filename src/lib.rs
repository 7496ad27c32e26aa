// TodoStore - To-do list with write-through key-value persistence

pub mod codec;
pub mod config;
pub mod error;
pub mod filter;
pub mod slot;
pub mod store;
pub mod task;

// Re-export main types for convenience
pub use config::Config;
pub use error::{EMPTY_TEXT_WARNING, StoreError, StoreResult};
pub use filter::Filter;
pub use slot::{MemorySlot, Slot, SqliteSlot};
pub use store::{DEFAULT_KEY, TaskStore};
pub use task::{StoredTask, Task, TaskId};
