pub mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore, TaskRepository, TASKS_KEY};
