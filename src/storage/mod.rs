pub mod backup;
mod file_storage;
mod memory;
mod models;
mod repository;
pub mod seed;

pub use file_storage::{FileStorage, Result, StorageError};
pub use memory::MemoryStorage;
pub use models::*;
pub use repository::{Repository, MAX_SESSIONS};
