#![forbid(unsafe_code)]

pub mod catalog;
pub mod file;
pub mod record;
pub mod repository;

pub use record::{PROGRESS_STORAGE_KEY, decode_progress, encode_progress};
pub use repository::{InMemoryStorage, ProgressStorage, Storage, StorageError};
