#![forbid(unsafe_code)]

pub mod codec;
pub mod repository;
pub mod sqlite;

pub use repository::{InMemoryRepository, SettingsRepository, StatsRepository, Storage, StorageError};
