//! Persistence - save record, stores and debounced writes

mod debounce;
mod file;
mod memory;
mod record;

pub use debounce::SaveDebouncer;
pub use file::FileSaveStore;
pub use memory::MemorySaveStore;
pub use record::{SaveRecord, SAVE_KEY};

use thiserror::Error;

/// Errors from reading or writing saves
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("malformed save: {0}")]
    Malformed(String),
}

/// Raw key-value storage for the serialized save
pub trait SaveStore {
    /// The stored save, or `None` when nothing has been written yet
    fn load(&self) -> Result<Option<String>, SaveError>;

    fn save(&mut self, data: &str) -> Result<(), SaveError>;

    /// Remove the save; deleting a missing save is not an error
    fn delete(&mut self) -> Result<(), SaveError>;
}
