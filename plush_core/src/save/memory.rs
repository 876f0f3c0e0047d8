//! In-memory save store for tests and throwaway sessions

use super::{SaveError, SaveStore};

#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    data: Option<String>,
    /// Number of successful writes
    writes: usize,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing save
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            writes: 0,
        }
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SaveStore for MemorySaveStore {
    fn load(&self) -> Result<Option<String>, SaveError> {
        Ok(self.data.clone())
    }

    fn save(&mut self, data: &str) -> Result<(), SaveError> {
        self.data = Some(data.to_string());
        self.writes += 1;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), SaveError> {
        self.data = None;
        Ok(())
    }
}
