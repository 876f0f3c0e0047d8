//! Debounced save trigger

/// Coalesces bursts of mutations into one write
///
/// Each `mark_dirty` pushes the deadline back; the write becomes due once
/// `delay_ms` has passed without a further mutation.
#[derive(Debug, Clone)]
pub struct SaveDebouncer {
    delay_ms: u64,
    last_change: Option<u64>,
}

impl SaveDebouncer {
    pub fn new(delay_ms: u64) -> Self {
        SaveDebouncer {
            delay_ms,
            last_change: None,
        }
    }

    pub fn mark_dirty(&mut self, now: u64) {
        self.last_change = Some(now);
    }

    pub fn is_dirty(&self) -> bool {
        self.last_change.is_some()
    }

    /// True once when a pending write is due; clears the dirty flag
    pub fn take_due(&mut self, now: u64) -> bool {
        match self.last_change {
            Some(changed) if now.saturating_sub(changed) >= self.delay_ms => {
                self.last_change = None;
                true
            }
            _ => false,
        }
    }

    /// Clear the dirty flag regardless of the deadline
    pub fn take_pending(&mut self) -> bool {
        self.last_change.take().is_some()
    }
}
