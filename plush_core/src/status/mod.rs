//! Status registry - timed effects decaying one tick at a time

pub mod dot;

pub use dot::dot_amount;

use crate::types::StatusKind;
use std::collections::{BTreeMap, BTreeSet};

/// Remaining-tick counters for every status, plus the permanent "seen" record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRegistry {
    counters: BTreeMap<StatusKind, u32>,
    seen: BTreeSet<StatusKind>,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack `ticks` onto the counter and mark the kind as seen
    ///
    /// Stacking is additive without a cap; the counter saturates at `u32::MAX`.
    pub fn apply(&mut self, kind: StatusKind, ticks: u32) {
        let counter = self.counters.entry(kind).or_insert(0);
        *counter = counter.saturating_add(ticks);
        self.seen.insert(kind);
    }

    /// Overwrite the counter (shield grants replace rather than stack)
    pub fn set(&mut self, kind: StatusKind, ticks: u32) {
        self.counters.insert(kind, ticks);
    }

    /// Decrement every counter by one, floored at zero
    pub fn tick(&mut self) -> Vec<StatusKind> {
        self.tick_by(1)
    }

    /// Decrement every counter by `ticks` at once, floored at zero
    pub fn tick_by(&mut self, ticks: u32) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        for (kind, counter) in self.counters.iter_mut() {
            if *counter > 0 {
                *counter = counter.saturating_sub(ticks);
                if *counter == 0 {
                    expired.push(*kind);
                }
            }
        }
        expired
    }

    pub fn is_active(&self, kind: StatusKind) -> bool {
        self.remaining(kind) > 0
    }

    pub fn remaining(&self, kind: StatusKind) -> u32 {
        self.counters.get(&kind).copied().unwrap_or(0)
    }

    /// Active statuses with their remaining ticks, in kind order
    pub fn active(&self) -> impl Iterator<Item = (StatusKind, u32)> + '_ {
        self.counters
            .iter()
            .filter(|(_, ticks)| **ticks > 0)
            .map(|(&kind, &ticks)| (kind, ticks))
    }

    /// Zero every counter; the seen record is untouched
    pub fn clear(&mut self) {
        self.counters.clear();
    }

    pub fn mark_seen(&mut self, kind: StatusKind) {
        self.seen.insert(kind);
    }

    pub fn has_seen(&self, kind: StatusKind) -> bool {
        self.seen.contains(&kind)
    }

    pub fn seen(&self) -> &BTreeSet<StatusKind> {
        &self.seen
    }

    pub fn counters(&self) -> &BTreeMap<StatusKind, u32> {
        &self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_stacks_additively() {
        let mut registry = StatusRegistry::new();
        registry.apply(StatusKind::Burn, 8);
        registry.apply(StatusKind::Burn, 8);
        assert_eq!(registry.remaining(StatusKind::Burn), 16);
        assert!(registry.has_seen(StatusKind::Burn));
    }

    #[test]
    fn test_apply_saturates() {
        let mut registry = StatusRegistry::new();
        registry.set(StatusKind::Wet, u32::MAX - 1);
        registry.apply(StatusKind::Wet, 8);
        assert_eq!(registry.remaining(StatusKind::Wet), u32::MAX);
    }

    #[test]
    fn test_tick_floors_at_zero() {
        let mut registry = StatusRegistry::new();
        registry.apply(StatusKind::Freeze, 2);

        assert!(registry.tick().is_empty());
        assert_eq!(registry.tick(), vec![StatusKind::Freeze]);
        assert!(registry.tick().is_empty());
        assert_eq!(registry.remaining(StatusKind::Freeze), 0);
        assert!(!registry.is_active(StatusKind::Freeze));
    }

    #[test]
    fn test_tick_by_folds_many_ticks() {
        let mut registry = StatusRegistry::new();
        registry.apply(StatusKind::Wind, 8);
        registry.apply(StatusKind::Burn, 500);

        assert_eq!(registry.tick_by(480), vec![StatusKind::Wind]);
        assert_eq!(registry.remaining(StatusKind::Wind), 0);
        assert_eq!(registry.remaining(StatusKind::Burn), 20);
        assert!(registry.tick_by(480).contains(&StatusKind::Burn));
        assert!(registry.tick_by(u32::MAX).is_empty());
    }

    #[test]
    fn test_clear_keeps_seen() {
        let mut registry = StatusRegistry::new();
        registry.apply(StatusKind::Paint, 8);
        registry.clear();
        assert!(!registry.is_active(StatusKind::Paint));
        assert!(registry.has_seen(StatusKind::Paint));
    }

    #[test]
    fn test_set_does_not_mark_seen() {
        let mut registry = StatusRegistry::new();
        registry.set(StatusKind::Shield, 8);
        registry.set(StatusKind::Shield, 3);
        assert_eq!(registry.remaining(StatusKind::Shield), 3);
        assert!(!registry.has_seen(StatusKind::Shield));
    }

    #[test]
    fn test_active_lists_only_positive() {
        let mut registry = StatusRegistry::new();
        registry.apply(StatusKind::Burn, 1);
        registry.apply(StatusKind::Wet, 4);
        registry.tick();
        let active: Vec<_> = registry.active().collect();
        assert_eq!(active, vec![(StatusKind::Wet, 3)]);
    }
}
