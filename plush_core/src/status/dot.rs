//! Damage over time from active statuses

use super::StatusRegistry;
use crate::config::DotConstants;
use crate::types::StatusKind;

/// Raw (pre-shield, pre-crit) damage for one DoT tick
pub fn dot_amount(statuses: &StatusRegistry, rates: &DotConstants) -> f64 {
    StatusKind::all()
        .iter()
        .filter(|&&kind| statuses.is_active(kind))
        .map(|&kind| rates.rate(kind))
        .sum()
}
