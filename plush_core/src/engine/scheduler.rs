//! Fixed-period tick scheduler driven by caller-supplied timestamps

use crate::config::TimingConstants;

/// Gaps longer than this are not replayed tick by tick
const MAX_CATCH_UP_MS: u64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TickKind {
    /// Decrement every status counter
    Status,
    /// Apply damage over time
    Dot,
    /// Drop expired cooldowns
    CooldownRefresh,
}

/// A tick that fell due at `at` (epoch ms)
///
/// `count` is 1 for a regular tick. After a long gap the missed status
/// ticks are folded into a single entry carrying their total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTick {
    pub at: u64,
    pub kind: TickKind,
    pub count: u32,
}

#[derive(Debug, Clone)]
struct Timer {
    kind: TickKind,
    period_ms: u64,
    next_due: u64,
}

/// Tracks the next due time of each periodic tick
#[derive(Debug, Clone)]
pub struct Scheduler {
    timers: Vec<Timer>,
    last_now: Option<u64>,
}

impl Scheduler {
    pub fn new(timing: &TimingConstants) -> Self {
        let timer = |kind, period_ms: u64| Timer {
            kind,
            period_ms: period_ms.max(1),
            next_due: 0,
        };
        Scheduler {
            timers: vec![
                timer(TickKind::Status, timing.status_tick_ms),
                timer(TickKind::Dot, timing.dot_tick_ms),
                timer(TickKind::CooldownRefresh, timing.cooldown_refresh_ms),
            ],
            last_now: None,
        }
    }

    /// Collect every tick due up to `now`, in timestamp order
    ///
    /// The first call only anchors the timers. Time going backwards yields
    /// nothing. Gaps longer than a minute re-anchor instead of replaying:
    /// only the status decay for the gap is reported, as one folded tick.
    pub fn advance(&mut self, now: u64) -> Vec<DueTick> {
        let last = match self.last_now {
            None => {
                self.anchor(now);
                return Vec::new();
            }
            Some(last) => last,
        };
        if now <= last {
            return Vec::new();
        }
        self.last_now = Some(now);

        if now - last > MAX_CATCH_UP_MS {
            let missed = self.missed_status_ticks(now);
            tracing::debug!(gap_ms = now - last, missed, "scheduler gap too long, re-anchoring");
            self.anchor(now);
            if missed == 0 {
                return Vec::new();
            }
            return vec![DueTick {
                at: now,
                kind: TickKind::Status,
                count: missed,
            }];
        }

        let mut due = Vec::new();
        for timer in &mut self.timers {
            while timer.next_due <= now {
                due.push(DueTick {
                    at: timer.next_due,
                    kind: timer.kind,
                    count: 1,
                });
                timer.next_due += timer.period_ms;
            }
        }
        due.sort_by_key(|tick| (tick.at, tick.kind));
        due
    }

    /// Forget the clock; the next `advance` re-anchors
    pub fn reset(&mut self) {
        self.last_now = None;
    }

    /// Status ticks that would have fallen due up to `now`
    fn missed_status_ticks(&self, now: u64) -> u32 {
        let missed = self
            .timers
            .iter()
            .filter(|timer| timer.kind == TickKind::Status && timer.next_due <= now)
            .map(|timer| (now - timer.next_due) / timer.period_ms + 1)
            .sum::<u64>();
        u32::try_from(missed).unwrap_or(u32::MAX)
    }

    fn anchor(&mut self, now: u64) {
        self.last_now = Some(now);
        for timer in &mut self.timers {
            timer.next_due = now + timer.period_ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(ticks: &[DueTick], kind: TickKind) -> u32 {
        ticks.iter().filter(|t| t.kind == kind).map(|t| t.count).sum()
    }

    #[test]
    fn test_first_advance_only_anchors() {
        let mut scheduler = Scheduler::new(&TimingConstants::default());
        assert!(scheduler.advance(10_000).is_empty());
        assert!(scheduler.advance(10_100).is_empty());
    }

    #[test]
    fn test_tick_counts_over_three_seconds() {
        let mut scheduler = Scheduler::new(&TimingConstants::default());
        scheduler.advance(0);

        let ticks = scheduler.advance(3_000);
        assert_eq!(count(&ticks, TickKind::Status), 12);
        assert_eq!(count(&ticks, TickKind::Dot), 4);
        assert_eq!(count(&ticks, TickKind::CooldownRefresh), 12);
    }

    #[test]
    fn test_incremental_matches_bulk() {
        let mut bulk = Scheduler::new(&TimingConstants::default());
        bulk.advance(0);
        let bulk_ticks = bulk.advance(2_000);

        let mut stepped = Scheduler::new(&TimingConstants::default());
        stepped.advance(0);
        let mut stepped_ticks = Vec::new();
        for now in (16..=2_000).step_by(16) {
            stepped_ticks.extend(stepped.advance(now));
        }
        stepped_ticks.extend(stepped.advance(2_000));

        assert_eq!(bulk_ticks, stepped_ticks);
    }

    #[test]
    fn test_ticks_are_ordered() {
        let mut scheduler = Scheduler::new(&TimingConstants::default());
        scheduler.advance(0);
        let ticks = scheduler.advance(1_500);
        assert!(ticks.windows(2).all(|w| w[0].at <= w[1].at));
        assert_eq!(ticks[0].at, 250);
    }

    #[test]
    fn test_backwards_time_and_long_gap() {
        let mut scheduler = Scheduler::new(&TimingConstants::default());
        scheduler.advance(5_000);
        assert!(scheduler.advance(4_000).is_empty());

        let folded = scheduler.advance(5_000 + MAX_CATCH_UP_MS + 1);
        assert_eq!(folded.len(), 1);
        assert_eq!(folded[0].kind, TickKind::Status);
        assert_eq!(folded[0].count, 240);
        assert_eq!(scheduler.advance(5_000 + MAX_CATCH_UP_MS + 251).len(), 2);
    }

    #[test]
    fn test_long_gap_counts_status_ticks_from_phase() {
        let mut scheduler = Scheduler::new(&TimingConstants::default());
        scheduler.advance(0);
        assert_eq!(count(&scheduler.advance(100), TickKind::Status), 0);

        let folded = scheduler.advance(120_100);
        assert_eq!(count(&folded, TickKind::Status), 480);
        assert_eq!(count(&folded, TickKind::Dot), 0);
        assert_eq!(count(&folded, TickKind::CooldownRefresh), 0);
    }
}
