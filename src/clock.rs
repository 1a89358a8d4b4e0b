use crate::error::{EmergraphError, EmergraphResult};

/// Absolute host time in milliseconds.
///
/// The engine never reads a wall clock itself; the host supplies timestamps on
/// every tick, so any monotonic source (a real clock, a virtual simulation
/// clock) works.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimeMs(pub u64);

impl TimeMs {
    /// Saturating addition of a millisecond delta.
    pub fn add_ms(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier` (0 when `earlier` is later).
    pub fn since(self, earlier: TimeMs) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// A repeating deadline, re-armed after each fire.
///
/// Level-triggered on elapsed time: `fire` reports at most one firing per call
/// regardless of how many periods have passed, and re-anchors the next deadline
/// at the observed `now`. The first `fire` observation only anchors the cadence
/// (`now + period`) without firing, so the first event lands one full period
/// after the timeline starts.
#[derive(Clone, Copy, Debug)]
pub struct Cadence {
    period_ms: u64,
    next_due: Option<TimeMs>,
}

impl Cadence {
    /// Create a cadence with a non-zero period.
    pub fn new(period_ms: u64) -> EmergraphResult<Self> {
        if period_ms == 0 {
            return Err(EmergraphError::validation("Cadence period must be > 0"));
        }
        Ok(Self {
            period_ms,
            next_due: None,
        })
    }

    /// Check the deadline against `now`, re-arming when it fires.
    pub fn fire(&mut self, now: TimeMs) -> bool {
        match self.next_due {
            None => {
                self.next_due = Some(now.add_ms(self.period_ms));
                false
            }
            Some(due) if now >= due => {
                self.next_due = Some(now.add_ms(self.period_ms));
                true
            }
            Some(_) => false,
        }
    }

    /// Disarm; the next `fire` observation re-anchors from scratch.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }
}

/// A single pending deadline, consumed when it fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct OneShot {
    due: Option<TimeMs>,
}

impl OneShot {
    /// Arm (or re-arm) at an absolute due time.
    pub fn arm(&mut self, due: TimeMs) {
        self.due = Some(due);
    }

    /// Check against `now`; a firing disarms the deadline.
    pub fn fire(&mut self, now: TimeMs) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }
}
