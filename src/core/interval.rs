use std::fmt::{Debug, Formatter};

use chrono::{DateTime, Local, TimeDelta};

/// Wall-clock span of a single slot.
#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct Interval {
    /// Inclusive.
    pub start: DateTime<Local>,

    /// Exclusive.
    pub end: DateTime<Local>,
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Interval {
    pub const fn new(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, other: DateTime<Local>) -> bool {
        (self.start <= other) && (other < self.end)
    }
}

/// Maps slot indices onto wall-clock intervals.
#[derive(Copy, Clone, Debug)]
#[must_use]
pub struct SlotClock {
    pub origin: DateTime<Local>,
    pub slot_duration: TimeDelta,
}

impl SlotClock {
    pub fn interval(self, index: usize) -> Interval {
        let start = self.origin + self.slot_duration * i32::try_from(index).unwrap_or(i32::MAX);
        Interval::new(start, start + self.slot_duration)
    }

    /// Span covering the half-open slot range.
    pub fn span(self, start: usize, end: usize) -> Interval {
        Interval::new(self.interval(start).start, self.interval(end).start)
    }
}
