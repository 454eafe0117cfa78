use chrono::{DateTime, Local, TimeDelta};
use clap::Parser;

use crate::core::interval::SlotClock;

/// Wall-clock labelling of the slots, purely cosmetic.
#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct SlotArgs {
    /// Start time of the first slot, for example: `2025-03-01T00:00:00+01:00`.
    #[clap(long, env = "START_TIME")]
    pub start_time: Option<DateTime<Local>>,

    /// Slot duration in minutes.
    #[clap(long, default_value = "1", env = "SLOT_MINUTES")]
    pub slot_minutes: u32,
}

impl SlotArgs {
    pub fn clock(self) -> Option<SlotClock> {
        self.start_time.map(|origin| SlotClock {
            origin,
            slot_duration: TimeDelta::minutes(i64::from(self.slot_minutes)),
        })
    }
}
