//! Feasibility check of an on/off sequence.
//!
//! The check is a single left-to-right scan, each slot moving a [`ScanState`] through
//! [`ScanState::step`].
//!
//! An off slot:
//!
//! - fails if switching off is forbidden, or the current run has already hit the cap;
//! - fails if the load has not yet recovered from the previous off run;
//! - otherwise grows the run, arms the cap and marks the minimum once reached,
//!   and recomputes the required recovery;
//! - on the very last slot, forgives both the minimum run length and the recovery.
//!
//! An on slot:
//!
//! - fails if the off run that has just ended is below the minimum;
//! - otherwise grows the on run, closes the off run, and re-checks the recovery.
//!   Once recovered, the cap is disarmed again.
//!
//! The sequence is feasible when every step succeeds and the final state
//! [accepts][ScanState::is_accepting].

use itertools::{Itertools, Position};

use crate::core::constraints::Constraints;

/// Progress of the current off run.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OffRun {
    /// The load is on, or nothing has happened yet.
    NoActiveRun,

    /// The load is off, but not for long enough yet.
    BelowMinimum,

    /// The load is off for at least the minimum run length.
    MetMinimum,
}

/// Why a sequence is infeasible.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ViolationKind {
    #[display("switching off is not allowed at all")]
    OffForbidden,

    #[display("off run exceeds the maximum length")]
    CapExceeded,

    #[display("recovery is incomplete: {elapsed} of {required} slots on")]
    RecoveryPending { elapsed: usize, required: usize },

    #[display("off run is too short: {length} of {minimum} slots")]
    RunTooShort { length: usize, minimum: usize },
}

/// First violation found in a sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
#[display("slot #{index}: {kind}")]
pub struct Violation {
    /// Index of the failing slot, or the sequence length if the final state is not accepting.
    pub index: usize,

    #[error(source)]
    pub kind: ViolationKind,
}

/// Everything the scan remembers between two slots.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[must_use]
pub struct ScanState {
    pub off_run_length: usize,
    pub on_run_length: usize,

    /// The current off run has hit the cap, any further off slot fails.
    pub is_cap_reached: bool,

    /// Enough on-time has elapsed since the last off run.
    pub is_recovery_satisfied: bool,

    pub off_run: OffRun,

    /// On-time needed after the latest off run.
    pub required_recovery: usize,
}

impl Default for ScanState {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl ScanState {
    pub const INITIAL: Self = Self {
        off_run_length: 0,
        on_run_length: 0,
        is_cap_reached: false,
        is_recovery_satisfied: true,
        off_run: OffRun::NoActiveRun,
        required_recovery: 0,
    };

    /// Advance the scan by one slot.
    pub fn step(
        self,
        is_on: bool,
        is_last: bool,
        constraints: &Constraints,
    ) -> Result<Self, ViolationKind> {
        if is_on { self.step_on(constraints) } else { self.step_off(is_last, constraints) }
    }

    fn step_off(mut self, is_last: bool, constraints: &Constraints) -> Result<Self, ViolationKind> {
        if constraints.max_minutes_off == 0 {
            return Err(ViolationKind::OffForbidden);
        }
        if self.is_cap_reached {
            return Err(ViolationKind::CapExceeded);
        }
        if !self.is_recovery_satisfied {
            return Err(ViolationKind::RecoveryPending {
                elapsed: self.on_run_length,
                required: self.required_recovery,
            });
        }

        if self.off_run == OffRun::NoActiveRun {
            self.off_run = OffRun::BelowMinimum;
        }
        self.off_run_length += 1;
        self.on_run_length = 0;
        if self.off_run_length >= constraints.max_minutes_off {
            self.is_cap_reached = true;
        }
        if self.off_run_length >= constraints.min_minutes_off {
            self.off_run = OffRun::MetMinimum;
        }
        self.required_recovery = constraints.required_recovery(self.off_run_length);

        if is_last {
            // Nothing is known beyond the horizon:
            self.is_recovery_satisfied = true;
            self.off_run = OffRun::MetMinimum;
        }
        Ok(self)
    }

    fn step_on(mut self, constraints: &Constraints) -> Result<Self, ViolationKind> {
        if self.off_run == OffRun::BelowMinimum {
            return Err(ViolationKind::RunTooShort {
                length: self.off_run_length,
                minimum: constraints.min_minutes_off,
            });
        }

        self.on_run_length += 1;
        self.off_run_length = 0;
        self.off_run = OffRun::NoActiveRun;
        self.is_recovery_satisfied = self.on_run_length >= self.required_recovery;
        if self.is_recovery_satisfied {
            self.is_cap_reached = false;
        }
        Ok(self)
    }

    #[must_use]
    pub fn is_accepting(&self) -> bool {
        self.is_recovery_satisfied && self.off_run != OffRun::BelowMinimum
    }

    /// Explain why the final state is not accepting.
    fn rejection(&self, constraints: &Constraints) -> Option<ViolationKind> {
        if self.off_run == OffRun::BelowMinimum {
            Some(ViolationKind::RunTooShort {
                length: self.off_run_length,
                minimum: constraints.min_minutes_off,
            })
        } else if !self.is_recovery_satisfied {
            Some(ViolationKind::RecoveryPending {
                elapsed: self.on_run_length,
                required: self.required_recovery,
            })
        } else {
            None
        }
    }
}

/// Scan the sequence and report the first violation, if any.
///
/// `true` means the load is on.
pub fn validate(
    sequence: impl IntoIterator<Item = bool>,
    constraints: &Constraints,
) -> Result<(), Violation> {
    let mut state = ScanState::INITIAL;
    let mut len = 0;
    for (index, (position, is_on)) in sequence.into_iter().with_position().enumerate() {
        let is_last = matches!(position, Position::Last | Position::Only);
        state = state.step(is_on, is_last, constraints).map_err(|kind| Violation { index, kind })?;
        len = index + 1;
    }
    match state.rejection(constraints) {
        Some(kind) => Err(Violation { index: len, kind }),
        None => Ok(()),
    }
}

/// Whether the sequence satisfies the constraints.
#[must_use]
pub fn is_valid(sequence: impl IntoIterator<Item = bool>, constraints: &Constraints) -> bool {
    validate(sequence, constraints).is_ok()
}
