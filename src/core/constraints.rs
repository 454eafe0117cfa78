use bon::Builder;

use crate::prelude::*;

/// Operational limits of the controllable load.
///
/// All lengths are counted in slots.
#[derive(Copy, Clone, Debug, Builder)]
#[must_use]
pub struct Constraints {
    /// Hard cap on consecutive off slots, `0` forbids switching off at all.
    pub max_minutes_off: usize,

    /// Shorter off runs are not worth it, unless they reach the end of the sequence.
    #[builder(default = 1)]
    pub min_minutes_off: usize,

    /// Share of the preceding off run that must be spent on before switching off again.
    #[builder(default = 100.0)]
    pub recovery_percentage: f64,

    /// Upper bound on the recovery requirement, [`None`] means unbounded.
    pub recovery_max_minutes: Option<usize>,
}

impl Constraints {
    /// On-time needed after an off run of the given length.
    #[must_use]
    pub fn required_recovery(&self, off_run_length: usize) -> usize {
        #[expect(clippy::cast_precision_loss)]
        let scaled = (off_run_length as f64 * self.recovery_percentage / 100.0).round();
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let required = (scaled as usize).max(1);
        self.recovery_max_minutes.map_or(required, |cap| required.min(cap))
    }

    /// Reject configurations that would make the schedule meaningless.
    ///
    /// The validator and the optimizer accept any value and never call this on their own.
    pub fn validated(self) -> Result<Self> {
        ensure!(self.min_minutes_off >= 1, "minimum off-run length must be at least one slot");
        ensure!(
            self.max_minutes_off == 0 || self.min_minutes_off <= self.max_minutes_off,
            "minimum off-run length ({}) exceeds the maximum ({})",
            self.min_minutes_off,
            self.max_minutes_off,
        );
        ensure!(
            self.recovery_percentage.is_finite()
                && (0.0..=100.0).contains(&self.recovery_percentage),
            "recovery percentage must be within 0..=100, got {}",
            self.recovery_percentage,
        );
        Ok(self)
    }
}
