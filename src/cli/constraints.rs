//! Load constraint CLI arguments.

use clap::Parser;

use crate::{core::Constraints, prelude::*, quantity::Cost};

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct ConstraintArgs {
    /// Maximum number of consecutive off slots, `0` keeps the load always on.
    #[clap(long, env = "MAX_MINUTES_OFF")]
    pub max_minutes_off: usize,

    /// Minimum number of consecutive off slots worth switching off for.
    #[clap(long, default_value = "1", env = "MIN_MINUTES_OFF")]
    pub min_minutes_off: usize,

    /// Percentage of an off run to be spent on before switching off again.
    #[clap(long, default_value = "100", env = "RECOVERY_PERCENTAGE")]
    pub recovery_percentage: f64,

    /// Upper bound on the recovery, in slots.
    #[clap(long, env = "RECOVERY_MAX_MINUTES")]
    pub recovery_max_minutes: Option<usize>,
}

impl ConstraintArgs {
    pub fn constraints(self) -> Result<Constraints> {
        Constraints::builder()
            .max_minutes_off(self.max_minutes_off)
            .min_minutes_off(self.min_minutes_off)
            .recovery_percentage(self.recovery_percentage)
            .maybe_recovery_max_minutes(self.recovery_max_minutes)
            .build()
            .validated()
            .context("invalid constraints")
    }
}

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct SavingArgs {
    /// Minimal average saving per off slot for an interval to be considered.
    #[clap(long, default_value = "0", env = "MIN_SAVING")]
    pub min_saving: Cost,
}

impl SavingArgs {
    pub fn min_saving(self) -> Result<Cost> {
        ensure!(self.min_saving.is_finite(), "minimal saving must be finite");
        Ok(self.min_saving)
    }
}
