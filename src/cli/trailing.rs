use clap::Parser;

use crate::core::TrailingContext;

#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum TrailingState {
    /// The load was on at the end of the previous period.
    On,

    /// The load was off at the end of the previous period.
    Off,
}

impl From<TrailingState> for bool {
    fn from(state: TrailingState) -> Self {
        state == TrailingState::On
    }
}

/// State carried over from the previous period.
#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct TrailingArgs {
    /// Load state at the end of the previous period.
    #[clap(long, env = "TRAILING_STATE")]
    pub trailing_state: Option<TrailingState>,

    /// For how many slots the previous period ended in that state.
    #[clap(long, default_value = "0", env = "TRAILING_COUNT", allow_negative_numbers = true)]
    pub trailing_count: i64,
}

impl TrailingArgs {
    pub fn context(self) -> TrailingContext {
        TrailingContext::repeat(self.trailing_state.map(bool::from), self.trailing_count)
    }
}
