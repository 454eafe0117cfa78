use std::fmt::{Display, Formatter};

use comfy_table::{Attribute, Cell, Color, Table, modifiers, presets};
use serde::Serialize;

use crate::{
    core::{candidate::Candidate, schedule::Schedule},
    quantity::Cost,
};

/// Outcome of a single optimizer run.
#[must_use]
pub struct Solution {
    pub schedule: Schedule,

    /// Committed candidates in the order they were committed.
    pub commits: Vec<Candidate>,

    /// Number of generated candidates.
    pub n_candidates: usize,

    /// Number of candidates discarded by the feasibility check.
    pub n_rejected: usize,
}

impl Solution {
    /// Nothing is switched off.
    pub fn all_on(len: usize) -> Self {
        Self {
            schedule: Schedule::all_on(len),
            commits: Vec::new(),
            n_candidates: 0,
            n_rejected: 0,
        }
    }

    /// Final sequence, `true` meaning the load is on.
    #[must_use]
    pub fn on_off(&self) -> Vec<bool> {
        self.schedule.iter_on().collect()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_saving: self.commits.iter().map(|candidate| candidate.saving).sum(),
            n_slots: self.schedule.len(),
            n_off_slots: self.schedule.n_off_slots(),
            n_off_runs: self.schedule.off_runs().len(),
            n_candidates: self.n_candidates,
            n_commits: self.commits.len(),
            n_rejected: self.n_rejected,
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize)]
#[must_use]
pub struct Summary {
    /// Sum of the committed candidates' savings.
    pub total_saving: Cost,

    pub n_slots: usize,
    pub n_off_slots: usize,

    /// Adjacent commits merge into a single run.
    pub n_off_runs: usize,

    pub n_candidates: usize,
    pub n_commits: usize,
    pub n_rejected: usize,
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
            .enforce_styling()
            .set_header(vec![
                Cell::from("Saving"),
                Cell::from("Off"),
                Cell::from("Runs"),
                Cell::from("Candidates"),
                Cell::from("Committed"),
                Cell::from("Rejected"),
            ])
            .add_row(vec![
                Cell::from(self.total_saving).add_attribute(Attribute::Bold).fg(
                    if self.total_saving > Cost::ZERO { Color::Green } else { Color::Reset },
                ),
                Cell::from(format!("{}/{}", self.n_off_slots, self.n_slots)),
                Cell::from(self.n_off_runs),
                Cell::from(self.n_candidates).add_attribute(Attribute::Dim),
                Cell::from(self.n_commits),
                Cell::from(self.n_rejected).fg(Color::DarkYellow),
            ]);
        write!(f, "{table}")
    }
}
