use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{ConstraintArgs, SavingArgs, SlotArgs, TrailingArgs},
    core::{Candidate, Optimizer, Solution, Summary},
    prelude::*,
    prices,
    quantity::Cost,
    tables::{build_commits_table, build_slots_table},
};

#[derive(Copy, Clone, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Table,

    /// Machine-readable JSON.
    Json,
}

#[derive(Parser)]
pub struct PlanArgs {
    /// Price file: TOML with a `prices` array, or a JSON array.
    #[clap(long = "prices", env = "PRICES_PATH")]
    pub prices_path: PathBuf,

    #[clap(flatten)]
    pub constraints: ConstraintArgs,

    #[clap(flatten)]
    pub saving: SavingArgs,

    #[clap(flatten)]
    pub trailing: TrailingArgs,

    #[clap(flatten)]
    pub slots: SlotArgs,

    /// Also print every slot.
    #[clap(long = "slots")]
    pub print_slots: bool,

    #[clap(long, default_value = "table", env = "OUTPUT_FORMAT")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    schedule: Vec<bool>,
    commits: &'a [Candidate],
    summary: Summary,
}

impl PlanArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let prices = prices::load(&self.prices_path)?;
        let solution = Optimizer::builder()
            .prices(&prices)
            .constraints(self.constraints.constraints()?)
            .min_saving(self.saving.min_saving()?)
            .trailing(self.trailing.context())
            .build()
            .run();
        let summary = solution.summary();
        info!(%summary.total_saving, summary.n_off_slots, summary.n_off_runs, "planned");

        match self.format {
            OutputFormat::Table => self.print_tables(&prices, &solution, summary),
            OutputFormat::Json => {
                let output =
                    PlanOutput { schedule: solution.on_off(), commits: &solution.commits, summary };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        Ok(())
    }

    fn print_tables(&self, prices: &[Cost], solution: &Solution, summary: Summary) {
        let clock = self.slots.clock();
        if self.print_slots {
            println!("{}", build_slots_table(prices, &solution.on_off(), clock));
        }
        println!("{}", build_commits_table(&solution.commits, prices, clock));
        println!("{summary}");
    }
}
