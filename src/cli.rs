mod check;
mod constraints;
mod plan;
mod slots;
mod trailing;

use clap::{Parser, Subcommand};

pub use self::{
    check::CheckArgs,
    constraints::{ConstraintArgs, SavingArgs},
    plan::{OutputFormat, PlanArgs},
    slots::SlotArgs,
    trailing::{TrailingArgs, TrailingState},
};
use crate::prelude::*;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn run(self) -> Result {
        match self.command {
            Command::Plan(args) => args.run(),
            Command::Check(args) => args.run(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: load the prices and decide which slots to switch the load off in.
    #[clap(name = "plan")]
    Plan(Box<PlanArgs>),

    /// Check whether an on/off sequence satisfies the constraints.
    #[clap(name = "check")]
    Check(Box<CheckArgs>),
}
