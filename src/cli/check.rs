use clap::Parser;

use crate::{
    cli::{ConstraintArgs, TrailingArgs},
    core::validate,
    prelude::*,
};

#[derive(Parser)]
pub struct CheckArgs {
    /// On/off sequence: `1` or `+` is on, `0` or `-` is off, whitespace is ignored.
    #[clap(allow_hyphen_values = true)]
    pub sequence: String,

    #[clap(flatten)]
    pub constraints: ConstraintArgs,

    #[clap(flatten)]
    pub trailing: TrailingArgs,
}

impl CheckArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let sequence = parse_sequence(&self.sequence)?;
        let constraints = self.constraints.constraints()?;
        let trailing = self.trailing.context();
        info!(n_slots = sequence.len(), n_trailing = trailing.len(), "checking…");

        match validate(trailing.iter().chain(sequence.iter().copied()), &constraints) {
            Ok(()) => {
                println!("valid");
                Ok(())
            }
            Err(violation) if violation.index < trailing.len() => {
                Err(violation).context("the trailing context alone is infeasible")
            }
            Err(violation) => {
                let index = violation.index - trailing.len();
                bail!("invalid at slot #{index}: {}", violation.kind)
            }
        }
    }
}

/// Parse the human-readable sequence, `true` meaning on.
pub fn parse_sequence(sequence: &str) -> Result<Vec<bool>> {
    sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(index, c)| match c {
            '1' | '+' => Ok(true),
            '0' | '-' => Ok(false),
            _ => bail!("unexpected character `{c}` at #{index}"),
        })
        .collect()
}
