use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    core::{Candidate, interval::SlotClock},
    quantity::Cost,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

/// Committed off-intervals in chronological order.
pub fn build_commits_table(
    commits: &[Candidate],
    prices: &[Cost],
    clock: Option<SlotClock>,
) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Start", "End", "Slots", "Turn-on", "Saving"]);
    for candidate in commits.iter().sorted_by_key(|candidate| candidate.start) {
        let (start, end) = match clock {
            Some(clock) => {
                let span = clock.span(candidate.start, candidate.turn_on_slot());
                (span.start.format("%b %d %H:%M").to_string(), span.end.format("%H:%M").to_string())
            }
            None => (format!("#{}", candidate.start), format!("#{}", candidate.turn_on_slot())),
        };
        table.add_row(vec![
            Cell::new(start),
            Cell::new(end).add_attribute(Attribute::Dim),
            Cell::new(candidate.length).set_alignment(CellAlignment::Right),
            Cell::new(prices[candidate.turn_on_slot()]).set_alignment(CellAlignment::Right),
            Cell::new(candidate.saving).set_alignment(CellAlignment::Right).fg(Color::Green),
        ]);
    }
    table
}

/// Every slot with its price and the decision.
pub fn build_slots_table(prices: &[Cost], on_off: &[bool], clock: Option<SlotClock>) -> Table {
    let mean_price = if prices.is_empty() {
        Cost::ZERO
    } else {
        #[expect(clippy::cast_precision_loss)]
        let len = prices.len() as f64;
        prices.iter().copied().sum::<Cost>() / len
    };

    let mut table = new_table();
    table.set_header(vec!["Slot", "Time", "Price", "State"]);
    for (index, (price, is_on)) in prices.iter().zip(on_off).enumerate() {
        let time = clock.map_or_else(String::new, |clock| {
            clock.interval(index).start.format("%H:%M").to_string()
        });
        table.add_row(vec![
            Cell::new(index).add_attribute(Attribute::Dim),
            Cell::new(time),
            Cell::new(price).set_alignment(CellAlignment::Right).fg(if *price > mean_price {
                Color::Red
            } else {
                Color::Green
            }),
            if *is_on { Cell::new("on") } else { Cell::new("off").fg(Color::Blue) },
        ]);
    }
    table
}
