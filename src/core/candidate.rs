use std::{cmp::Reverse, ops::Range};

use serde::Serialize;

use crate::{core::constraints::Constraints, quantity::Cost};

/// Proposed contiguous off-interval `[start, start + length)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[must_use]
pub struct Candidate {
    pub start: usize,
    pub length: usize,

    /// Price difference against switching back on, summed over the interval.
    pub saving: Cost,
}

impl Candidate {
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..(self.start + self.length)
    }

    /// The slot in which the load is switched back on.
    #[must_use]
    pub const fn turn_on_slot(&self) -> usize {
        self.start + self.length
    }
}

/// Enumerate all off-intervals worth at least `min_saving` per slot.
///
/// An interval never covers the final slot, so that there is always a price to switch back on at.
pub fn generate(prices: &[Cost], constraints: &Constraints, min_saving: Cost) -> Vec<Candidate> {
    let Some(last) = prices.len().checked_sub(1) else {
        return Vec::new();
    };
    let effective_max_off = constraints.max_minutes_off.min(last);

    // `prefix_sums[i]` is the total of `prices[..i]`:
    let prefix_sums: Vec<Cost> = std::iter::once(Cost::ZERO)
        .chain(prices.iter().scan(Cost::ZERO, |total, price| {
            *total += *price;
            Some(*total)
        }))
        .collect();

    let mut candidates = Vec::new();
    for start in 0..last {
        for length in constraints.min_minutes_off..=effective_max_off {
            let turn_on_slot = start + length;
            if turn_on_slot > last {
                break;
            }
            let turn_on_price = prices[turn_on_slot];
            #[expect(clippy::cast_precision_loss)]
            let length_f64 = length as f64;
            let saving =
                prefix_sums[turn_on_slot] - prefix_sums[start] - turn_on_price * length_f64;
            if saving > min_saving * length_f64 && prices[start] > turn_on_price + min_saving {
                candidates.push(Candidate { start, length, saving });
            }
        }
    }
    candidates
}

/// Best saving first, shorter intervals first among equal savings.
///
/// The sort is stable, so remaining ties keep the generation order.
pub fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by_key(|candidate| (Reverse(candidate.saving), candidate.length));
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;

    use super::*;

    fn prices(values: &[f64]) -> Vec<Cost> {
        values.iter().copied().map(Cost::from).collect()
    }

    fn constraints(max: usize, min: usize) -> Constraints {
        Constraints::builder().max_minutes_off(max).min_minutes_off(min).build()
    }

    #[test]
    fn test_generate_expensive_run_before_dip() {
        let candidates =
            generate(&prices(&[10.0, 10.0, 1.0, 1.0, 10.0]), &constraints(2, 2), Cost::ZERO);
        assert_eq!(candidates.iter().map(Candidate::range).collect_vec(), vec![0..2, 1..3]);
        assert_eq!(candidates[0].turn_on_slot(), 2);
        assert_abs_diff_eq!(candidates[0].saving.into_inner(), 18.0);
        assert_abs_diff_eq!(candidates[1].saving.into_inner(), 9.0);
    }

    #[test]
    fn test_generate_never_covers_last_slot() {
        let candidates =
            generate(&prices(&[9.0, 8.0, 7.0, 6.0, 5.0]), &constraints(10, 1), Cost::ZERO);
        assert!(!candidates.is_empty());
        assert!(candidates.iter().all(|candidate| candidate.turn_on_slot() <= 4));
        assert!(candidates.iter().any(|candidate| candidate.range() == (0..4)));
    }

    #[test]
    fn test_generate_respects_min_saving() {
        // Saving per slot is exactly 1, which must not pass a bar of 1:
        let candidates =
            generate(&prices(&[3.0, 3.0, 2.0]), &constraints(2, 1), Cost::from(1.0));
        assert!(candidates.is_empty());

        let candidates =
            generate(&prices(&[3.0, 3.0, 2.0]), &constraints(2, 1), Cost::from(0.5));
        assert_eq!(
            candidates.iter().map(Candidate::range).collect_vec(),
            vec![0..2, 1..2],
        );
    }

    #[test]
    fn test_generate_requires_first_slot_to_clear_the_bar() {
        // Saves 8 in total, but the first slot alone saves nothing:
        let candidates =
            generate(&prices(&[2.0, 10.0, 2.0]), &constraints(2, 2), Cost::ZERO);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_generate_degenerate() {
        assert!(generate(&[], &constraints(5, 1), Cost::ZERO).is_empty());
        assert!(generate(&prices(&[5.0]), &constraints(5, 1), Cost::ZERO).is_empty());
        assert!(generate(&prices(&[5.0, 1.0, 0.0]), &constraints(1, 2), Cost::ZERO).is_empty());
    }

    #[test]
    fn test_rank() {
        let mut candidates = vec![
            Candidate { start: 0, length: 3, saving: Cost::from(5) },
            Candidate { start: 1, length: 2, saving: Cost::from(7) },
            Candidate { start: 2, length: 1, saving: Cost::from(5) },
            Candidate { start: 3, length: 1, saving: Cost::from(5) },
        ];
        rank(&mut candidates);
        assert_eq!(
            candidates.iter().map(|candidate| candidate.start).collect_vec(),
            vec![1, 2, 3, 0],
        );
    }
}
