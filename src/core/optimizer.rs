use bon::Builder;

use crate::{
    core::{
        candidate,
        constraints::Constraints,
        schedule::Schedule,
        solution::Solution,
        trailing::TrailingContext,
        validator,
    },
    prelude::*,
    quantity::Cost,
};

#[derive(Builder)]
pub struct Optimizer<'a> {
    prices: &'a [Cost],
    constraints: Constraints,

    /// Minimal average saving per off slot.
    #[builder(default)]
    min_saving: Cost,

    /// Tail of the previous period.
    #[builder(default)]
    trailing: TrailingContext,
}

impl Optimizer<'_> {
    /// Greedily pick off-intervals, best saving first.
    ///
    /// Every candidate is tried on a copy of the committed schedule, checked end-to-end
    /// together with the trailing context, and committed only if the result is still feasible.
    /// Discarded candidates are never reconsidered.
    #[instrument(
        skip_all,
        fields(n_slots = self.prices.len(), n_trailing = self.trailing.len()),
    )]
    pub fn run(self) -> Solution {
        if self.prices.is_empty() || self.constraints.max_minutes_off == 0 {
            debug!("switching off is impossible");
            return Solution::all_on(self.prices.len());
        }

        let mut candidates = candidate::generate(self.prices, &self.constraints, self.min_saving);
        candidate::rank(&mut candidates);
        info!(n_candidates = candidates.len(), "generated candidates");

        let mut solution = Solution {
            schedule: Schedule::all_on(self.prices.len()),
            commits: Vec::new(),
            n_candidates: candidates.len(),
            n_rejected: 0,
        };
        for candidate in candidates {
            if !solution.schedule.is_free(candidate.range()) {
                continue;
            }
            let trial = solution.schedule.with_off(candidate.range());
            if self.is_feasible(&trial) {
                trace!(?candidate, "committed");
                solution.schedule = trial;
                solution.commits.push(candidate);
            } else {
                trace!(?candidate, "rejected");
                solution.n_rejected += 1;
            }
        }

        info!(
            n_commits = solution.commits.len(),
            n_rejected = solution.n_rejected,
            n_off_slots = solution.schedule.n_off_slots(),
            "optimized",
        );
        solution
    }

    fn is_feasible(&self, schedule: &Schedule) -> bool {
        validator::is_valid(self.trailing.iter().chain(schedule.iter_on()), &self.constraints)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;

    use super::*;

    fn prices(values: &[f64]) -> Vec<Cost> {
        values.iter().copied().map(Cost::from).collect()
    }

    fn constraints(max: usize, min: usize, percentage: f64, cap: Option<usize>) -> Constraints {
        Constraints::builder()
            .max_minutes_off(max)
            .min_minutes_off(min)
            .recovery_percentage(percentage)
            .maybe_recovery_max_minutes(cap)
            .build()
    }

    fn optimize(prices: &[Cost], constraints: Constraints) -> Solution {
        Optimizer::builder().prices(prices).constraints(constraints).build().run()
    }

    #[test]
    fn test_empty_prices() {
        let solution = optimize(&[], constraints(5, 1, 100.0, None));
        assert!(solution.on_off().is_empty());
    }

    #[test]
    fn test_zero_cap_keeps_everything_on() {
        let prices = prices(&[10.0, 1.0, 10.0, 1.0]);
        let solution = optimize(&prices, constraints(0, 1, 100.0, None));
        assert_eq!(solution.on_off(), vec![true; 4]);
        assert_eq!(solution.n_candidates, 0);
    }

    #[test]
    fn test_expensive_run_before_dip() {
        let prices = prices(&[10.0, 10.0, 1.0, 1.0, 10.0]);
        let solution = optimize(&prices, constraints(2, 2, 100.0, None));
        assert_eq!(solution.on_off(), vec![false, false, true, true, true]);
        assert_eq!(solution.commits.len(), 1);
        assert_abs_diff_eq!(solution.summary().total_saving.into_inner(), 18.0);
    }

    #[test]
    fn test_min_saving_filters_everything() {
        let prices = prices(&[10.0, 10.0, 1.0, 1.0, 10.0]);
        let solution = Optimizer::builder()
            .prices(&prices)
            .constraints(constraints(2, 2, 100.0, None))
            .min_saving(Cost::from(9.0))
            .build()
            .run();
        assert_eq!(solution.on_off(), vec![true; 5]);
    }

    #[test]
    fn test_recovery_blocks_overlapping_runs() {
        // Two peaks separated by a single cheap slot, one slot is not enough to recover from two:
        let prices = prices(&[9.0, 9.0, 1.0, 8.0, 8.0, 1.0, 1.0]);
        let solution = optimize(&prices, constraints(2, 2, 100.0, None));
        assert_eq!(solution.on_off(), vec![false, false, true, true, true, true, true]);
        assert!(solution.n_rejected >= 1);
    }

    #[test]
    fn test_partial_recovery_allows_both_peaks() {
        let prices = prices(&[9.0, 9.0, 1.0, 8.0, 8.0, 1.0, 1.0]);
        let solution = optimize(&prices, constraints(2, 2, 50.0, None));
        assert_eq!(solution.on_off(), vec![false, false, true, false, false, true, true]);
    }

    #[test]
    fn test_trailing_off_run_blocks_early_start() {
        let prices = prices(&[10.0, 10.0, 10.0, 1.0, 1.0, 1.0]);
        let constraints = constraints(3, 1, 100.0, None);

        let solution = optimize(&prices, constraints);
        assert_eq!(solution.on_off(), vec![false, false, false, true, true, true]);

        let solution = Optimizer::builder()
            .prices(&prices)
            .constraints(constraints)
            .trailing(TrailingContext::repeat(Some(false), 3))
            .build()
            .run();
        assert_eq!(solution.on_off(), vec![true; 6]);
        assert!(!validator::is_valid(
            TrailingContext::repeat(Some(false), 3).iter().chain([false, true, true, true]),
            &constraints,
        ));
    }

    #[test]
    fn test_trailing_on_run_changes_nothing() {
        let prices = prices(&[10.0, 10.0, 10.0, 1.0, 1.0, 1.0]);
        let solution = Optimizer::builder()
            .prices(&prices)
            .constraints(constraints(3, 1, 100.0, None))
            .trailing(TrailingContext::repeat(Some(true), 5))
            .build()
            .run();
        assert_eq!(solution.on_off(), vec![false, false, false, true, true, true]);
    }

    /// Exhaustively run the optimizer over small price grids and check the invariants.
    #[test]
    fn test_invariants_exhaustively() {
        let levels = [1.0, 5.0, 9.0];
        let constraint_sets = [
            constraints(1, 1, 100.0, None),
            constraints(2, 1, 50.0, None),
            constraints(3, 2, 100.0, Some(1)),
            constraints(4, 2, 0.0, None),
            constraints(5, 5, 100.0, None),
        ];
        let trailing_contexts = [
            TrailingContext::EMPTY,
            TrailingContext::repeat(Some(true), 2),
            TrailingContext::repeat(Some(false), 1),
            TrailingContext::repeat(Some(false), 3),
        ];

        for price_levels in (0..6).map(|_| levels).multi_cartesian_product() {
            let prices = prices(&price_levels);
            for constraints in constraint_sets {
                for trailing in &trailing_contexts {
                    for min_saving in [Cost::ZERO, Cost::from(2.0)] {
                        let solution = Optimizer::builder()
                            .prices(&prices)
                            .constraints(constraints)
                            .min_saving(min_saving)
                            .trailing(trailing.clone())
                            .build()
                            .run();
                        let on_off = solution.on_off();
                        assert_eq!(on_off.len(), prices.len());

                        // Never covers the final slot:
                        assert_eq!(on_off.last(), Some(&true));

                        // Commits are disjoint and make up the whole schedule:
                        let mut covered = vec![false; prices.len()];
                        for candidate in &solution.commits {
                            for index in candidate.range() {
                                assert!(!covered[index], "overlap at #{index}: {prices:?}");
                                covered[index] = true;
                            }
                        }
                        assert_eq!(
                            covered.iter().map(|is_off| !is_off).collect_vec(),
                            on_off,
                        );

                        // Either nothing is off, or the whole thing is feasible:
                        if on_off.contains(&false) {
                            assert!(
                                validator::is_valid(
                                    trailing.iter().chain(on_off.iter().copied()),
                                    &constraints,
                                ),
                                "infeasible schedule {on_off:?} for {prices:?} and {constraints:?}",
                            );
                        }
                    }
                }
            }
        }
    }
}
