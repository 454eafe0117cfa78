use std::ops::Range;

use itertools::Itertools;

/// Working schedule: which slots are taken (switched off).
///
/// Trial changes are made on a copy via [`Schedule::with_off`], so that a rejected trial never
/// touches the committed value.
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use]
pub struct Schedule {
    is_off: Vec<bool>,
}

impl Schedule {
    /// Everything on.
    pub fn all_on(len: usize) -> Self {
        Self { is_off: vec![false; len] }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.is_off.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_off.is_empty()
    }

    /// None of the slots in the range is taken yet.
    #[must_use]
    pub fn is_free(&self, range: Range<usize>) -> bool {
        !self.is_off[range].contains(&true)
    }

    /// Copy of the schedule with the range additionally switched off.
    pub fn with_off(&self, range: Range<usize>) -> Self {
        let mut is_off = self.is_off.clone();
        is_off[range].fill(true);
        Self { is_off }
    }

    /// Iterate the slots, `true` meaning the load is on.
    pub fn iter_on(&self) -> impl ExactSizeIterator<Item = bool> + Clone + '_ {
        self.is_off.iter().map(|is_off| !is_off)
    }

    #[must_use]
    pub fn into_on_off(self) -> Vec<bool> {
        self.is_off.into_iter().map(|is_off| !is_off).collect()
    }

    #[must_use]
    pub fn n_off_slots(&self) -> usize {
        self.is_off.iter().filter(|is_off| **is_off).count()
    }

    /// Maximal runs of off slots.
    #[must_use]
    pub fn off_runs(&self) -> Vec<Range<usize>> {
        self.is_off
            .iter()
            .enumerate()
            .chunk_by(|(_, is_off)| **is_off)
            .into_iter()
            .filter_map(|(is_off, mut run)| {
                let (start, _) = run.next().filter(|_| is_off)?;
                let end = run.last().map_or(start, |(index, _)| index) + 1;
                Some(start..end)
            })
            .collect()
    }
}
