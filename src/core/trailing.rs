/// Tail of the previous period, prepended when checking feasibility across the boundary.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct TrailingContext(Vec<bool>);

impl TrailingContext {
    pub const EMPTY: Self = Self(Vec::new());

    /// Repeat the value `count` times.
    ///
    /// Empty when the value is absent or the count is not positive.
    pub fn repeat(value: Option<bool>, count: i64) -> Self {
        match (value, usize::try_from(count)) {
            (Some(is_on), Ok(count)) => Self(vec![is_on; count]),
            _ => Self::EMPTY,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + Clone + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<bool>> for TrailingContext {
    fn from(slots: Vec<bool>) -> Self {
        Self(slots)
    }
}

impl AsRef<[bool]> for TrailingContext {
    fn as_ref(&self) -> &[bool] {
        &self.0
    }
}
