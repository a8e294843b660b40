use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A half-open amount range `[from, to)`. `to = None` is unbounded above.
///
/// Touching ranges such as `[100, 200)` and `[200, 300)` are adjacent, not
/// overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub from: Decimal,
    pub to: Option<Decimal>,
}

impl Bounds {
    pub fn new(from: Decimal, to: Option<Decimal>) -> Self {
        Self { from, to }
    }

    /// Whether `amount` falls inside `[from, to)`.
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.from && self.to.map_or(true, |to| amount < to)
    }

    /// Whether the two ranges share at least one amount.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        let below_other_end = other.to.map_or(true, |to| self.from < to);
        let above_other_start = self.to.map_or(true, |to| to > other.from);
        below_other_end && above_other_start
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to {
            Some(to) => write!(f, "[{}, {})", self.from, to),
            None => write!(f, "[{}, ∞)", self.from),
        }
    }
}
