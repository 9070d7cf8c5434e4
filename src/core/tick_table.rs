use serde::{Deserialize, Serialize};

use crate::core::types::TickType;

/// Major/medium/minor tick values plus the interval they were built for.
///
/// The interval keeps the caller's orientation: an inverted table has
/// `lower_bound > upper_bound` and descending tick sequences.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickTable {
    lower_bound: f64,
    upper_bound: f64,
    major: Vec<f64>,
    medium: Vec<f64>,
    minor: Vec<f64>,
}

impl TickTable {
    /// Creates a table without ticks.
    #[must_use]
    pub fn new(lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ticks(
        lower_bound: f64,
        upper_bound: f64,
        major: Vec<f64>,
        medium: Vec<f64>,
        minor: Vec<f64>,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            major,
            medium,
            minor,
        }
    }

    #[must_use]
    pub fn interval(&self) -> (f64, f64) {
        (self.lower_bound, self.upper_bound)
    }

    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    #[must_use]
    pub fn ticks(&self, tick_type: TickType) -> &[f64] {
        match tick_type {
            TickType::Major => &self.major,
            TickType::Medium => &self.medium,
            TickType::Minor => &self.minor,
        }
    }

    #[must_use]
    pub fn major(&self) -> &[f64] {
        &self.major
    }

    #[must_use]
    pub fn medium(&self) -> &[f64] {
        &self.medium
    }

    #[must_use]
    pub fn minor(&self) -> &[f64] {
        &self.minor
    }

    pub fn set_ticks(&mut self, tick_type: TickType, ticks: Vec<f64>) {
        match tick_type {
            TickType::Major => self.major = ticks,
            TickType::Medium => self.medium = ticks,
            TickType::Minor => self.minor = ticks,
        }
    }

    /// `true` when none of the three sequences holds a tick.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.major.is_empty() && self.medium.is_empty() && self.minor.is_empty()
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.major.len() + self.medium.len() + self.minor.len()
    }

    /// Whether `value` lies inside the interval, regardless of orientation.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        let min = self.lower_bound.min(self.upper_bound);
        let max = self.lower_bound.max(self.upper_bound);
        value >= min && value <= max
    }

    /// Swaps the bounds and reverses every tick sequence.
    pub fn invert(&mut self) {
        std::mem::swap(&mut self.lower_bound, &mut self.upper_bound);
        self.major.reverse();
        self.medium.reverse();
        self.minor.reverse();
    }

    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.invert();
        self
    }

    /// Drops ticks outside `[min(lower, upper), max(lower, upper)]` and resets
    /// the recorded interval to `(lower, upper)`.
    #[must_use]
    pub fn bounded(mut self, lower: f64, upper: f64) -> Self {
        let min = lower.min(upper);
        let max = lower.max(upper);
        for ticks in [&mut self.major, &mut self.medium, &mut self.minor] {
            ticks.retain(|tick| *tick >= min && *tick <= max);
        }
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    /// Sorts and de-duplicates each sequence and removes medium/minor ticks
    /// that coincide with a major tick.
    pub fn normalize(&mut self) {
        for ticks in [&mut self.major, &mut self.medium, &mut self.minor] {
            ticks.retain(|tick| tick.is_finite());
            ticks.sort_by(|left, right| left.total_cmp(right));
            ticks.dedup();
        }

        let major = &self.major;
        let is_major = |tick: &f64| major.binary_search_by(|m| m.total_cmp(tick)).is_ok();
        self.medium.retain(|tick| !is_major(tick));
        let medium = &self.medium;
        self.minor.retain(|tick| {
            !is_major(tick) && medium.binary_search_by(|m| m.total_cmp(tick)).is_err()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::TickTable;

    #[test]
    fn bounded_drops_outside_ticks_and_resets_interval() {
        let table = TickTable::with_ticks(
            0.0,
            10.0,
            vec![0.0, 5.0, 10.0],
            vec![2.5, 7.5],
            vec![1.0, 9.0],
        )
        .bounded(1.0, 8.0);

        assert_eq!(table.interval(), (1.0, 8.0));
        assert_eq!(table.major(), &[5.0]);
        assert_eq!(table.medium(), &[2.5, 7.5]);
        assert_eq!(table.minor(), &[1.0]);
    }

    #[test]
    fn normalize_removes_minor_ticks_that_collide_with_majors() {
        let mut table = TickTable::with_ticks(
            0.0,
            4.0,
            vec![0.0, 2.0, 4.0],
            vec![],
            vec![3.0, 1.0, 2.0, 1.0],
        );
        table.normalize();
        assert_eq!(table.minor(), &[1.0, 3.0]);
    }

    #[test]
    fn invert_reverses_sequences_and_bounds() {
        let table = TickTable::with_ticks(0.0, 2.0, vec![0.0, 1.0, 2.0], vec![], vec![0.5])
            .inverted();
        assert_eq!(table.interval(), (2.0, 0.0));
        assert_eq!(table.major(), &[2.0, 1.0, 0.0]);
        assert!(table.contains(1.5));
    }
}
