//! Completed-work bookkeeping.

/// Counts completed work intervals ("tomatoes") and derives set progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCounter {
    tomatoes: u32,
    tomatoes_per_set: u32,
}

impl SessionCounter {
    /// Creates an empty counter. `tomatoes_per_set` must be at least 1.
    #[must_use]
    pub fn new(tomatoes_per_set: u32) -> Self {
        debug_assert!(tomatoes_per_set >= 1, "tomatoes_per_set must be >= 1");
        Self {
            tomatoes: 0,
            tomatoes_per_set,
        }
    }

    /// Records one completed work interval and returns the new total.
    pub fn increment(&mut self) -> u32 {
        self.tomatoes = self.tomatoes.saturating_add(1);
        self.tomatoes
    }

    pub fn reset(&mut self) {
        self.tomatoes = 0;
    }

    #[must_use]
    pub fn tomatoes(&self) -> u32 {
        self.tomatoes
    }

    #[must_use]
    pub fn tomatoes_per_set(&self) -> u32 {
        self.tomatoes_per_set
    }

    #[must_use]
    pub fn sets_completed(&self) -> u32 {
        self.tomatoes / self.tomatoes_per_set
    }

    #[must_use]
    pub fn position_in_set(&self) -> u32 {
        self.tomatoes % self.tomatoes_per_set
    }

    /// Tomatoes still to go before the current set is complete.
    #[must_use]
    pub fn remaining_in_set(&self) -> u32 {
        self.tomatoes_per_set - self.position_in_set()
    }

    /// True when the last completed tomato closed a set.
    #[must_use]
    pub fn at_set_boundary(&self) -> bool {
        self.tomatoes > 0 && self.position_in_set() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_counter_is_empty() {
        let counter = SessionCounter::new(4);
        assert_eq!(counter.tomatoes(), 0);
        assert_eq!(counter.sets_completed(), 0);
        assert_eq!(counter.position_in_set(), 0);
        assert_eq!(counter.remaining_in_set(), 4);
        assert!(!counter.at_set_boundary());
    }

    #[test]
    fn test_derived_values_after_increments() {
        let mut counter = SessionCounter::new(4);
        for _ in 0..9 {
            counter.increment();
        }
        assert_eq!(counter.tomatoes(), 9);
        assert_eq!(counter.sets_completed(), 2);
        assert_eq!(counter.position_in_set(), 1);
        assert_eq!(counter.remaining_in_set(), 3);
    }

    #[test]
    fn test_set_boundary_at_multiples() {
        let mut counter = SessionCounter::new(3);
        let boundaries: Vec<bool> = (0..6)
            .map(|_| {
                counter.increment();
                counter.at_set_boundary()
            })
            .collect();
        assert_eq!(boundaries, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn test_reset() {
        let mut counter = SessionCounter::new(2);
        counter.increment();
        counter.increment();
        counter.increment();
        counter.reset();
        assert_eq!(counter.tomatoes(), 0);
        assert_eq!(counter.sets_completed(), 0);
        assert_eq!(counter.tomatoes_per_set(), 2);
    }

    #[test]
    fn test_single_tomato_sets() {
        let mut counter = SessionCounter::new(1);
        assert_eq!(counter.increment(), 1);
        assert!(counter.at_set_boundary());
        assert_eq!(counter.sets_completed(), 1);
        assert_eq!(counter.remaining_in_set(), 1);
    }
}
