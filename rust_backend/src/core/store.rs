//! Owned storage for the population of day profiles under analysis.

use ndarray::{Array2, ArrayView1, ArrayView2};

use super::domain::{DayProfile, MINUTES_PER_DAY};

/// Ordered collection of day profiles, stored as one minute-major matrix.
///
/// The store owns a single `(1440, day_count)` buffer: row `m` is a minute of
/// day, column `d` is a day in creation order (the simulated base profile, if
/// any, comes first). A load or simulate action replaces the contents
/// wholesale; the analyzer only borrows a read-only view, so there is no
/// aliasing between the store and any snapshot handed out.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    data: Array2<f64>,
}

impl ProfileStore {
    /// Creates an empty store (pre-data state).
    pub fn new() -> Self {
        Self {
            data: Array2::zeros((MINUTES_PER_DAY, 0)),
        }
    }

    /// Replaces the whole population with `profiles`, keeping their order.
    pub fn replace(&mut self, profiles: &[DayProfile]) {
        let mut data = Array2::zeros((MINUTES_PER_DAY, profiles.len()));
        for (day, profile) in profiles.iter().enumerate() {
            for (minute, &value) in profile.values().iter().enumerate() {
                data[[minute, day]] = value;
            }
        }
        self.data = data;
    }

    /// Drops all stored profiles (reset action).
    pub fn clear(&mut self) {
        self.data = Array2::zeros((MINUTES_PER_DAY, 0));
    }

    pub fn day_count(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.data.ncols() == 0
    }

    /// Read-only minute × day sample matrix.
    pub fn matrix(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// One day's 1440-point curve.
    ///
    /// # Panics
    ///
    /// Panics if `day` is out of bounds.
    pub fn day(&self, day: usize) -> ArrayView1<'_, f64> {
        self.data.column(day)
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with(minute: usize, value: f64) -> DayProfile {
        let mut values = vec![0.0; MINUTES_PER_DAY];
        values[minute] = value;
        DayProfile::from_values(values).unwrap()
    }

    #[test]
    fn starts_empty() {
        let store = ProfileStore::new();
        assert!(store.is_empty());
        assert_eq!(store.day_count(), 0);
        assert_eq!(store.matrix().nrows(), MINUTES_PER_DAY);
    }

    #[test]
    fn replace_preserves_order_and_values() {
        let mut store = ProfileStore::new();
        store.replace(&[profile_with(10, 1.5), profile_with(20, 2.5)]);

        assert_eq!(store.day_count(), 2);
        assert_eq!(store.matrix()[[10, 0]], 1.5);
        assert_eq!(store.matrix()[[20, 1]], 2.5);
        assert_eq!(store.day(0)[10], 1.5);
        assert_eq!(store.day(1)[10], 0.0);
    }

    #[test]
    fn replace_discards_previous_population() {
        let mut store = ProfileStore::new();
        store.replace(&[profile_with(5, 1.0), profile_with(6, 1.0)]);
        store.replace(&[profile_with(7, 3.0)]);

        assert_eq!(store.day_count(), 1);
        assert_eq!(store.matrix()[[7, 0]], 3.0);
        assert_eq!(store.matrix()[[5, 0]], 0.0);
    }

    #[test]
    fn clear_empties_the_store() {
        let mut store = ProfileStore::new();
        store.replace(&[profile_with(0, 1.0)]);
        store.clear();
        assert!(store.is_empty());
    }
}
