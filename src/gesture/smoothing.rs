//! Fixed-size moving average over composite scores

use std::collections::VecDeque;

/// FIFO window of the most recent composite scores
#[derive(Debug, Clone)]
pub struct ScoreWindow {
    capacity: usize,
    values: VecDeque<f32>,
    mean: f32,
}

impl ScoreWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity + 1),
            mean: 0.0,
        }
    }

    /// Push a value, evicting the oldest once over capacity, and return the new mean
    pub fn push(&mut self, value: f32) -> f32 {
        self.values.push_back(value);
        while self.values.len() > self.capacity {
            self.values.pop_front();
        }
        // Recomputed from the buffer each time so no drift can accumulate
        self.mean = self.values.iter().sum::<f32>() / self.values.len() as f32;
        self.mean
    }

    /// Mean of the current contents (0 when empty)
    pub fn mean(&self) -> f32 {
        self.mean
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.mean = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_window_mean_is_zero() {
        let window = ScoreWindow::new(5);
        assert!(window.is_empty());
        assert_eq!(window.mean(), 0.0);
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut window = ScoreWindow::new(3);
        window.push(1.0);
        window.push(0.0);
        window.push(0.0);
        assert!((window.mean() - 1.0 / 3.0).abs() < 1e-6);
        // The 1.0 falls out
        assert_eq!(window.push(0.0), 0.0);
        assert_eq!(window.len(), 3);
    }

    proptest! {
        #[test]
        fn prop_window_is_mean_of_last_five(values in prop::collection::vec(0.0f32..=1.0, 0..40)) {
            let mut window = ScoreWindow::new(5);
            for (i, v) in values.iter().enumerate() {
                window.push(*v);
                prop_assert!(window.len() <= 5);

                let start = (i + 1).saturating_sub(5);
                let tail = &values[start..=i];
                let expected = tail.iter().sum::<f32>() / tail.len() as f32;
                prop_assert!((window.mean() - expected).abs() < 1e-5);
            }
        }
    }
}
