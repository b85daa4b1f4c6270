use std::cmp::Reverse;

use ordered_float::OrderedFloat;

/// Worklist entry of a discharge candidate.
///
/// The heap pops the highest metric first and, among equal metrics, the earliest hour.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Candidate {
    metric: OrderedFloat<f64>,
    hour: Reverse<usize>,
}

impl Candidate {
    pub const fn new(metric: f64, hour: usize) -> Self {
        Self { metric: OrderedFloat(metric), hour: Reverse(hour) }
    }

    pub const fn hour(self) -> usize {
        self.hour.0
    }

    /// The metric has changed since the candidate was pushed.
    pub fn is_stale(self, metric: f64) -> bool {
        self.metric != OrderedFloat(metric)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn test_pop_order() {
        let mut heap = BinaryHeap::from([
            Candidate::new(10.0, 3),
            Candidate::new(30.0, 7),
            Candidate::new(30.0, 2),
            Candidate::new(-5.0, 0),
        ]);
        let hours: Vec<_> = std::iter::from_fn(|| heap.pop()).map(Candidate::hour).collect();
        assert_eq!(hours, vec![2, 7, 3, 0]);
    }

    #[test]
    fn test_is_stale() {
        let candidate = Candidate::new(10.0, 1);
        assert!(!candidate.is_stale(10.0));
        assert!(candidate.is_stale(9.5));
    }
}
