use std::{
    iter::{self, Sum},
    ops::{Add, Div, Mul, Sub},
};

/// Shape of the moving-average window used as the flattening target.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum ReferenceShape {
    /// Window centred on the hour, wrapping around the ends of the series.
    ///
    /// For 72 samples, that is the previous 36 hours, the hour itself, and the following 35 hours.
    #[default]
    Centered,

    /// Window ending at the hour. Near the start of the series, only the available hours are used.
    Trailing,
}

impl<T> MovingAverage for T where T: ?Sized {}

pub trait MovingAverage {
    /// Average every value over a window of `samples` neighbouring values.
    ///
    /// Runs in linear time regardless of `samples`: the window sums come from cumulative sums.
    #[must_use]
    fn moving_average<V>(&self, samples: usize, shape: ReferenceShape) -> Vec<V>
    where
        Self: AsRef<[V]>,
        V: Copy
            + Sum
            + Add<Output = V>
            + Sub<Output = V>
            + Mul<f64, Output = V>
            + Div<f64, Output = V>,
    {
        let values = self.as_ref();
        let n_values = values.len();
        if n_values == 0 || samples == 0 {
            return Vec::new();
        }

        // Two laps, so that a wrapping window is still a difference of two cumulative sums:
        let zero: V = iter::empty::<V>().sum();
        let cumulative: Vec<V> = iter::once(zero)
            .chain(values.iter().chain(values).scan(zero, |sum, value| {
                *sum = *sum + *value;
                Some(*sum)
            }))
            .collect();

        match shape {
            ReferenceShape::Centered => {
                // A window longer than the series covers it `n_laps` times, plus a remainder:
                let n_laps = samples / n_values;
                let remainder = samples % n_values;
                let laps_sum = cumulative[n_values] * as_f64(n_laps);

                // Offset that turns `index - samples / 2` into a non-negative modular index:
                let offset = n_values - (samples / 2) % n_values;
                (0..n_values)
                    .map(|index| {
                        let start = (index + offset) % n_values;
                        let sum = laps_sum + cumulative[start + remainder] - cumulative[start];
                        sum / as_f64(samples)
                    })
                    .collect()
            }
            ReferenceShape::Trailing => (0..n_values)
                .map(|index| {
                    let start = (index + 1).saturating_sub(samples);
                    (cumulative[index + 1] - cumulative[start]) / as_f64(index + 1 - start)
                })
                .collect(),
        }
    }
}

#[expect(clippy::cast_precision_loss)]
const fn as_f64(n: usize) -> f64 {
    n as f64
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::power::Megawatts;

    fn spike(n_hours: usize, at: usize) -> Vec<Megawatts> {
        (0..n_hours).map(|hour| Megawatts::from(if hour == at { 500.0 } else { 100.0 })).collect()
    }

    #[test]
    fn test_centered_covers_previous_36_and_next_35_hours() {
        let averages = spike(200, 50).moving_average(72, ReferenceShape::Centered);
        assert_eq!(averages.len(), 200);
        assert_abs_diff_eq!(averages[14].0, 100.0);
        assert_abs_diff_eq!(averages[15].0, 7600.0 / 72.0);
        assert_abs_diff_eq!(averages[86].0, 7600.0 / 72.0);
        assert_abs_diff_eq!(averages[87].0, 100.0);
    }

    #[test]
    fn test_centered_wraps_around() {
        let averages = spike(100, 0).moving_average(4, ReferenceShape::Centered);
        // Hour 98 averages hours 96, 97, 98 and 99; hour 99 reaches over to the spike at hour 0:
        assert_abs_diff_eq!(averages[98].0, 100.0);
        assert_abs_diff_eq!(averages[99].0, 200.0);
        assert_abs_diff_eq!(averages[1].0, 200.0);
        assert_abs_diff_eq!(averages[2].0, 200.0);
        assert_abs_diff_eq!(averages[3].0, 100.0);
    }

    #[test]
    fn test_centered_longer_than_series() {
        let values = vec![1.0, 2.0, 3.0];
        let averages = values.moving_average(6, ReferenceShape::Centered);
        for average in averages {
            assert_abs_diff_eq!(average, 2.0);
        }
    }

    #[test]
    fn test_trailing_uses_available_hours_at_the_start() {
        let values = vec![4.0, 2.0, 6.0, 8.0];
        let averages = values.moving_average(2, ReferenceShape::Trailing);
        assert_eq!(averages, vec![4.0, 3.0, 4.0, 7.0]);
    }

    #[test]
    fn test_is_pure() {
        let loads = spike(200, 50);
        assert_eq!(
            loads.moving_average(72, ReferenceShape::Centered),
            loads.moving_average(72, ReferenceShape::Centered),
        );
        assert_eq!(
            loads.moving_average(24, ReferenceShape::Trailing),
            loads.moving_average(24, ReferenceShape::Trailing),
        );
    }

    #[test]
    fn test_empty() {
        let values: Vec<f64> = Vec::new();
        assert!(values.moving_average(72, ReferenceShape::Centered).is_empty());
    }

    #[test]
    fn test_huge_window() {
        let values = vec![1.0, 2.0, 3.0];
        for shape in [ReferenceShape::Centered, ReferenceShape::Trailing] {
            let averages = values.moving_average(1_000_000_007, shape);
            assert_eq!(averages.len(), 3);
            assert_abs_diff_eq!(averages[2], 2.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_partial_lap() {
        // Five samples over three values: one full lap plus hours `i - 2` and `i - 1`:
        let values = vec![3.0, 6.0, 9.0];
        let averages = values.moving_average(5, ReferenceShape::Centered);
        assert_abs_diff_eq!(averages[0], (18.0 + 6.0 + 9.0) / 5.0);
        assert_abs_diff_eq!(averages[1], (18.0 + 9.0 + 3.0) / 5.0);
        assert_abs_diff_eq!(averages[2], (18.0 + 3.0 + 6.0) / 5.0);
    }
}
