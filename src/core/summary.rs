use itertools::{Itertools, MinMaxResult};

use crate::{
    core::step::Step,
    quantity::{cost::Cost, energy::MegawattHours, power::Megawatts, time::Hours},
};

/// Peak, trough and mean of a load curve.
#[derive(Copy, Clone, Debug, Default)]
pub struct LoadSummary {
    pub peak: Megawatts,
    pub trough: Megawatts,
    pub mean: Megawatts,
}

impl LoadSummary {
    #[expect(clippy::cast_precision_loss)]
    pub fn from_loads(loads: impl ExactSizeIterator<Item = Megawatts> + Clone) -> Self {
        let n_hours = loads.len();
        if n_hours == 0 {
            return Self::default();
        }
        let mean = loads.clone().sum::<Megawatts>() / n_hours as f64;
        let (trough, peak) = match loads.minmax() {
            MinMaxResult::NoElements => (Megawatts::ZERO, Megawatts::ZERO),
            MinMaxResult::OneElement(load) => (load, load),
            MinMaxResult::MinMax(trough, peak) => (trough, peak),
        };
        Self { peak, trough, mean }
    }

    /// Peak-to-trough span.
    pub fn span(&self) -> Megawatts {
        self.peak - self.trough
    }
}

/// Dispatch summary.
#[derive(Copy, Clone, Debug)]
pub struct Summary {
    pub residual_load: LoadSummary,
    pub adjusted_load: LoadSummary,
    pub charged: MegawattHours,
    pub discharged: MegawattHours,
    pub max_state_of_charge: MegawattHours,
    pub n_transfers: usize,
    pub n_iterations: usize,

    /// Earned by discharging minus spent on charging, when the prices are known.
    pub revenue: Option<Cost>,
}

impl Summary {
    pub fn new(steps: &[Step], n_transfers: usize, n_iterations: usize) -> Self {
        let charged = steps
            .iter()
            .map(|step| step.charge.max(Megawatts::ZERO) * Hours::ONE)
            .sum::<MegawattHours>();
        let discharged = steps
            .iter()
            .map(|step| -step.charge.min(Megawatts::ZERO) * Hours::ONE)
            .sum::<MegawattHours>();
        let max_state_of_charge = steps
            .iter()
            .map(|step| step.state_of_charge)
            .fold(MegawattHours::ZERO, MegawattHours::max);
        let revenue = steps
            .iter()
            .map(|step| step.price.map(|price| -(step.charge * Hours::ONE) * price))
            .sum::<Option<Cost>>();
        Self {
            residual_load: LoadSummary::from_loads(steps.iter().map(|step| step.residual_load)),
            adjusted_load: LoadSummary::from_loads(steps.iter().map(|step| step.adjusted_load)),
            charged,
            discharged,
            max_state_of_charge,
            n_transfers,
            n_iterations,
            revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::rate::MegawattHourRate;

    fn step(index: usize, residual_load: f64, charge: f64, soc: f64, price: Option<f64>) -> Step {
        Step {
            index,
            residual_load: Megawatts::from(residual_load),
            adjusted_load: Megawatts::from(residual_load + charge),
            charge: Megawatts::from(charge),
            state_of_charge: MegawattHours::from(soc),
            price: price.map(MegawattHourRate::from),
        }
    }

    #[test]
    fn test_load_summary() {
        let summary = LoadSummary::from_loads(
            [100.0, 300.0, 200.0].into_iter().map(Megawatts::from),
        );
        assert_abs_diff_eq!(summary.peak.0, 300.0);
        assert_abs_diff_eq!(summary.trough.0, 100.0);
        assert_abs_diff_eq!(summary.mean.0, 200.0);
        assert_abs_diff_eq!(summary.span().0, 200.0);
    }

    #[test]
    fn test_summary_without_prices() {
        let steps = [step(0, 100.0, 50.0, 50.0, None), step(1, 300.0, -50.0, 0.0, None)];
        let summary = Summary::new(&steps, 1, 2);
        assert_abs_diff_eq!(summary.charged.0, 50.0);
        assert_abs_diff_eq!(summary.discharged.0, 50.0);
        assert_abs_diff_eq!(summary.max_state_of_charge.0, 50.0);
        assert_abs_diff_eq!(summary.adjusted_load.span().0, 100.0);
        assert!(summary.revenue.is_none());
    }

    #[test]
    fn test_summary_revenue() {
        let steps = [step(0, 0.0, 2.0, 2.0, Some(10.0)), step(1, 0.0, -2.0, 0.0, Some(40.0))];
        let revenue = Summary::new(&steps, 1, 1).revenue.unwrap();
        assert_abs_diff_eq!(revenue.0, 60.0);
    }
}
