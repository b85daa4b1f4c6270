mod candidate;

use std::{collections::BinaryHeap, time::Instant};

use bon::Builder;
use itertools::Itertools;
use ordered_float::OrderedFloat;

use self::candidate::Candidate;
use crate::{
    core::{
        battery::Battery,
        bounds::Bound,
        eligibility::Eligibility,
        ledger::{Ledger, TOLERANCE},
        schedule::Schedule,
        series::{MovingAverage, Series},
        step::{Step, Transfer},
        strategy::{Objective, Ranking, TransferPolicy},
    },
    error::ConfigurationError,
    prelude::*,
};

/// Greedy peak-to-trough dispatcher.
#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Solver<'a> {
    series: &'a Series,
    battery: Battery,
    objective: Objective,

    #[builder(default)]
    policy: TransferPolicy,

    /// Minimal metric gap between a peak and its trough, relative to the peak metric.
    #[builder(default = 0.05)]
    spread: f64,

    /// Stop after this many iterations even if more transfers are possible.
    max_iterations: Option<usize>,
}

impl<S: solver_builder::IsComplete> SolverBuilder<'_, S> {
    pub fn try_solve(self) -> Result<Schedule> {
        self.build().try_solve()
    }
}

impl<'a> Solver<'a> {
    /// Find the dispatch schedule.
    ///
    /// Repeatedly takes the hour with the highest metric which may still discharge,
    /// pairs it with the lowest-metric hour within the look-behind window which may still charge,
    /// and moves as much energy between the two as the headroom, the policy and the volume allow.
    /// A discharge candidate without any usable trough is retired for good.
    #[instrument(
        skip_all,
        fields(
            n_hours = self.series.len(),
            volume = %self.battery.volume,
            capacity = %self.battery.capacity,
            window = self.battery.window,
        ),
    )]
    fn try_solve(self) -> Result<Schedule> {
        self.validate()?;
        let start_instant = Instant::now();

        let ranking = self.ranking()?;
        let mut eligibility = Eligibility::new(self.bounds(&ranking));
        let mut ledger = Ledger::new(&self.series.residual_load, self.battery.volume);

        let mut queue: BinaryHeap<Candidate> = eligibility
            .peak_candidates()
            .map(|hour| Candidate::new(ranking.metric(&ledger, hour), hour))
            .collect();
        info!(n_candidates = queue.len(), policy = ?self.policy, "dispatching…");

        let mut transfers = Vec::new();
        let mut n_iterations = 0;

        while let Some(candidate) = queue.pop() {
            if self.max_iterations.is_some_and(|max_iterations| n_iterations >= max_iterations) {
                warn!(n_iterations, "reached the iteration limit, stopping early");
                break;
            }
            n_iterations += 1;

            let peak = candidate.hour();
            if eligibility.is_retired(peak) {
                continue;
            }
            let discharge_headroom = eligibility.discharge_headroom(&ledger, peak);
            if discharge_headroom <= TOLERANCE {
                eligibility.retire(peak);
                continue;
            }
            let peak_metric = ranking.metric(&ledger, peak);
            if candidate.is_stale(peak_metric) {
                queue.push(Candidate::new(peak_metric, peak));
                continue;
            }

            let Some(trough) =
                self.find_trough(peak, peak_metric, &ranking, &eligibility, &ledger)
            else {
                trace!(peak, "no trough within reach");
                eligibility.retire(peak);
                continue;
            };

            let gap = peak_metric - ranking.metric(&ledger, trough);
            let requested = self
                .policy
                .limit(discharge_headroom.min(eligibility.charge_headroom(&ledger, trough)), gap);
            let amount = ledger.apply(trough, peak, requested)?;
            if amount > TOLERANCE {
                trace!(trough, peak, %amount, gap, "transferred");
                transfers.push(Transfer { charge_hour: trough, discharge_hour: peak, amount, gap });
            } else {
                eligibility.exclude(trough, peak);
            }

            // Give the peak another chance with its updated metric:
            queue.push(Candidate::new(ranking.metric(&ledger, peak), peak));
        }

        let schedule = Schedule { steps: self.steps(&ledger), transfers, n_iterations };
        info!(
            n_transfers = schedule.transfers.len(),
            n_iterations,
            elapsed = ?start_instant.elapsed(),
            "dispatched",
        );
        Ok(schedule)
    }

    fn validate(&self) -> Result {
        self.battery.validate()?;
        ensure!((0.0..1.0).contains(&self.spread), ConfigurationError::Spread(self.spread));
        if let TransferPolicy::Gradual { fraction } = self.policy {
            ensure!(
                fraction > 0.0 && fraction <= 1.0,
                ConfigurationError::GradualFraction(fraction),
            );
            ensure!(self.objective != Objective::Profit, ConfigurationError::GradualWithProfit);
        }
        if let Objective::Flatten { samples, .. } = self.objective {
            ensure!(samples != 0, ConfigurationError::ZeroSamples);
        }
        Ok(())
    }

    fn ranking(&self) -> Result<Ranking<'a>> {
        let series = self.series;
        match self.objective {
            Objective::Flatten { shape, samples } => {
                let reference = series.residual_load.moving_average(samples, shape);
                debug!(samples, ?shape, "built the reference");
                Ok(Ranking::Flatten { reference })
            }
            Objective::Profit => {
                let prices = series.prices.as_deref().ok_or(ConfigurationError::MissingPrices)?;
                Ok(Ranking::Profit { prices })
            }
        }
    }

    /// Ceilings from the constraint curve when given. Otherwise, flattening may only move
    /// the load towards its target, while profit optimization may use the full power.
    fn bounds(&self, ranking: &Ranking) -> Vec<Bound> {
        let capacity = self.battery.capacity;
        if let Some(constraints) = &self.series.constraints {
            return constraints
                .iter()
                .map(|constraint| Bound::from_signed(*constraint).capped(capacity))
                .collect();
        }
        match ranking {
            Ranking::Flatten { reference } => self
                .series
                .residual_load
                .iter()
                .zip_eq(reference)
                .map(|(load, target)| Bound::from_deviation(*load, *target).capped(capacity))
                .collect(),
            Ranking::Profit { .. } => vec![Bound::unconstrained(capacity); self.series.len()],
        }
    }

    /// Find the lowest-metric hour before the peak which can still take the charge.
    fn find_trough(
        &self,
        peak: usize,
        peak_metric: f64,
        ranking: &Ranking,
        eligibility: &Eligibility,
        ledger: &Ledger,
    ) -> Option<usize> {
        let threshold = peak_metric - self.spread * peak_metric.abs();
        (peak.saturating_sub(self.battery.window)..peak)
            .rev()
            // Nothing can be carried over an hour at which the battery is already full:
            .take_while(|hour| !ledger.is_full(*hour))
            .filter(|hour| {
                eligibility.charge_headroom(ledger, *hour) > TOLERANCE
                    && !eligibility.is_excluded(*hour, peak)
            })
            .map(|hour| (OrderedFloat(ranking.metric(ledger, hour)), hour))
            .filter(|(metric, _)| metric.0 < threshold)
            .min()
            .map(|(_, hour)| hour)
    }

    fn steps(&self, ledger: &Ledger) -> Vec<Step> {
        let prices = match self.objective {
            Objective::Profit => self.series.prices.as_deref(),
            Objective::Flatten { .. } => None,
        };
        (0..ledger.len())
            .map(|index| Step {
                index,
                residual_load: self.series.residual_load[index],
                adjusted_load: ledger.adjusted_load(index),
                charge: ledger.charge(index),
                state_of_charge: ledger.state_of_charge(index),
                price: prices.map(|prices| prices[index]),
            })
            .collect()
    }
}
