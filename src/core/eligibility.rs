use std::collections::HashSet;

use crate::{
    core::{bounds::Bound, ledger::Ledger},
    quantity::power::Megawatts,
};

/// Tracks how much each hour may still charge or discharge, and which hours and pairs are out.
#[must_use]
pub struct Eligibility {
    bounds: Vec<Bound>,

    /// Hours which can no longer be discharged profitably.
    retired: Vec<bool>,

    /// `(charge hour, discharge hour)` pairs between which nothing more can be moved.
    excluded: HashSet<(usize, usize)>,
}

impl Eligibility {
    pub fn new(bounds: Vec<Bound>) -> Self {
        let retired = vec![false; bounds.len()];
        Self { bounds, retired, excluded: HashSet::new() }
    }

    /// Remaining discharging power at the hour, zero once it has charged.
    pub fn discharge_headroom(&self, ledger: &Ledger, hour: usize) -> Megawatts {
        let charge = ledger.charge(hour);
        if charge > Megawatts::ZERO {
            Megawatts::ZERO
        } else {
            // The charge is non-positive here, so adding it subtracts the committed discharge:
            (self.bounds[hour].discharge + charge).max(Megawatts::ZERO)
        }
    }

    /// Remaining charging power at the hour, zero once it has discharged.
    pub fn charge_headroom(&self, ledger: &Ledger, hour: usize) -> Megawatts {
        let charge = ledger.charge(hour);
        if charge < Megawatts::ZERO {
            Megawatts::ZERO
        } else {
            (self.bounds[hour].charge - charge).max(Megawatts::ZERO)
        }
    }

    /// Hours that may initially be discharged.
    pub fn peak_candidates(&self) -> impl Iterator<Item = usize> {
        self.bounds
            .iter()
            .enumerate()
            .filter(|(_, bound)| bound.discharge > Megawatts::ZERO)
            .map(|(hour, _)| hour)
    }

    pub fn retire(&mut self, hour: usize) {
        self.retired[hour] = true;
    }

    pub fn is_retired(&self, hour: usize) -> bool {
        self.retired[hour]
    }

    pub fn exclude(&mut self, charge_hour: usize, discharge_hour: usize) {
        self.excluded.insert((charge_hour, discharge_hour));
    }

    pub fn is_excluded(&self, charge_hour: usize, discharge_hour: usize) -> bool {
        self.excluded.contains(&(charge_hour, discharge_hour))
    }
}
