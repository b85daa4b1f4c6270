use std::ops::Range;

use crate::{
    error::NumericBoundsError,
    prelude::*,
    quantity::{Quantity, energy::MegawattHours, power::Megawatts, time::Hours},
};

/// Transfers at or below this amount are considered impossible.
pub const TOLERANCE: Megawatts = Quantity(1e-6);

/// Stored energy at or below this distance from the volume is considered full.
const ENERGY_TOLERANCE: MegawattHours = Quantity(1e-6);

/// Owner of the mutable dispatch state: hourly charge and the resulting state of charge.
#[must_use]
pub struct Ledger {
    volume: MegawattHours,
    residual_load: Vec<Megawatts>,

    /// Signed power: positive is charging, negative is discharging.
    charge: Vec<Megawatts>,

    /// Stored energy at the end of each hour.
    state_of_charge: Vec<MegawattHours>,
}

impl Ledger {
    pub fn new(residual_load: &[Megawatts], volume: MegawattHours) -> Self {
        Self {
            volume,
            residual_load: residual_load.to_vec(),
            charge: vec![Megawatts::ZERO; residual_load.len()],
            state_of_charge: vec![MegawattHours::ZERO; residual_load.len()],
        }
    }

    pub const fn len(&self) -> usize {
        self.charge.len()
    }

    pub fn charge(&self, hour: usize) -> Megawatts {
        self.charge[hour]
    }

    pub fn state_of_charge(&self, hour: usize) -> MegawattHours {
        self.state_of_charge[hour]
    }

    pub fn adjusted_load(&self, hour: usize) -> Megawatts {
        self.residual_load[hour] + self.charge[hour]
    }

    pub fn is_full(&self, hour: usize) -> bool {
        self.state_of_charge[hour] >= self.volume - ENERGY_TOLERANCE
    }

    /// Energy that can still be stored throughout all the hours.
    pub fn storage_headroom(&self, hours: Range<usize>) -> MegawattHours {
        let max_soc =
            self.state_of_charge[hours].iter().copied().fold(MegawattHours::ZERO, MegawattHours::max);
        (self.volume - max_soc).max(MegawattHours::ZERO)
    }

    /// Charge at `charge_hour` and discharge the same amount at `discharge_hour`.
    ///
    /// The amount gets clipped so that the state of charge stays within the volume.
    ///
    /// # Returns
    ///
    /// The actually applied amount, which is zero when nothing could be moved.
    pub fn apply(
        &mut self,
        charge_hour: usize,
        discharge_hour: usize,
        requested: Megawatts,
    ) -> Result<Megawatts> {
        debug_assert!(charge_hour < discharge_hour);
        let hours = charge_hour..discharge_hour;
        let energy =
            (requested * Hours::ONE).min(self.storage_headroom(hours.clone())).max(MegawattHours::ZERO);
        let amount = energy / Hours::ONE;
        if amount <= TOLERANCE {
            return Ok(Megawatts::ZERO);
        }

        self.charge[charge_hour] += amount;
        self.charge[discharge_hour] -= amount;

        // The discharge cancels the charge, so the hours from `discharge_hour` on are unaffected:
        for hour in hours {
            let soc = self.state_of_charge[hour] + energy;
            ensure!(
                soc >= -ENERGY_TOLERANCE && soc <= self.volume + ENERGY_TOLERANCE,
                NumericBoundsError::StateOfCharge { hour, soc: soc.0, volume: self.volume.0 },
            );
            self.state_of_charge[hour] = soc;
        }
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn ledger(n_hours: usize, volume: f64) -> Ledger {
        Ledger::new(&vec![Megawatts::from(100.0); n_hours], MegawattHours::from(volume))
    }

    #[test]
    fn test_apply_updates_charge_and_state_of_charge() -> Result {
        let mut ledger = ledger(6, 100.0);
        let amount = ledger.apply(1, 4, Megawatts::from(30.0))?;
        assert_eq!(amount, Megawatts::from(30.0));
        assert_eq!(ledger.charge(1), Megawatts::from(30.0));
        assert_eq!(ledger.charge(4), Megawatts::from(-30.0));
        assert_eq!(ledger.adjusted_load(1), Megawatts::from(130.0));
        assert_eq!(ledger.adjusted_load(4), Megawatts::from(70.0));
        let soc: Vec<f64> = (0..ledger.len()).map(|hour| ledger.state_of_charge(hour).0).collect();
        assert_eq!(soc, vec![0.0, 30.0, 30.0, 30.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_apply_clips_to_volume() -> Result {
        let mut ledger = ledger(6, 100.0);
        ledger.apply(2, 3, Megawatts::from(80.0))?;
        let amount = ledger.apply(0, 5, Megawatts::from(50.0))?;
        assert_abs_diff_eq!(amount.0, 20.0);
        assert!(ledger.is_full(2));
        assert!(!ledger.is_full(1));
        assert_abs_diff_eq!(ledger.state_of_charge(2).0, 100.0);
        Ok(())
    }

    #[test]
    fn test_apply_nothing_when_full() -> Result {
        let mut ledger = ledger(4, 10.0);
        ledger.apply(0, 3, Megawatts::from(10.0))?;
        let amount = ledger.apply(1, 2, Megawatts::from(5.0))?;
        assert_eq!(amount, Megawatts::ZERO);
        assert_eq!(ledger.charge(1), Megawatts::ZERO);
        Ok(())
    }

    #[test]
    fn test_apply_ignores_negative_request() -> Result {
        let mut ledger = ledger(3, 10.0);
        assert_eq!(ledger.apply(0, 2, Megawatts::from(-5.0))?, Megawatts::ZERO);
        Ok(())
    }

    #[test]
    fn test_storage_headroom() -> Result {
        let mut ledger = ledger(5, 50.0);
        ledger.apply(1, 2, Megawatts::from(20.0))?;
        assert_abs_diff_eq!(ledger.storage_headroom(0..4).0, 30.0);
        assert_abs_diff_eq!(ledger.storage_headroom(2..4).0, 50.0);
        Ok(())
    }
}
