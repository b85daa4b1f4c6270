use crate::{
    error::{ConfigurationError, NumericBoundsError},
    prelude::*,
    quantity::{energy::MegawattHours, power::Megawatts},
};

/// Storage battery sizing.
#[must_use]
#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct Battery {
    /// Total storage volume.
    pub volume: MegawattHours,

    /// Maximum charging or discharging power within a single hour.
    pub capacity: Megawatts,

    /// How many hours a charge may precede its matching discharge.
    pub window: usize,
}

impl Battery {
    pub fn validate(&self) -> Result {
        ensure!(self.volume.0.is_finite(), NumericBoundsError::NonFiniteVolume(self.volume.0));
        ensure!(
            self.volume > MegawattHours::ZERO,
            NumericBoundsError::NonPositiveVolume(self.volume.0),
        );
        ensure!(
            self.capacity.0.is_finite(),
            ConfigurationError::NonFiniteCapacity(self.capacity.0),
        );
        ensure!(
            self.capacity >= Megawatts::ZERO,
            ConfigurationError::NegativeCapacity(self.capacity.0),
        );
        ensure!(self.window != 0, ConfigurationError::ZeroWindow);
        Ok(())
    }
}
