mod average;

pub use self::average::{MovingAverage, ReferenceShape};
use crate::{
    error::ConfigurationError,
    prelude::*,
    quantity::{power::Megawatts, rate::MegawattHourRate},
};

/// Aligned hourly inputs of a single run.
#[must_use]
#[derive(Debug)]
pub struct Series {
    pub residual_load: Vec<Megawatts>,

    /// Hourly prices, present when optimizing for profit.
    pub prices: Option<Vec<MegawattHourRate>>,

    /// Signed hourly constraints: negative values cap charging, positive values cap discharging.
    pub constraints: Option<Vec<Megawatts>>,
}

#[bon::bon]
impl Series {
    #[builder(finish_fn = try_build)]
    pub fn try_new(
        residual_load: Vec<Megawatts>,
        prices: Option<Vec<MegawattHourRate>>,
        constraints: Option<Vec<Megawatts>>,
    ) -> Result<Self> {
        ensure!(!residual_load.is_empty(), ConfigurationError::EmptyLoad);
        ensure_finite("residual load", residual_load.iter().map(|value| value.0))?;
        if let Some(prices) = &prices {
            ensure_aligned("price", residual_load.len(), prices.len())?;
            ensure_finite("price", prices.iter().map(|value| value.0))?;
        }
        if let Some(constraints) = &constraints {
            ensure_aligned("constraint", residual_load.len(), constraints.len())?;
            ensure_finite("constraint", constraints.iter().map(|value| value.0))?;
        }
        Ok(Self { residual_load, prices, constraints })
    }

    pub const fn len(&self) -> usize {
        self.residual_load.len()
    }
}

fn ensure_aligned(name: &'static str, expected: usize, actual: usize) -> Result {
    ensure!(expected == actual, ConfigurationError::Misaligned { name, expected, actual });
    Ok(())
}

fn ensure_finite(name: &'static str, mut values: impl Iterator<Item = f64>) -> Result {
    if let Some(hour) = values.position(|value| !value.is_finite()) {
        bail!(ConfigurationError::NonFinite { name, hour });
    }
    Ok(())
}
