//! Battery-related CLI arguments.

use clap::Parser;

use crate::{
    core::battery::Battery,
    quantity::{energy::MegawattHours, power::Megawatts, time::Hours},
};

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct BatteryArgs {
    /// Storage volume in megawatt-hours.
    #[clap(short = 'v', long = "volume", default_value = "50000", env = "BATTERY_VOLUME")]
    pub volume: MegawattHours,

    /// Maximum charging and discharging power in megawatts, one tenth of the volume by default.
    #[clap(short = 'c', long = "capacity", env = "BATTERY_CAPACITY")]
    pub capacity: Option<Megawatts>,

    /// How many hours a charge may precede the discharge it pays for.
    #[clap(short = 'w', long = "window", default_value = "72", env = "LOOKBEHIND_WINDOW")]
    pub window: usize,
}

impl BatteryArgs {
    pub fn battery(self) -> Battery {
        Battery::builder()
            .volume(self.volume)
            .capacity(self.capacity.unwrap_or_else(|| self.volume / Hours::ONE / 10.0))
            .window(self.window)
            .build()
    }
}
