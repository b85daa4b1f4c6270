use crate::quantity::power::Megawatts;

/// Per-hour ceilings on charging and discharging, both expressed as non-negative magnitudes.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bound {
    pub charge: Megawatts,
    pub discharge: Megawatts,
}

impl Bound {
    /// The battery may charge or discharge at full power.
    pub const fn unconstrained(capacity: Megawatts) -> Self {
        Self { charge: capacity, discharge: capacity }
    }

    /// Interpret a signed constraint value: negative caps charging, positive caps discharging.
    pub fn from_signed(value: Megawatts) -> Self {
        if value < Megawatts::ZERO {
            Self { charge: value.abs(), discharge: Megawatts::ZERO }
        } else {
            Self { charge: Megawatts::ZERO, discharge: value }
        }
    }

    /// Allow only as much dispatch as it takes to meet the target.
    ///
    /// Discharging never pushes the load below zero.
    pub fn from_deviation(load: Megawatts, target: Megawatts) -> Self {
        let deviation = load - target;
        if deviation < Megawatts::ZERO {
            Self { charge: -deviation, discharge: Megawatts::ZERO }
        } else {
            Self { charge: Megawatts::ZERO, discharge: deviation.min(load).max(Megawatts::ZERO) }
        }
    }

    pub fn capped(self, capacity: Megawatts) -> Self {
        Self { charge: self.charge.min(capacity), discharge: self.discharge.min(capacity) }
    }
}
