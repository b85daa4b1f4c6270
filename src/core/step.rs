use crate::{
    core::working_mode::WorkingMode,
    quantity::{energy::MegawattHours, power::Megawatts, rate::MegawattHourRate},
};

/// Single-hour dispatch result.
#[derive(Copy, Clone, Debug)]
pub struct Step {
    pub index: usize,
    pub residual_load: Megawatts,
    pub adjusted_load: Megawatts,

    /// Positive is charging, negative is discharging.
    pub charge: Megawatts,

    pub state_of_charge: MegawattHours,

    /// Only known when optimizing for profit.
    pub price: Option<MegawattHourRate>,
}

impl Step {
    pub fn working_mode(&self) -> WorkingMode {
        if self.charge > Megawatts::ZERO {
            WorkingMode::Charge
        } else if self.charge < Megawatts::ZERO {
            WorkingMode::Discharge
        } else {
            WorkingMode::Idle
        }
    }
}

/// Energy moved from a charging hour to a later discharging hour within one iteration.
#[derive(Copy, Clone, Debug)]
pub struct Transfer {
    pub charge_hour: usize,
    pub discharge_hour: usize,
    pub amount: Megawatts,

    /// Metric difference between the discharging and the charging hour at the time of the transfer.
    pub gap: f64,
}
