use std::{
    fmt::{Debug, Display, Formatter},
    ops::{Div, Mul},
};

use crate::quantity::{
    Quantity,
    cost::Cost,
    power::Megawatts,
    rate::MegawattHourRate,
    time::Hours,
};

pub type MegawattHours = Quantity<1, 1, 0>;

impl Display for MegawattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} MWh", self.0)
    }
}

impl Debug for MegawattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}MWh", self.0)
    }
}

impl Mul<MegawattHourRate> for MegawattHours {
    type Output = Cost;

    fn mul(self, rhs: MegawattHourRate) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

impl Div<Hours> for MegawattHours {
    type Output = Megawatts;

    fn div(self, rhs: Hours) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_power_over_hours() {
        let energy = Megawatts::from(50.0) * Hours::from(2.0);
        assert_abs_diff_eq!(energy.0, 100.0);
        assert_abs_diff_eq!((energy / Hours::from(4.0)).0, 25.0);
    }

    #[test]
    fn test_energy_times_rate() {
        let revenue = MegawattHours::from(10.0) * MegawattHourRate::from(42.5);
        assert_abs_diff_eq!(revenue.0, 425.0);
    }
}
