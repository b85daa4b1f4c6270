use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{Quantity, energy::MegawattHours, time::Hours};

pub type Megawatts = Quantity<1, 0, 0>;

impl Display for Megawatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} MW", self.0)
    }
}

impl Debug for Megawatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}MW", self.0)
    }
}

impl Mul<Hours> for Megawatts {
    type Output = MegawattHours;

    fn mul(self, rhs: Hours) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}
