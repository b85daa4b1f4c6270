use std::fmt::{Display, Formatter};

use comfy_table::Color;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WorkingMode {
    /// Do not do anything.
    Idle,

    /// Store energy, increasing the load.
    Charge,

    /// Release energy, reducing the load.
    Discharge,
}

impl Display for WorkingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Charge => write!(f, "Charge"),
            Self::Discharge => write!(f, "Discharge"),
        }
    }
}

impl WorkingMode {
    pub const fn color(self) -> Color {
        match self {
            Self::Idle => Color::Reset,
            Self::Charge => Color::Green,
            Self::Discharge => Color::Red,
        }
    }
}
