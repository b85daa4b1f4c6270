use crate::quantity::Quantity;

pub type Hours = Quantity<0, 1, 0>;

impl Hours {
    /// Duration of a single dispatch step.
    pub const ONE: Self = Self(1.0);
}
