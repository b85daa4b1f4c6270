use crate::{
    core::{ledger::Ledger, series::ReferenceShape},
    quantity::{power::Megawatts, rate::MegawattHourRate},
};

/// What the battery is dispatched for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Objective {
    /// Bring the load closer to its moving average.
    Flatten { shape: ReferenceShape, samples: usize },

    /// Buy low, sell high.
    Profit,
}

/// Ranking metric of the hours: the dispatch discharges at the highest and charges at the lowest.
pub enum Ranking<'a> {
    /// Current deviation of the adjusted load from the reference target.
    Flatten { reference: Vec<Megawatts> },

    /// Price of the hour.
    Profit { prices: &'a [MegawattHourRate] },
}

impl Ranking<'_> {
    pub fn metric(&self, ledger: &Ledger, hour: usize) -> f64 {
        match self {
            Self::Flatten { reference } => (ledger.adjusted_load(hour) - reference[hour]).0,
            Self::Profit { prices } => prices[hour].0,
        }
    }
}

/// How much of the available headroom a single transfer may take.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum TransferPolicy {
    /// Move as much as the headroom allows.
    #[default]
    Direct,

    /// Move at most the fraction of the metric gap between the peak and the trough,
    /// so that the neighbouring hours get their share in later iterations.
    Gradual { fraction: f64 },
}

impl TransferPolicy {
    pub fn limit(self, headroom: Megawatts, gap: f64) -> Megawatts {
        match self {
            Self::Direct => headroom,
            Self::Gradual { fraction } => headroom.min(Megawatts::from(fraction * gap.abs())),
        }
    }
}
