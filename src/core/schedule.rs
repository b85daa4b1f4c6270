use crate::core::{
    step::{Step, Transfer},
    summary::Summary,
};

/// Final hour-by-hour dispatch together with the transfers that built it.
#[must_use]
pub struct Schedule {
    pub steps: Vec<Step>,

    /// Transfers in the order they were applied.
    pub transfers: Vec<Transfer>,

    pub n_iterations: usize,
}

impl Schedule {
    pub fn summary(&self) -> Summary {
        Summary::new(&self.steps, self.transfers.len(), self.n_iterations)
    }
}
