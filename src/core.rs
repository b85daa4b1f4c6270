pub mod battery;
pub mod bounds;
pub mod eligibility;
pub mod ledger;
pub mod schedule;
pub mod series;
pub mod solver;
pub mod step;
pub mod strategy;
pub mod summary;
pub mod working_mode;
