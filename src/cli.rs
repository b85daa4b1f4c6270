mod battery;
mod dispatch;

use std::path::PathBuf;

use clap::Parser;

pub use self::dispatch::dispatch;
use crate::cli::{battery::BatteryArgs, dispatch::DispatchArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Residual load curve: one value in megawatts per line.
    pub input: PathBuf,

    /// Resulting schedule CSV.
    pub output: PathBuf,

    #[clap(flatten)]
    pub battery: BatteryArgs,

    #[clap(flatten)]
    pub dispatch: DispatchArgs,

    /// Print the hour-by-hour schedule table.
    #[clap(long, env = "PRINT_STEPS")]
    pub print_steps: bool,
}
