use std::path::{Path, PathBuf};

use clap::Parser;

use crate::{
    cli::Args,
    core::{
        series::{ReferenceShape, Series},
        solver::Solver,
        strategy::{Objective, TransferPolicy},
    },
    curve::{read_curve, write_schedule},
    prelude::*,
    quantity::{power::Megawatts, rate::MegawattHourRate},
    tables::{build_steps_table, build_summary_table},
};

#[must_use]
#[derive(Parser)]
pub struct DispatchArgs {
    /// Signed hourly constraints: negative values cap charging, positive values cap discharging.
    #[clap(long = "constrain", env = "CONSTRAINT_PATH")]
    pub constraints: Option<PathBuf>,

    /// Hourly prices, one per line. Implies `--profit`.
    #[clap(long = "price", env = "PRICE_PATH")]
    pub prices: Option<PathBuf>,

    /// Optimize for the price spread instead of flattening the load.
    #[clap(long, env = "PROFIT")]
    pub profit: bool,

    /// Move a fraction of the gap per transfer to spread the charge over more hours.
    #[clap(long, env = "GRADUAL")]
    pub gradual: bool,

    #[clap(long = "gradual-fraction", default_value = "0.05", env = "GRADUAL_FRACTION")]
    pub gradual_fraction: f64,

    /// Minimal metric gap between a discharge and a charge, relative to the discharge metric.
    #[clap(long, default_value = "0.05", env = "SPREAD")]
    pub spread: f64,

    /// Shape of the moving average the load gets flattened towards.
    #[clap(long = "reference", value_enum, default_value = "centered", env = "REFERENCE_SHAPE")]
    pub reference_shape: ReferenceShape,

    /// Number of hours in the moving average.
    #[clap(long = "mean-samples", default_value = "72", env = "MEAN_SAMPLES")]
    pub mean_samples: usize,

    /// Stop the dispatch after this many iterations.
    #[clap(long = "max-iterations", env = "MAX_ITERATIONS")]
    pub max_iterations: Option<usize>,
}

impl DispatchArgs {
    pub const fn is_profit(&self) -> bool {
        self.profit || self.prices.is_some()
    }

    pub const fn objective(&self) -> Objective {
        if self.is_profit() {
            Objective::Profit
        } else {
            Objective::Flatten { shape: self.reference_shape, samples: self.mean_samples }
        }
    }

    pub const fn policy(&self) -> TransferPolicy {
        if self.gradual {
            TransferPolicy::Gradual { fraction: self.gradual_fraction }
        } else {
            TransferPolicy::Direct
        }
    }

    pub fn load_series(&self, input: &Path) -> Result<Series> {
        let residual_load = read_curve::<Megawatts>(input)?;
        let prices = self.prices.as_deref().map(read_curve::<MegawattHourRate>).transpose()?;
        let constraints = self.constraints.as_deref().map(read_curve::<Megawatts>).transpose()?;
        Series::try_new()
            .residual_load(residual_load)
            .maybe_prices(prices)
            .maybe_constraints(constraints)
            .try_build()
    }
}

/// Load the curves, dispatch the battery, save and print the results.
#[instrument(skip_all)]
pub fn dispatch(args: &Args) -> Result {
    let series = args.dispatch.load_series(&args.input)?;
    let battery = args.battery.battery();
    let schedule = Solver::builder()
        .series(&series)
        .battery(battery)
        .objective(args.dispatch.objective())
        .policy(args.dispatch.policy())
        .spread(args.dispatch.spread)
        .maybe_max_iterations(args.dispatch.max_iterations)
        .try_solve()
        .context("failed to dispatch the battery")?;
    write_schedule(&args.output, &schedule.steps)?;

    if args.print_steps {
        println!("{}", build_steps_table(&schedule.steps, battery.capacity));
    }
    println!("{}", build_summary_table(&schedule.summary()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> DispatchArgs {
        #[derive(Parser)]
        struct Args {
            #[clap(flatten)]
            dispatch: DispatchArgs,
        }
        Args::parse_from(std::iter::once("flattener").chain(args.iter().copied())).dispatch
    }

    #[test]
    fn test_flatten_by_default() {
        let args = parse(&[]);
        assert_eq!(
            args.objective(),
            Objective::Flatten { shape: ReferenceShape::Centered, samples: 72 },
        );
        assert_eq!(args.policy(), TransferPolicy::Direct);
    }

    #[test]
    fn test_price_implies_profit() {
        assert_eq!(parse(&["--price", "prices.txt"]).objective(), Objective::Profit);
        assert_eq!(parse(&["--profit"]).objective(), Objective::Profit);
    }

    #[test]
    fn test_gradual() {
        let args = parse(&["--gradual", "--gradual-fraction", "0.1", "--reference", "trailing"]);
        assert_eq!(args.policy(), TransferPolicy::Gradual { fraction: 0.1 });
        assert_eq!(
            args.objective(),
            Objective::Flatten { shape: ReferenceShape::Trailing, samples: 72 },
        );
    }
}
