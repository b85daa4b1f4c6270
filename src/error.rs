use thiserror::Error;

/// Invalid combination of inputs or battery parameters, detected once before the dispatch.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("gradual flattening cannot be combined with profit optimization")]
    GradualWithProfit,

    #[error("profit optimization requires a price curve")]
    MissingPrices,

    #[error("the residual load curve is empty")]
    EmptyLoad,

    #[error("the {name} curve has {actual} values, but the residual load has {expected}")]
    Misaligned { name: &'static str, expected: usize, actual: usize },

    #[error("the look-behind window must be at least one hour")]
    ZeroWindow,

    #[error("the moving average needs at least one sample")]
    ZeroSamples,

    #[error("the power capacity must be non-negative, got {0} MW")]
    NegativeCapacity(f64),

    #[error("the power capacity must be finite, got {0} MW")]
    NonFiniteCapacity(f64),

    #[error("the gradual fraction must be within (0, 1], got {0}")]
    GradualFraction(f64),

    #[error("the spread must be within [0, 1), got {0}")]
    Spread(f64),

    #[error("{name} contains a non-finite value at hour {hour}")]
    NonFinite { name: &'static str, hour: usize },
}

/// The state of charge cannot be kept within the battery volume.
#[derive(Debug, Error, PartialEq)]
pub enum NumericBoundsError {
    #[error("the battery volume must be positive, got {0} MWh")]
    NonPositiveVolume(f64),

    #[error("the battery volume must be finite, got {0} MWh")]
    NonFiniteVolume(f64),

    #[error("state of charge at hour {hour} is {soc} MWh, outside of [0, {volume}] MWh")]
    StateOfCharge { hour: usize, soc: f64, volume: f64 },
}
