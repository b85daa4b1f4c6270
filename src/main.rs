#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod curve;
mod error;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Args, dispatch},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .without_time()
        .compact()
        .init();
    info!(version = crate_version!(), "starting…");

    dispatch(&Args::parse())?;

    info!("done!");
    Ok(())
}
