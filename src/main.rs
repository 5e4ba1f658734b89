#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod prelude;
mod quantity;
mod reading;
mod tables;
mod tariff;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, amount, bill, print_tariff},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Bill(args) => bill(&args)?,
        Command::Amount(args) => amount(&args)?,
        Command::Tariff => print_tariff(),
    }

    info!("done!");
    Ok(())
}
