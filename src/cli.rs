mod amount;
mod bill;
mod tariff;

use clap::{Parser, Subcommand};

pub use self::{
    amount::{AmountArgs, amount},
    bill::{BillArgs, bill},
    tariff::print_tariff,
};
use crate::{quantity::energy::KilowattHours, reading::MeterReadings, tariff::SubsidyPolicy};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: calculate the itemised bill from two meter readings.
    #[clap(name = "bill")]
    Bill(Box<BillArgs>),

    /// Print only the amount to charge for the consumed units.
    #[clap(name = "amount")]
    Amount(AmountArgs),

    /// Print the rate schedule and the subsidy rules.
    #[clap(name = "tariff")]
    Tariff,
}

#[derive(Copy, Clone, Parser)]
pub struct ReadingArgs {
    /// Meter reading at the start of the period, in kilowatt-hours.
    #[clap(long, env = "PREVIOUS_READING")]
    pub previous: KilowattHours,

    /// Meter reading at the end of the period, in kilowatt-hours.
    #[clap(long, env = "CURRENT_READING")]
    pub current: KilowattHours,
}

impl From<ReadingArgs> for MeterReadings {
    fn from(args: ReadingArgs) -> Self {
        Self { previous: args.previous, current: args.current }
    }
}

#[derive(Copy, Clone, Parser)]
pub struct SubsidyArgs {
    #[clap(
        long = "subsidy",
        value_enum,
        default_value = "standard",
        env = "SUBSIDY_POLICY"
    )]
    pub policy: SubsidyPolicy,
}
