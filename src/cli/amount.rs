use clap::Parser;

use crate::{cli::SubsidyArgs, prelude::*, quantity::energy::KilowattHours, tariff::Tariff};

#[derive(Parser)]
pub struct AmountArgs {
    /// Units consumed over the period, in kilowatt-hours.
    #[clap(long, env = "UNITS_CONSUMED")]
    pub units: KilowattHours,

    #[clap(flatten)]
    pub subsidy: SubsidyArgs,
}

#[instrument(skip_all, fields(units = %args.units))]
pub fn amount(args: &AmountArgs) -> Result {
    let bill = Tariff::CURRENT.bill(args.units, args.subsidy.policy)?;
    println!("{:.2}", bill.final_amount().0);
    Ok(())
}
