use chrono::{Local, NaiveDateTime, TimeDelta, Timelike};
use clap::Parser;

use crate::{
    cli::{ReadingArgs, SubsidyArgs},
    prelude::*,
    reading::MeterReadings,
    tables::{build_header_table, build_slab_table, build_totals_table},
    tariff::Tariff,
};

#[derive(Parser)]
pub struct BillArgs {
    #[clap(flatten)]
    pub readings: ReadingArgs,

    #[clap(flatten)]
    pub subsidy: SubsidyArgs,

    /// Days between the bill date and the due date.
    #[clap(long, default_value = "15", env = "DUE_IN_DAYS")]
    pub due_in_days: u32,

    /// Print the bill as JSON instead of tables.
    #[clap(long)]
    pub json: bool,
}

/// `BILL-YYYYMMDD-NNNN`, the four-digit suffix taken from the sub-second part of the issue time.
fn bill_number(issued_at: NaiveDateTime) -> String {
    format!("BILL-{}-{}", issued_at.format("%Y%m%d"), 1000 + issued_at.nanosecond() / 1_000 % 9000)
}

#[instrument(skip_all)]
pub fn bill(args: &BillArgs) -> Result {
    let readings = MeterReadings::from(args.readings);
    let units_consumed = readings.consumption().with_context(|| {
        format!("failed to derive consumption from readings {} → {}", readings.previous, readings.current)
    })?;
    let bill = Tariff::CURRENT.bill(units_consumed, args.subsidy.policy)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bill)?);
        return Ok(());
    }

    let issued_at = Local::now().naive_local();
    let issued_on = issued_at.date();
    let due_on = issued_on + TimeDelta::days(i64::from(args.due_in_days));
    let bill_number = bill_number(issued_at);
    info!(%bill_number, %issued_on, %due_on, "issuing the bill");
    println!("{}", build_header_table(&bill_number, readings, units_consumed, issued_on, due_on));
    println!("{}", build_slab_table(&bill));
    println!("{}", build_totals_table(&bill));
    Ok(())
}
