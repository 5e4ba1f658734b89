use crate::{
    prelude::*,
    tables::{build_band_table, build_subsidy_table},
    tariff::Tariff,
};

pub fn print_tariff() {
    let tariff = Tariff::CURRENT;
    info!(version = tariff.version, "current tariff");
    println!("{}", build_band_table(&tariff));
    println!("{}", build_subsidy_table(&tariff));
}
