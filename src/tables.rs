use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
    reading::MeterReadings,
    tariff::{BillBreakdown, Tariff},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn upper_bound_cell(to_unit: Option<KilowattHours>) -> Cell {
    to_unit.map_or_else(|| Cell::new("∞"), |to_unit| Cell::new(format!("{:.0}", to_unit.0)))
        .set_alignment(CellAlignment::Right)
}

fn rate_cell(rate: KilowattHourRate) -> Cell {
    Cell::new(rate).set_alignment(CellAlignment::Right).fg(if rate <= KilowattHourRate::ZERO {
        Color::Green
    } else {
        Color::Reset
    })
}

fn credit_cell(amount: Cost) -> Cell {
    Cell::new(-amount).set_alignment(CellAlignment::Right).fg(if amount > Cost::ZERO {
        Color::Green
    } else {
        Color::Reset
    })
}

#[must_use]
pub fn build_header_table(
    bill_number: &str,
    readings: MeterReadings,
    units_consumed: KilowattHours,
    issued_on: NaiveDate,
    due_on: NaiveDate,
) -> Table {
    let mut table = new_table();
    table.add_row(vec![Cell::new("Bill number"), Cell::new(bill_number).add_attribute(Attribute::Bold)]);
    table.add_row(vec![Cell::new("Bill date"), Cell::new(issued_on.format("%B %-d, %Y"))]);
    table.add_row(vec![
        Cell::new("Due date"),
        Cell::new(due_on.format("%B %-d, %Y")).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Previous reading"),
        Cell::new(readings.previous).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Current reading"),
        Cell::new(readings.current).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Units consumed"),
        Cell::new(units_consumed).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
    ]);
    table
}

#[must_use]
pub fn build_slab_table(bill: &BillBreakdown) -> Table {
    let mut table = new_table();
    table.set_header(vec!["From", "To", "Units", "Rate", "Amount"]);
    for slab in bill.slabs() {
        table.add_row(vec![
            Cell::new(format!("{:.0}", slab.band.from_unit.0)).set_alignment(CellAlignment::Right),
            upper_bound_cell(slab.band.to_unit),
            Cell::new(slab.units_in_band).set_alignment(CellAlignment::Right),
            rate_cell(slab.band.rate_per_unit),
            Cell::new(slab.amount).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Energy charges").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(bill.units_consumed()).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
        Cell::new(""),
        Cell::new(bill.energy_charges()).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
    ]);
    table
}

#[must_use]
pub fn build_totals_table(bill: &BillBreakdown) -> Table {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Energy charges"),
        Cell::new(bill.energy_charges()).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![Cell::new("Bracket subsidy"), credit_cell(bill.bracket_subsidy())]);
    table.add_row(vec![Cell::new("Flat subsidy"), credit_cell(bill.flat_subsidy())]);
    table.add_row(vec![
        Cell::new("Net amount"),
        Cell::new(bill.net_amount()).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Amount due").add_attribute(Attribute::Bold),
        Cell::new(bill.final_amount())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold)
            .fg(if bill.final_amount() < Cost::ZERO { Color::Red } else { Color::Reset }),
    ]);
    table.add_row(vec![
        Cell::new("Tariff").add_attribute(Attribute::Dim),
        Cell::new(format!("{} ({:?} subsidy)", bill.tariff_version(), bill.subsidy_policy()))
            .add_attribute(Attribute::Dim),
    ]);
    table
}

#[must_use]
pub fn build_band_table(tariff: &Tariff) -> Table {
    let mut table = new_table();
    table.set_header(vec!["From", "To", "Rate"]);
    for band in tariff.bands {
        table.add_row(vec![
            Cell::new(format!("{:.0}", band.from_unit.0)).set_alignment(CellAlignment::Right),
            upper_bound_cell(band.to_unit),
            rate_cell(band.rate_per_unit),
        ]);
    }
    table
}

#[must_use]
pub fn build_subsidy_table(tariff: &Tariff) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Consumption up to", "Subsidy"]);
    for subsidy in tariff.bracket_subsidies {
        table.add_row(vec![
            upper_bound_cell(subsidy.ceiling),
            Cell::new(subsidy.amount).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Flat, always").add_attribute(Attribute::Dim),
        Cell::new(tariff.flat_subsidy).set_alignment(CellAlignment::Right),
    ]);
    table
}
