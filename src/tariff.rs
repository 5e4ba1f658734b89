//! Progressive slab tariff and the billing pipeline built on top of it:
//! bracket selection, charge aggregation, subsidies and bill assembly.

mod bill;
mod charges;
mod error;
mod schedule;
mod subsidy;

use serde::Serialize;

pub use self::{
    bill::BillBreakdown,
    charges::{Slab, aggregate},
    error::TariffError,
    subsidy::SubsidyPolicy,
};
use crate::{
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// Contiguous unit range billed at one rate. Both ends are inclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffBand {
    pub from_unit: KilowattHours,

    /// `None` for the open-ended top band.
    pub to_unit: Option<KilowattHours>,

    pub rate_per_unit: KilowattHourRate,
}

impl TariffBand {
    const fn bounded(from_unit: f64, to_unit: f64, rate_per_unit: f64) -> Self {
        Self {
            from_unit: KilowattHours(from_unit),
            to_unit: Some(KilowattHours(to_unit)),
            rate_per_unit: KilowattHourRate(rate_per_unit),
        }
    }

    const fn unbounded(from_unit: f64, rate_per_unit: f64) -> Self {
        Self {
            from_unit: KilowattHours(from_unit),
            to_unit: None,
            rate_per_unit: KilowattHourRate(rate_per_unit),
        }
    }

    /// Number of units the band can hold, `None` if unbounded.
    pub fn width(&self) -> Option<KilowattHours> {
        self.to_unit.map(|to_unit| to_unit - self.from_unit + KilowattHours(1.0))
    }
}

/// Bracket-specific lump-sum subsidy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BracketSubsidy {
    /// Inclusive upper bound of the bracket, `None` for «everything above».
    pub ceiling: Option<KilowattHours>,

    pub amount: Cost,
}

impl BracketSubsidy {
    const fn up_to(ceiling: f64, amount: f64) -> Self {
        Self { ceiling: Some(KilowattHours(ceiling)), amount: Cost(amount) }
    }

    const fn above(amount: f64) -> Self {
        Self { ceiling: None, amount: Cost(amount) }
    }
}

/// Complete rate schedule together with its subsidy rules.
#[derive(Copy, Clone, Debug)]
pub struct Tariff {
    /// Tag identifying the schedule revision, recorded in every bill.
    pub version: &'static str,

    /// The progressive band prefix shared by all brackets, ordered by `from_unit`.
    pub bands: &'static [TariffBand],

    /// Inclusive bracket ceilings in ascending order, terminated by `None`.
    pub bracket_ceilings: &'static [Option<KilowattHours>],

    /// Ordered like [`Tariff::bracket_ceilings`]: the first matching entry wins.
    pub bracket_subsidies: &'static [BracketSubsidy],

    /// Unconditional credit applied on top of the bracket subsidy.
    pub flat_subsidy: Cost,
}

impl Tariff {
    pub const CURRENT: Self = Self {
        version: "domestic-2024.1",
        bands: &[
            TariffBand::bounded(1.0, 100.0, 0.0),
            TariffBand::bounded(101.0, 200.0, 2.35),
            TariffBand::bounded(201.0, 400.0, 4.70),
            TariffBand::bounded(401.0, 500.0, 6.30),
            TariffBand::bounded(501.0, 600.0, 8.40),
            TariffBand::bounded(601.0, 800.0, 9.45),
            TariffBand::bounded(801.0, 1000.0, 10.50),
            TariffBand::unbounded(1001.0, 11.55),
        ],
        bracket_ceilings: &[
            Some(KilowattHours(100.0)),
            Some(KilowattHours(200.0)),
            Some(KilowattHours(300.0)),
            Some(KilowattHours(400.0)),
            Some(KilowattHours(500.0)),
            Some(KilowattHours(600.0)),
            Some(KilowattHours(700.0)),
            Some(KilowattHours(800.0)),
            Some(KilowattHours(1000.0)),
            None,
        ],
        bracket_subsidies: &[
            BracketSubsidy::up_to(300.0, 255.0),
            BracketSubsidy::up_to(500.0, 280.0),
            BracketSubsidy::up_to(700.0, 255.0),
            BracketSubsidy::up_to(800.0, 80.0),
            BracketSubsidy::above(80.0),
        ],
        flat_subsidy: Cost(480.0),
    };

    /// Run the whole pipeline: select the schedule, price the slabs, apply the subsidies,
    /// and assemble the bill.
    #[instrument(skip(self), fields(version = self.version), err)]
    pub fn bill(
        &self,
        units_consumed: KilowattHours,
        subsidy_policy: SubsidyPolicy,
    ) -> Result<BillBreakdown, TariffError> {
        let units_consumed = schedule::validate(units_consumed)?;
        let bands = self.select(units_consumed)?;
        let (slabs, energy_charges) = aggregate(&bands, units_consumed);
        let subsidy = self.apply_subsidy(subsidy_policy, energy_charges, units_consumed)?;
        let bill = BillBreakdown::builder()
            .tariff_version(self.version)
            .subsidy_policy(subsidy_policy)
            .units_consumed(units_consumed)
            .slabs(slabs)
            .energy_charges(energy_charges)
            .bracket_subsidy(subsidy.bracket)
            .flat_subsidy(subsidy.flat)
            .net_amount(subsidy.net_amount)
            .assemble()?;
        info!(
            %units_consumed,
            energy_charges = %bill.energy_charges(),
            final_amount = %bill.final_amount(),
            "assembled the bill",
        );
        if bill.final_amount() < Cost::ZERO {
            warn!(final_amount = %bill.final_amount(), "subsidies exceed the energy charges");
        }
        Ok(bill)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_current_bands_are_contiguous() {
        for (band, next) in Tariff::CURRENT.bands.iter().tuple_windows() {
            assert_eq!(band.to_unit.map(|to_unit| to_unit + KilowattHours(1.0)), Some(next.from_unit));
        }
    }

    #[test]
    fn test_current_bands_are_progressive() {
        let bands = Tariff::CURRENT.bands;
        assert_eq!(bands[0].from_unit, KilowattHours(1.0));
        assert_eq!(bands[0].rate_per_unit, KilowattHourRate::ZERO);
        assert!(bands.iter().tuple_windows().all(|(band, next)| band.rate_per_unit <= next.rate_per_unit));
        assert_eq!(bands.last().and_then(|band| band.to_unit), None);
    }

    #[test]
    fn test_current_brackets_are_ascending_and_terminated() {
        let ceilings = Tariff::CURRENT.bracket_ceilings;
        assert_eq!(ceilings.last(), Some(&None));
        assert!(ceilings.iter().flatten().tuple_windows().all(|(ceiling, next)| ceiling < next));
        assert_eq!(Tariff::CURRENT.bracket_subsidies.last().map(|subsidy| subsidy.ceiling), Some(None));
    }

    #[test]
    fn test_width() {
        assert_eq!(Tariff::CURRENT.bands[2].width(), Some(KilowattHours(200.0)));
        assert_eq!(Tariff::CURRENT.bands[7].width(), None);
    }

    #[test]
    fn test_bill_standard_300() -> Result {
        let bill = Tariff::CURRENT.bill(KilowattHours(300.0), SubsidyPolicy::Standard)?;
        // 100 × 2.35 + 100 × 4.70
        assert_eq!(bill.energy_charges(), Cost(705.0));
        assert_eq!(bill.bracket_subsidy(), Cost(255.0));
        assert_eq!(bill.flat_subsidy(), Cost(480.0));
        assert_eq!(bill.net_amount(), Cost(-30.0));
        assert_eq!(bill.final_amount(), bill.net_amount());
        Ok(())
    }

    #[test]
    fn test_bill_unsubsidised_1200() -> Result {
        let bill = Tariff::CURRENT.bill(KilowattHours(1200.0), SubsidyPolicy::Unsubsidised)?;
        // 235 + 940 + 630 + 840 + 1890 + 2100 + 2310
        assert_eq!(bill.energy_charges(), Cost(8945.0));
        assert_eq!(bill.final_amount(), Cost(8945.0));
        assert_eq!(bill.slabs().len(), 8);
        assert_eq!(bill.tariff_version(), Tariff::CURRENT.version);
        Ok(())
    }

    #[test]
    fn test_bill_standard_free_allowance_goes_negative() -> Result {
        let bill = Tariff::CURRENT.bill(KilowattHours(50.0), SubsidyPolicy::Standard)?;
        assert_eq!(bill.slabs().len(), 1);
        assert_eq!(bill.energy_charges(), Cost::ZERO);
        assert_eq!(bill.final_amount(), Cost(-735.0));
        Ok(())
    }

    #[test]
    fn test_bill_rejects_nan() {
        assert!(matches!(
            Tariff::CURRENT.bill(KilowattHours(f64::NAN), SubsidyPolicy::Standard),
            Err(TariffError::InvalidInput(_)),
        ));
    }

    #[test]
    fn test_bill_rejects_overflowing_charges() {
        assert!(matches!(
            Tariff::CURRENT.bill(KilowattHours(1e308), SubsidyPolicy::Standard),
            Err(TariffError::InconsistentState(_)),
        ));
        assert!(matches!(
            Tariff::CURRENT.bill(KilowattHours(f64::MAX), SubsidyPolicy::Unsubsidised),
            Err(TariffError::InconsistentState(_)),
        ));
    }

    #[test]
    fn test_bill_negative_zero_is_zero() -> Result {
        let bill = Tariff::CURRENT.bill(KilowattHours(-0.0), SubsidyPolicy::Unsubsidised)?;
        assert!(bill.units_consumed().0.is_sign_positive());
        assert!(bill.slabs()[0].units_in_band.0.is_sign_positive());
        assert_eq!(bill.slabs()[0].units_in_band.to_string(), "0.00 kWh");
        Ok(())
    }

    #[test]
    fn test_bill_is_deterministic() -> Result {
        let first = Tariff::CURRENT.bill(KilowattHours(734.5), SubsidyPolicy::Standard)?;
        let second = Tariff::CURRENT.bill(KilowattHours(734.5), SubsidyPolicy::Standard)?;
        assert_eq!(first, second);
        Ok(())
    }
}
