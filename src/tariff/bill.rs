use bon::bon;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    quantity::{cost::Cost, energy::KilowattHours},
    tariff::{Slab, SubsidyPolicy, TariffError},
};

/// Slab units may drift from the consumption by floating-point noise only.
const UNIT_TOLERANCE: f64 = 1e-9;

/// Itemised bill: what the display renders and what the payment takes [`Self::final_amount`] from.
///
/// There are no setters: a new computation always produces a fresh bill.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillBreakdown {
    tariff_version: &'static str,
    subsidy_policy: SubsidyPolicy,
    units_consumed: KilowattHours,
    slabs: Vec<Slab>,
    energy_charges: Cost,
    bracket_subsidy: Cost,
    flat_subsidy: Cost,
    net_amount: Cost,
    final_amount: Cost,
}

#[bon]
impl BillBreakdown {
    /// Package the pipeline results, re-checking that every amount is finite and that
    /// the slabs fit their bands, cover the consumption exactly and follow each other without gaps.
    #[builder(finish_fn = assemble)]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tariff_version: &'static str,
        subsidy_policy: SubsidyPolicy,
        units_consumed: KilowattHours,
        slabs: Vec<Slab>,
        energy_charges: Cost,
        bracket_subsidy: Cost,
        flat_subsidy: Cost,
        net_amount: Cost,
    ) -> Result<Self, TariffError> {
        if let Some(slab) = slabs.iter().find(|slab| !slab.amount.is_finite()) {
            return Err(TariffError::InconsistentState(format!(
                "slab starting at {} costs {}",
                slab.band.from_unit, slab.amount,
            )));
        }
        if !energy_charges.is_finite() || !net_amount.is_finite() {
            return Err(TariffError::InconsistentState(format!(
                "money overflow: energy charges {energy_charges}, net amount {net_amount}",
            )));
        }
        let slab_units: KilowattHours = slabs.iter().map(|slab| slab.units_in_band).sum();
        if (slab_units - units_consumed).0.abs() > UNIT_TOLERANCE * units_consumed.0.max(1.0) {
            return Err(TariffError::InconsistentState(format!(
                "slabs hold {slab_units} but {units_consumed} were consumed",
            )));
        }
        if let Some(slab) = slabs.iter().find(|slab| {
            slab.units_in_band < KilowattHours::ZERO
                || slab.band.width().is_some_and(|width| slab.units_in_band > width)
        }) {
            return Err(TariffError::InconsistentState(format!(
                "slab starting at {} holds {}",
                slab.band.from_unit, slab.units_in_band,
            )));
        }
        if let Some((slab, next)) = slabs.iter().tuple_windows().find(|(slab, next)| {
            slab.band.to_unit.map(|to_unit| to_unit + KilowattHours(1.0)) != Some(next.band.from_unit)
        }) {
            return Err(TariffError::InconsistentState(format!(
                "slab ending at {:?} is followed by one starting at {}",
                slab.band.to_unit, next.band.from_unit,
            )));
        }
        Ok(Self {
            tariff_version,
            subsidy_policy,
            units_consumed,
            slabs,
            energy_charges,
            bracket_subsidy,
            flat_subsidy,
            net_amount,
            final_amount: net_amount,
        })
    }
}

impl BillBreakdown {
    pub const fn tariff_version(&self) -> &'static str {
        self.tariff_version
    }

    pub const fn subsidy_policy(&self) -> SubsidyPolicy {
        self.subsidy_policy
    }

    pub const fn units_consumed(&self) -> KilowattHours {
        self.units_consumed
    }

    pub fn slabs(&self) -> &[Slab] {
        &self.slabs
    }

    /// Rounded sum of the slab amounts, before subsidies.
    pub const fn energy_charges(&self) -> Cost {
        self.energy_charges
    }

    pub const fn bracket_subsidy(&self) -> Cost {
        self.bracket_subsidy
    }

    pub const fn flat_subsidy(&self) -> Cost {
        self.flat_subsidy
    }

    pub const fn net_amount(&self) -> Cost {
        self.net_amount
    }

    /// Amount to charge. May be negative when the subsidies exceed the energy charges.
    pub const fn final_amount(&self) -> Cost {
        self.final_amount
    }
}
