use serde::{Deserialize, Serialize};

use crate::{
    quantity::{cost::Cost, energy::KilowattHours},
    tariff::{Tariff, TariffError, schedule::is_within},
};

/// Which subsidy rules the bill follows.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SubsidyPolicy {
    /// Bracket subsidy plus the flat subsidy.
    #[default]
    Standard,

    /// Bill the raw energy charges.
    #[value(name = "none")]
    #[serde(rename = "none")]
    Unsubsidised,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Subsidy {
    pub bracket: Cost,
    pub flat: Cost,

    /// Energy charges minus both subsidies, not floored at zero.
    pub net_amount: Cost,
}

impl Tariff {
    pub fn bracket_subsidy(&self, units_consumed: KilowattHours) -> Result<Cost, TariffError> {
        self.bracket_subsidies
            .iter()
            .find(|subsidy| is_within(units_consumed, subsidy.ceiling))
            .map(|subsidy| subsidy.amount)
            .ok_or_else(|| {
                TariffError::InconsistentState(format!(
                    "tariff `{}` has no bracket subsidy for {units_consumed}",
                    self.version,
                ))
            })
    }

    pub fn apply_subsidy(
        &self,
        policy: SubsidyPolicy,
        energy_charges: Cost,
        units_consumed: KilowattHours,
    ) -> Result<Subsidy, TariffError> {
        let (bracket, flat) = match policy {
            SubsidyPolicy::Standard => (self.bracket_subsidy(units_consumed)?, self.flat_subsidy),
            SubsidyPolicy::Unsubsidised => (Cost::ZERO, Cost::ZERO),
        };
        Ok(Subsidy { bracket, flat, net_amount: energy_charges - bracket - flat })
    }
}
