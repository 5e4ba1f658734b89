use itertools::Itertools;

use crate::{
    prelude::*,
    quantity::energy::KilowattHours,
    tariff::{Tariff, TariffBand, TariffError},
};

/// Whether `units` falls under the inclusive `ceiling`. `None` admits everything.
pub fn is_within(units: KilowattHours, ceiling: Option<KilowattHours>) -> bool {
    ceiling.is_none_or(|ceiling| units <= ceiling)
}

/// Reject non-finite and negative consumption. `-0.0` comes back as `0.0`.
pub fn validate(units_consumed: KilowattHours) -> Result<KilowattHours, TariffError> {
    if units_consumed.is_finite() && units_consumed >= KilowattHours::ZERO {
        Ok(KilowattHours(units_consumed.0 + 0.0))
    } else {
        Err(TariffError::InvalidInput(units_consumed.0))
    }
}

impl Tariff {
    /// Find the bracket ceiling for the consumption: the smallest one that is not below it.
    pub fn bracket(&self, units_consumed: KilowattHours) -> Result<Option<KilowattHours>, TariffError> {
        let units_consumed = validate(units_consumed)?;
        self.bracket_ceilings
            .iter()
            .copied()
            .find(|ceiling| is_within(units_consumed, *ceiling))
            .ok_or_else(|| {
                TariffError::InconsistentState(format!(
                    "tariff `{}` has no bracket for {units_consumed}",
                    self.version,
                ))
            })
    }

    /// Select the ordered bands applicable to the consumption.
    ///
    /// The bracket takes every band starting at or below its ceiling, and the last of them
    /// is cut off at the ceiling.
    pub fn select(&self, units_consumed: KilowattHours) -> Result<Vec<TariffBand>, TariffError> {
        let ceiling = self.bracket(units_consumed)?;
        debug!(%units_consumed, ?ceiling, "selected the bracket");
        let bands = self
            .bands
            .iter()
            .take_while(|band| is_within(band.from_unit, ceiling))
            .map(|band| TariffBand {
                to_unit: match (band.to_unit, ceiling) {
                    (Some(to_unit), Some(ceiling)) => Some(to_unit.min(ceiling)),
                    (None, ceiling) => ceiling,
                    (to_unit, None) => to_unit,
                },
                ..*band
            })
            .collect_vec();
        if bands.is_empty() {
            return Err(TariffError::InconsistentState(format!(
                "tariff `{}` has no bands below {ceiling:?}",
                self.version,
            )));
        }
        Ok(bands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::rate::KilowattHourRate;

    fn ends(bands: &[TariffBand]) -> Vec<(f64, Option<f64>)> {
        bands
            .iter()
            .map(|band| (band.from_unit.0, band.to_unit.map(|to_unit| to_unit.0)))
            .collect()
    }

    #[test]
    fn test_bracket_boundaries_are_inclusive() -> Result {
        let tariff = Tariff::CURRENT;
        assert_eq!(tariff.bracket(KilowattHours(0.0))?, Some(KilowattHours(100.0)));
        assert_eq!(tariff.bracket(KilowattHours(100.0))?, Some(KilowattHours(100.0)));
        assert_eq!(tariff.bracket(KilowattHours(100.5))?, Some(KilowattHours(200.0)));
        assert_eq!(tariff.bracket(KilowattHours(800.0))?, Some(KilowattHours(800.0)));
        assert_eq!(tariff.bracket(KilowattHours(801.0))?, Some(KilowattHours(1000.0)));
        assert_eq!(tariff.bracket(KilowattHours(1000.01))?, None);
        Ok(())
    }

    #[test]
    fn test_select_free_allowance_only() -> Result {
        let bands = Tariff::CURRENT.select(KilowattHours(50.0))?;
        assert_eq!(ends(&bands), [(1.0, Some(100.0))]);
        assert_eq!(bands[0].rate_per_unit, KilowattHourRate::ZERO);
        Ok(())
    }

    #[test]
    fn test_select_on_threshold_stays_in_lower_bracket() -> Result {
        assert_eq!(Tariff::CURRENT.select(KilowattHours(100.0))?.len(), 1);
        assert_eq!(Tariff::CURRENT.select(KilowattHours(200.0))?.len(), 2);
        assert_eq!(Tariff::CURRENT.select(KilowattHours(201.0))?.len(), 3);
        Ok(())
    }

    #[test]
    fn test_select_truncates_last_band_to_ceiling() -> Result {
        assert_eq!(
            ends(&Tariff::CURRENT.select(KilowattHours(250.0))?),
            [(1.0, Some(100.0)), (101.0, Some(200.0)), (201.0, Some(300.0))],
        );
        assert_eq!(
            ends(&Tariff::CURRENT.select(KilowattHours(350.0))?),
            [(1.0, Some(100.0)), (101.0, Some(200.0)), (201.0, Some(400.0))],
        );
        let bands = Tariff::CURRENT.select(KilowattHours(650.0))?;
        assert_eq!(ends(&bands).last(), Some(&(601.0, Some(700.0))));
        assert_eq!(bands.last().map(|band| band.rate_per_unit), Some(KilowattHourRate(9.45)));
        Ok(())
    }

    #[test]
    fn test_select_open_ended() -> Result {
        let bands = Tariff::CURRENT.select(KilowattHours(5000.0))?;
        assert_eq!(bands.len(), 8);
        assert_eq!(ends(&bands).last(), Some(&(1001.0, None)));
        Ok(())
    }

    #[test]
    fn test_select_rejects_invalid_input() {
        for units in [-1.0, -0.001, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                Tariff::CURRENT.select(KilowattHours(units)),
                Err(TariffError::InvalidInput(_)),
            ));
        }
    }

    #[test]
    fn test_validate_normalises_negative_zero() -> Result {
        assert!(validate(KilowattHours(-0.0))?.0.is_sign_positive());
        assert_eq!(validate(KilowattHours(42.0))?, KilowattHours(42.0));
        Ok(())
    }

    #[test]
    fn test_select_without_unbounded_bracket() {
        let tariff = Tariff { bracket_ceilings: &[Some(KilowattHours(100.0))], ..Tariff::CURRENT };
        assert!(matches!(
            tariff.select(KilowattHours(101.0)),
            Err(TariffError::InconsistentState(_)),
        ));
    }
}
