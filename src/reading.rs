use crate::{quantity::energy::KilowattHours, tariff::TariffError};

/// Two consecutive meter readings of one billing period.
#[derive(Copy, Clone, Debug)]
pub struct MeterReadings {
    pub previous: KilowattHours,
    pub current: KilowattHours,
}

impl MeterReadings {
    /// Units consumed over the period.
    ///
    /// A current reading below the previous one is rejected rather than treated as a meter
    /// rollover.
    pub fn consumption(self) -> Result<KilowattHours, TariffError> {
        for reading in [self.previous, self.current] {
            if !reading.is_finite() {
                return Err(TariffError::InvalidInput(reading.0));
            }
        }
        let consumption = self.current - self.previous;
        if consumption < KilowattHours::ZERO {
            return Err(TariffError::InvalidInput(consumption.0));
        }
        Ok(consumption)
    }
}
