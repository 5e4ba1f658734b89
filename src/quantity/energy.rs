use std::ops::Mul;

use crate::quantity::{cost::Cost, rate::KilowattHourRate};

quantity!(
    /// Metered electricity, also used for meter readings and band boundaries.
    KilowattHours, suffix: "kWh", precision: 2
);

impl KilowattHours {
    pub const fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    fn mul(self, rhs: KilowattHourRate) -> Self::Output {
        Cost(self.0 * rhs.0)
    }
}
