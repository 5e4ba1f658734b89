use serde::Serialize;

use crate::{
    quantity::{cost::Cost, energy::KilowattHours},
    tariff::TariffBand,
};

/// Band materialised for one bill.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slab {
    #[serde(flatten)]
    pub band: TariffBand,

    pub units_in_band: KilowattHours,

    /// Not rounded.
    pub amount: Cost,
}

impl Slab {
    fn new(band: TariffBand, units_in_band: KilowattHours) -> Self {
        Self { band, units_in_band, amount: units_in_band * band.rate_per_unit }
    }
}

/// Split the consumption over the selected bands and sum up the energy charges.
///
/// The last band takes whatever is left so that the slab units always add up to the
/// consumption. The total is rounded once, slab amounts stay fractional.
pub fn aggregate(bands: &[TariffBand], units_consumed: KilowattHours) -> (Vec<Slab>, Cost) {
    let mut remaining = units_consumed;
    let slabs: Vec<Slab> = bands
        .iter()
        .enumerate()
        .map(|(index, band)| {
            let units_in_band = if index + 1 == bands.len() {
                remaining.max(KilowattHours::ZERO)
            } else {
                let upper = band.to_unit.map_or(units_consumed, |to_unit| to_unit.min(units_consumed));
                (upper - band.from_unit + KilowattHours(1.0)).max(KilowattHours::ZERO)
            };
            remaining -= units_in_band;
            Slab::new(*band, units_in_band)
        })
        .collect();
    let energy_charges = slabs.iter().map(|slab| slab.amount).sum::<Cost>().round_whole();
    (slabs, energy_charges)
}
