quantity!(
    /// Price of one kilowatt-hour.
    KilowattHourRate, suffix: "₹/kWh", precision: 2
);
