quantity!(Cost, suffix: "₹", precision: 2);

impl Cost {
    pub const fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Round to whole currency units, half away from zero.
    #[must_use]
    pub fn round_whole(self) -> Self {
        Self(self.0.round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_whole_half_away_from_zero() {
        assert_eq!(Cost(117.5).round_whole(), Cost(118.0));
        assert_eq!(Cost(117.49).round_whole(), Cost(117.0));
        assert_eq!(Cost(-0.5).round_whole(), Cost(-1.0));
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Cost(-735.0).to_string(), "-735.00 ₹");
    }
}
