//! Integer money amounts in minor units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Amount in minor units (kopiyky, cents): the display value times 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(pub i64);

impl MinorUnits {
    /// Minor units per major unit.
    pub const SCALE: i64 = 100;

    /// Whole major units, truncated toward zero.
    #[inline]
    pub fn major(self) -> i64 {
        self.0 / Self::SCALE
    }

    /// Remaining minor units, always non-negative.
    #[inline]
    pub fn fraction(self) -> u8 {
        (self.0 % Self::SCALE).unsigned_abs() as u8
    }
}

impl From<i64> for MinorUnits {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Renders the value rounded to two decimals with trailing zeros dropped,
/// keeping at least one fractional digit: `123456` -> `1234.56`,
/// `-50` -> `-0.5`, `1200` -> `12.0`.
impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let major = self.major().unsigned_abs();
        let fraction = self.fraction();
        if fraction % 10 == 0 {
            write!(f, "{}{}.{}", sign, major, fraction / 10)
        } else {
            write!(f, "{}{}.{:02}", sign, major, fraction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(MinorUnits(123456).to_string(), "1234.56");
        assert_eq!(MinorUnits(101).to_string(), "1.01");
    }

    #[test]
    fn test_display_trims_trailing_zero() {
        assert_eq!(MinorUnits(-50).to_string(), "-0.5");
        assert_eq!(MinorUnits(1200).to_string(), "12.0");
        assert_eq!(MinorUnits(0).to_string(), "0.0");
    }

    #[test]
    fn test_display_small_negative() {
        assert_eq!(MinorUnits(-5).to_string(), "-0.05");
        assert_eq!(MinorUnits(-12345).to_string(), "-123.45");
    }

    #[test]
    fn test_major_and_fraction() {
        let value = MinorUnits(-1999);
        assert_eq!(value.major(), -19);
        assert_eq!(value.fraction(), 99);
    }

    #[test]
    fn test_serde_transparent() {
        let value: MinorUnits = serde_json::from_str("-4200").unwrap();
        assert_eq!(value, MinorUnits(-4200));
        assert_eq!(serde_json::to_string(&value).unwrap(), "-4200");
    }
}
