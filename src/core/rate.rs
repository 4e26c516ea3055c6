use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;

/// A tax rate stored as a fraction (0.22 for 22%).
///
/// Dataset tables publish whole-number percentages; conversion happens here
/// and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    pub fn from_percent(percent: Decimal) -> Self {
        Rate(percent / dec!(100))
    }

    pub fn from_fraction(fraction: Decimal) -> Self {
        Rate(fraction)
    }

    pub fn fraction(&self) -> Decimal {
        self.0
    }

    pub fn percent(&self) -> Decimal {
        (self.0 * dec!(100)).normalize()
    }

    /// Apply the rate to an amount
    pub fn of(&self, amount: Decimal) -> Decimal {
        amount * self.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
