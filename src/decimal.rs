use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Sub};
use std::str::FromStr;

/// internal precision for intermediate money values
const MONEY_DP: u32 = 8;

/// money type; intermediate values keep 8 places, payments are rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(from = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(MONEY_DP))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(MONEY_DP)))
    }

    /// create from integer amount (reais, dollars, euros)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from cents
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// multiply by a count of periods
    pub fn times(&self, periods: u32) -> Self {
        Money((self.0 * Decimal::from(periods)).round_dp(MONEY_DP))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(MONEY_DP))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(MONEY_DP))
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money((self.0 / other).round_dp(MONEY_DP))
    }
}

/// per-period interest rate, stored as a decimal fraction (0.02 == 2%)
///
/// The unit is fixed at construction: callers holding a percentage use
/// [`Rate::from_percent`], callers holding a fraction use [`Rate::from_decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal (e.g., 0.02 for 2%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from a percentage figure (e.g., 1.5 for 1.5%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(percentage_to_decimal(p))
    }

    /// get as decimal fraction
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage; `None` when the fraction is too large to scale
    pub fn as_percentage(&self) -> Option<Decimal> {
        self.0.checked_mul(Decimal::ONE_HUNDRED)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_percentage() {
            Some(percent) => write!(f, "{}%", percent.normalize()),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

/// convert a percentage figure to a decimal fraction (12 -> 0.12)
pub fn percentage_to_decimal(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

/// convert a decimal fraction to a percentage figure (0.12 -> 12)
pub fn decimal_to_percentage(fraction: Decimal) -> Decimal {
    fraction * Decimal::ONE_HUNDRED
}

/// rounding applied when a payment is settled to cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// midpoint rounds away from zero (0.005 -> 0.01)
    #[default]
    HalfUp,
    /// midpoint rounds to the even neighbour (0.005 -> 0.00)
    HalfEven,
}

impl RoundingPolicy {
    pub fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingPolicy::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingPolicy::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}
