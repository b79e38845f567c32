//! Money, weight, distance and volume value types.
//!
//! All stored quantities are integers (or exact decimals for cubic feet).
//! Arithmetic on intermediate values happens in [`Decimal`], and a price is
//! rounded to whole cents exactly once, through [`Cents::round_from`].

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An amount of money in whole cents. May be negative (fuel surcharges).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    /// Rounds a decimal amount of cents to the nearest whole cent,
    /// half away from zero.
    ///
    /// # Example
    ///
    /// ```
    /// use tariff_engine::models::Cents;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Cents::round_from(Decimal::new(2497704, 1)).unwrap(), Cents(249770));
    /// assert_eq!(Cents::round_from(Decimal::new(25, 1)).unwrap(), Cents(3));
    /// assert_eq!(Cents::round_from(Decimal::new(-25, 1)).unwrap(), Cents(-3));
    /// ```
    pub fn round_from(amount: Decimal) -> EngineResult<Self> {
        amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Cents)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("{} cents does not fit in a price", amount),
            })
    }

    /// The amount as a decimal number of cents.
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }

    /// The amount as a decimal number of dollars.
    pub fn to_dollars(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

/// Multiplies `factors` together, failing instead of overflowing.
///
/// ```
/// use tariff_engine::models::checked_product;
/// use rust_decimal::Decimal;
///
/// let total = checked_product(&[Decimal::new(25, 1), Decimal::from(4)]).unwrap();
/// assert_eq!(total, Decimal::from(10));
/// assert!(checked_product(&[Decimal::MAX, Decimal::TWO]).is_err());
/// ```
pub fn checked_product(factors: &[Decimal]) -> EngineResult<Decimal> {
    factors.iter().try_fold(Decimal::ONE, |total, factor| {
        total
            .checked_mul(*factor)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("{} * {} overflowed", total, factor),
            })
    })
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount of money in thousandths of a cent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Millicents(pub i64);

impl Millicents {
    /// The amount as a decimal number of cents.
    pub fn to_cents_decimal(self) -> Decimal {
        Decimal::new(self.0, 3)
    }

    /// The amount as a decimal number of dollars.
    pub fn to_dollars(self) -> Decimal {
        Decimal::new(self.0, 5)
    }

    /// `self - other`, or a calculation error when the difference does not
    /// fit in an `i64`.
    pub fn checked_sub(self, other: Millicents) -> EngineResult<Millicents> {
        self.0
            .checked_sub(other.0)
            .map(Millicents)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("{} - {} millicents overflowed", self.0, other.0),
            })
    }
}

impl fmt::Display for Millicents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A weight in whole pounds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Pound(pub i64);

impl Pound {
    /// The weight in hundredweight (pounds / 100).
    ///
    /// ```
    /// use tariff_engine::models::Pound;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Pound(4025).to_cwt(), Decimal::new(4025, 2));
    /// ```
    pub fn to_cwt(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// The weight as a decimal number of pounds.
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl fmt::Display for Pound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A distance in whole miles.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Miles(pub i64);

impl Miles {
    /// The distance as a decimal multiplier.
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl fmt::Display for Miles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A billed crate volume in cubic feet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicFeet(pub Decimal);

impl fmt::Display for CubicFeet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
