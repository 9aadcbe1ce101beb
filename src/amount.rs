//! Exact minor-unit amounts.
//!
//! Amounts enter the generator as `rust_decimal::Decimal` values in major
//! currency units and are stored as whole minor units (hundredths), so the
//! fixed-width amount fields never see floating-point noise.

use crate::error::{AboError, Result};
use crate::format;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// A non-negative amount in minor currency units (major × 100).
///
/// Conversion rounds to the nearest minor unit with ties going to the even
/// neighbour (banker's rounding), so `0.125` becomes `12` and `0.135`
/// becomes `14`.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use rust_decimal::Decimal;
/// use abo_generator::MinorUnits;
///
/// let amount = MinorUnits::from_major(Decimal::from_str("123.456").unwrap()).unwrap();
/// assert_eq!(amount.value(), 12346);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MinorUnits(u64);

impl MinorUnits {
    /// Width of every amount field in the ABO layout.
    pub const WIDTH: usize = 15;

    /// Minor units per major unit.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = MinorUnits(0);

    /// Converts a major-unit amount into minor units.
    ///
    /// Fails with [`AboError::InvalidAmount`] for negative amounts and for
    /// amounts that do not fit into the 15-digit amount field.
    pub fn from_major(amount: Decimal) -> Result<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(AboError::InvalidAmount {
                amount,
                reason: "amount must not be negative",
            });
        }

        let too_large = AboError::InvalidAmount {
            amount,
            reason: "amount does not fit into 15 digits",
        };

        let minor = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven))
            .and_then(|rounded| rounded.to_u64());

        match minor {
            Some(value) if format::fits(u128::from(value), Self::WIDTH) => Ok(MinorUnits(value)),
            _ => Err(too_large),
        }
    }

    /// Wraps an already-converted minor-unit value.
    pub fn from_minor(value: u64) -> Self {
        MinorUnits(value)
    }

    /// Raw number of minor units.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The amount back in major units, with two decimal places.
    pub fn to_major(&self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), Self::SCALE)
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_major())
    }
}
