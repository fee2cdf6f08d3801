use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Number of fractional digits every amount carries.
pub const AMOUNT_SCALE: u32 = 2;

/// Non-negative money amount with two fractional digits.
///
/// Backed by [`Decimal`] so values such as `0.10` are exact. Every
/// constructor rounds to [`AMOUNT_SCALE`] places (banker's rounding) and pins
/// the scale, so `50` and `50.00` print the same way.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// assert_eq!("50".parse::<Amount>().unwrap().to_string(), "50.00");
/// assert_eq!("10,5".parse::<Amount>().unwrap().minor(), Some(1050));
/// assert!("-1".parse::<Amount>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Returns `0.00`.
    #[must_use]
    pub fn zero() -> Self {
        Self(Decimal::new(0, AMOUNT_SCALE))
    }

    /// Builds an amount from a decimal, rejecting negative values and values
    /// too large to carry two fractional digits.
    pub fn from_decimal(value: Decimal) -> Result<Self, EngineError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be >= 0, got {value}"
            )));
        }
        Self::pinned(value)
            .ok_or_else(|| EngineError::InvalidAmount(format!("amount out of range: {value}")))
    }

    /// Parses the digits captured from free text (`50`, `50,00`, `50.5`, `50.`).
    ///
    /// Returns `None` when the digits do not fit a [`Decimal`] at scale 2.
    pub(crate) fn from_captured(raw: &str) -> Option<Self> {
        let normalized = raw.replace(',', ".");
        let normalized = normalized.trim_end_matches('.');
        Decimal::from_str(normalized).ok().and_then(Self::pinned)
    }

    /// Rounds to [`AMOUNT_SCALE`] places. `None` when the mantissa has no room
    /// left for the fractional digits (`rescale` then keeps a smaller scale).
    fn pinned(value: Decimal) -> Option<Self> {
        let mut value = value
            .abs()
            .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven);
        value.rescale(AMOUNT_SCALE);
        (value.scale() == AMOUNT_SCALE).then_some(Self(value))
    }

    /// Returns the underlying decimal (always scale 2).
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Returns the amount in minor units (cents), if it fits an `i64`.
    #[must_use]
    pub fn minor(self) -> Option<i64> {
        let mut mantissa = self.0;
        mantissa.set_scale(0).ok()?;
        i64::try_from(mantissa).ok()
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = EngineError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl FromStr for Amount {
    type Err = EngineError;

    /// Parses a user supplied amount.
    ///
    /// Accepts `.` or `,` as decimal separator. Rejects empty, negative and
    /// non numeric strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }
        let value = Decimal::from_str(&trimmed.replace(',', "."))
            .map_err(|_| EngineError::InvalidAmount(format!("invalid amount: {trimmed}")))?;
        Self::from_decimal(value)
    }
}
