//! Precision-checked decimal values for monetary and quantity fields.
//!
//! A [`DecimalValue`] stores a raw [`Decimal`] together with an optional
//! maximum fractional-digit count. Construction *validates* the digit count
//! and never rounds; rounding (half away from zero) happens only in the
//! derived [`DecimalValue::value_rounded`] view and in textual rendering.
//! Arithmetic returns raw [`Decimal`] results rather than new wrappers, so a
//! derived figure must be explicitly re-validated before it is persisted —
//! precision cannot silently creep through chained operations.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::error::FacturError;

/// An immutable decimal with an optional maximum number of fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalValue {
    raw: Decimal,
    scale: Option<u32>,
}

impl DecimalValue {
    /// Create a value, checking that `raw` does not exceed `scale` fractional
    /// digits. This is a strict format check — no rounding is applied.
    pub fn new(raw: Decimal, scale: Option<u32>) -> Result<Self, FacturError> {
        if let Some(max) = scale {
            let digits = raw.normalize().scale();
            if digits > max {
                return Err(FacturError::Precision(format!(
                    "value {raw} has {digits} fractional digits, at most {max} allowed"
                )));
            }
        }
        Ok(Self { raw, scale })
    }

    /// Create a value with no scale restriction.
    pub fn unscaled(raw: Decimal) -> Self {
        Self { raw, scale: None }
    }

    /// The stored raw value.
    pub fn value(&self) -> Decimal {
        self.raw
    }

    /// The maximum fractional-digit count, if restricted.
    pub fn scale(&self) -> Option<u32> {
        self.scale
    }

    /// The raw value rounded half away from zero to `scale` digits.
    /// Returns the raw value unchanged when no scale is set. Never mutates.
    pub fn value_rounded(&self) -> Decimal {
        match self.scale {
            Some(s) => round_half_away(self.raw, s),
            None => self.raw,
        }
    }

    /// Raw sum of both operands, rounded to `out_scale` when given.
    pub fn add(&self, other: &DecimalValue, out_scale: Option<u32>) -> Decimal {
        apply_scale(self.raw + other.raw, out_scale)
    }

    /// Raw difference of both operands, rounded to `out_scale` when given.
    pub fn sub(&self, other: &DecimalValue, out_scale: Option<u32>) -> Decimal {
        apply_scale(self.raw - other.raw, out_scale)
    }

    /// Raw product of both operands, rounded to `out_scale` when given.
    pub fn mul(&self, other: &DecimalValue, out_scale: Option<u32>) -> Decimal {
        apply_scale(self.raw * other.raw, out_scale)
    }

    /// Raw quotient of both operands, rounded to `out_scale` when given.
    /// Fails with [`FacturError::DivisionByZero`] on a zero right operand.
    pub fn div(&self, other: &DecimalValue, out_scale: Option<u32>) -> Result<Decimal, FacturError> {
        let quotient = self
            .raw
            .checked_div(other.raw)
            .ok_or(FacturError::DivisionByZero)?;
        Ok(apply_scale(quotient, out_scale))
    }
}

impl fmt::Display for DecimalValue {
    /// Renders the *rounded* value, zero-padded to `scale` digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scale {
            Some(s) => {
                let mut rounded = self.value_rounded();
                rounded.rescale(s);
                write!(f, "{rounded}")
            }
            None => write!(f, "{}", self.raw),
        }
    }
}

/// Round half away from zero (commercial rounding, as EN 16931 expects for
/// tax figures).
pub(crate) fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

fn apply_scale(value: Decimal, out_scale: Option<u32>) -> Decimal {
    match out_scale {
        Some(s) => round_half_away(value, s),
        None => value,
    }
}

macro_rules! scaled_value {
    ($(#[$doc:meta])* $name:ident, $scale:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name(DecimalValue);

        impl $name {
            /// Maximum number of fractional digits.
            pub const SCALE: u32 = $scale;

            /// The zero value.
            pub const ZERO: Self = Self(DecimalValue {
                raw: Decimal::ZERO,
                scale: Some(Self::SCALE),
            });

            /// Create from a raw decimal; fails when `raw` carries more than
            /// [`Self::SCALE`] fractional digits.
            pub fn new(raw: Decimal) -> Result<Self, FacturError> {
                DecimalValue::new(raw, Some(Self::SCALE)).map(Self)
            }

            /// The stored raw value.
            pub fn value(&self) -> Decimal {
                self.0.value()
            }

            /// The raw value rounded half away from zero to [`Self::SCALE`].
            pub fn value_rounded(&self) -> Decimal {
                self.0.value_rounded()
            }

            /// Raw sum, rounded to `out_scale` when given.
            pub fn add(&self, other: &Self, out_scale: Option<u32>) -> Decimal {
                self.0.add(&other.0, out_scale)
            }

            /// Raw difference, rounded to `out_scale` when given.
            pub fn sub(&self, other: &Self, out_scale: Option<u32>) -> Decimal {
                self.0.sub(&other.0, out_scale)
            }

            /// Raw product, rounded to `out_scale` when given.
            pub fn mul(&self, other: &Self, out_scale: Option<u32>) -> Decimal {
                self.0.mul(&other.0, out_scale)
            }

            /// Raw quotient, rounded to `out_scale` when given; fails on a
            /// zero right operand.
            pub fn div(&self, other: &Self, out_scale: Option<u32>) -> Result<Decimal, FacturError> {
                self.0.div(&other.0, out_scale)
            }

            /// View as the underlying [`DecimalValue`].
            pub fn as_decimal_value(&self) -> &DecimalValue {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

scaled_value!(
    /// Monetary amount (BT-92, BT-106..BT-115, BT-116/117, BT-131): 2 fractional digits.
    Amount,
    2
);
scaled_value!(
    /// Invoiced quantity (BT-129, BT-149): 4 fractional digits.
    Quantity,
    4
);
scaled_value!(
    /// Item net/gross unit price (BT-146, BT-148): 4 fractional digits.
    UnitPrice,
    4
);
scaled_value!(
    /// Percentage rate (BT-94, BT-101, BT-119, BT-152): 2 fractional digits.
    Percentage,
    2
);
scaled_value!(
    /// Whole-number value: no fractional digits.
    IntegerValue,
    0
);
