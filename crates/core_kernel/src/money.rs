//! Monetary amounts and cost ranges
//!
//! Repair costs are always expressed as a range between a minimum and a
//! maximum estimate. Amounts use rust_decimal so that threshold comparisons
//! (e.g. "claimed amount is below half the minimum estimate") are exact.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use thiserror::Error;

/// Errors raised when constructing a cost range
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CostRangeError {
    #[error("Negative cost bound: {0}")]
    NegativeBound(Decimal),

    #[error("Inverted cost range: min {min} exceeds max {max}")]
    Inverted { min: Decimal, max: Decimal },
}

/// A non-negative `[min, max]` cost estimate
///
/// The invariant `0 <= min <= max` holds for every value of this type,
/// including values produced by deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCostRange")]
pub struct CostRange {
    min: Decimal,
    max: Decimal,
}

#[derive(Deserialize)]
struct RawCostRange {
    min: Decimal,
    max: Decimal,
}

impl TryFrom<RawCostRange> for CostRange {
    type Error = CostRangeError;

    fn try_from(raw: RawCostRange) -> Result<Self, Self::Error> {
        CostRange::new(raw.min, raw.max)
    }
}

impl CostRange {
    /// Creates a validated cost range
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, CostRangeError> {
        if min.is_sign_negative() && !min.is_zero() {
            return Err(CostRangeError::NegativeBound(min));
        }
        if max.is_sign_negative() && !max.is_zero() {
            return Err(CostRangeError::NegativeBound(max));
        }
        if min > max {
            return Err(CostRangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Creates a range from whole-dollar bounds
    pub fn from_whole(min: u32, max: u32) -> Result<Self, CostRangeError> {
        Self::new(Decimal::from(min), Decimal::from(max))
    }

    /// A range with both bounds at zero
    pub fn zero() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::ZERO,
        }
    }

    /// Returns the lower bound
    pub fn min(&self) -> Decimal {
        self.min
    }

    /// Returns the upper bound
    pub fn max(&self) -> Decimal {
        self.max
    }

    /// Returns true if both bounds are zero
    pub fn is_zero(&self) -> bool {
        self.min.is_zero() && self.max.is_zero()
    }

    /// Midpoint of the range
    pub fn midpoint(&self) -> Decimal {
        self.min + (self.max - self.min) / dec!(2)
    }

    /// Returns true if `amount` falls inside the range (bounds inclusive)
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min && amount <= self.max
    }

    /// Scales both bounds by a non-negative factor
    ///
    /// Negative factors are treated as zero so the range invariant holds.
    /// Bounds saturate at `Decimal::MAX`.
    pub fn scale(&self, factor: Decimal) -> Self {
        let factor = factor.max(Decimal::ZERO);
        Self {
            min: self.min.saturating_mul(factor),
            max: self.max.saturating_mul(factor),
        }
    }
}

impl Default for CostRange {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for CostRange {
    type Output = Self;

    /// Elementwise sum, saturating at `Decimal::MAX`
    fn add(self, other: Self) -> Self {
        // Saturation is monotone, so min <= max still holds.
        Self {
            min: self.min.saturating_add(other.min),
            max: self.max.saturating_add(other.max),
        }
    }
}

impl Sum for CostRange {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(CostRange::zero(), |acc, range| acc + range)
    }
}

impl<'a> Sum<&'a CostRange> for CostRange {
    fn sum<I: Iterator<Item = &'a CostRange>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for CostRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", format_amount(self.min), format_amount(self.max))
    }
}

/// Formats an amount as US dollars with thousands separators, e.g. `$30,000.00`
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_range_creation() {
        let range = CostRange::new(dec!(1500), dec!(3500)).unwrap();
        assert_eq!(range.min(), dec!(1500));
        assert_eq!(range.max(), dec!(3500));
    }

    #[test]
    fn test_cost_range_rejects_inverted_bounds() {
        let result = CostRange::new(dec!(500), dec!(100));
        assert!(matches!(result, Err(CostRangeError::Inverted { .. })));
    }

    #[test]
    fn test_cost_range_rejects_negative_bounds() {
        let result = CostRange::new(dec!(-1), dec!(100));
        assert_eq!(result, Err(CostRangeError::NegativeBound(dec!(-1))));
    }

    #[test]
    fn test_cost_range_addition() {
        let a = CostRange::from_whole(1500, 3500).unwrap();
        let b = CostRange::from_whole(150, 500).unwrap();

        assert_eq!(a + b, CostRange::from_whole(1650, 4000).unwrap());
    }

    #[test]
    fn test_cost_range_addition_saturates_at_max() {
        let huge = CostRange::new(Decimal::ZERO, Decimal::MAX).unwrap();
        let total = huge + huge;

        assert_eq!(total.min(), Decimal::ZERO);
        assert_eq!(total.max(), Decimal::MAX);
        assert_eq!(huge.scale(dec!(2)).max(), Decimal::MAX);
        assert_eq!(huge.midpoint(), Decimal::MAX / dec!(2));
    }

    #[test]
    fn test_cost_range_sum_of_empty_is_zero() {
        let total: CostRange = Vec::<CostRange>::new().into_iter().sum();
        assert!(total.is_zero());
    }

    #[test]
    fn test_cost_range_scale() {
        let range = CostRange::from_whole(1000, 2000).unwrap();
        let scaled = range.scale(dec!(0.25));
        assert_eq!(scaled.min(), dec!(250));
        assert_eq!(scaled.max(), dec!(500));
        assert!(range.scale(dec!(-1)).is_zero());
    }

    #[test]
    fn test_cost_range_deserialize_validates() {
        let ok: CostRange = serde_json::from_str(r#"{"min": 10, "max": 20}"#).unwrap();
        assert_eq!(ok.midpoint(), dec!(15));

        let bad = serde_json::from_str::<CostRange>(r#"{"min": 20, "max": 10}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(0)), "$0.00");
        assert_eq!(format_amount(dec!(999.5)), "$999.50");
        assert_eq!(format_amount(dec!(30000)), "$30,000.00");
        assert_eq!(format_amount(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_amount(dec!(-4000)), "-$4,000.00");
    }

    #[test]
    fn test_cost_range_display() {
        let range = CostRange::from_whole(4000, 9000).unwrap();
        assert_eq!(range.to_string(), "$4,000.00–$9,000.00");
    }
}
