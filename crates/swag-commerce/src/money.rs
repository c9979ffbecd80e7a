//! Money type for representing peso amounts.
//!
//! The shop sells in Chilean pesos, which have no minor unit, so amounts are
//! whole pesos stored as `i64`. Arithmetic saturates instead of overflowing:
//! cart operations are total and must never panic on large input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// An amount in whole Chilean pesos (CLP).
///
/// Serializes as a bare JSON number, matching the stored cart format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    amount: i64,
}

impl Money {
    /// Create a Money value from whole pesos.
    pub const fn new(amount: i64) -> Self {
        Self { amount }
    }

    /// Zero pesos.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Get the amount in pesos.
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Multiply by a quantity, saturating at the `i64` bounds.
    pub fn times(&self, quantity: i64) -> Money {
        Money::new(self.amount.saturating_mul(quantity))
    }

    /// Convert to `f64` for ratio calculations.
    pub fn to_f64(&self) -> f64 {
        self.amount as f64
    }

    /// Format the way the storefront shows prices (es-CL): `$12.990`.
    ///
    /// ```
    /// use swag_commerce::Money;
    /// assert_eq!(Money::new(1234567).display(), "$1.234.567");
    /// assert_eq!(Money::new(-900).display(), "-$900");
    /// ```
    pub fn display(&self) -> String {
        let digits = self.amount.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        if self.amount < 0 {
            format!("-${}", grouped)
        } else {
            format!("${}", grouped)
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount.saturating_add(other.amount))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount.saturating_sub(other.amount))
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, quantity: i64) -> Money {
        self.times(quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Money::new(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display_groups_thousands() {
        assert_eq!(Money::new(0).display(), "$0");
        assert_eq!(Money::new(990).display(), "$990");
        assert_eq!(Money::new(1000).display(), "$1.000");
        assert_eq!(Money::new(12990).display(), "$12.990");
        assert_eq!(Money::new(100000).display(), "$100.000");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(1000);
        let b = Money::new(300);
        assert_eq!((a + b).amount(), 1300);
        assert_eq!((a - b).amount(), 700);
        assert_eq!((a * 3).amount(), 3000);
    }

    #[test]
    fn test_money_saturates() {
        let big = Money::new(i64::MAX);
        assert_eq!((big + Money::new(1)).amount(), i64::MAX);
        assert_eq!(big.times(2).amount(), i64::MAX);
    }

    #[test]
    fn test_money_sum() {
        let amounts = [Money::new(100), Money::new(250), Money::new(650)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::new(1000));
    }

    #[test]
    fn test_money_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Money::new(4990)).unwrap(), "4990");
        let back: Money = serde_json::from_str("4990").unwrap();
        assert_eq!(back, Money::new(4990));
    }
}
