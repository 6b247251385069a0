//! Value objects: equality by value, not identity.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
pub trait ValueObject: Clone + PartialEq + fmt::Debug {}

/// Number of units of a product. Stock never goes below zero.
pub type Quantity = u64;

/// A signed cash amount (balance, unit price or total).
///
/// Rendered the way the ledger texts expect: integral values keep one
/// decimal (`100.0`), everything else uses the shortest round-trip form,
/// switching to a signed two-digit exponent outside `[1e-4, 1e16)`.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(f64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0.0);

    pub fn new(amount: f64) -> Self {
        Self(amount)
    }

    pub fn amount(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Total for `quantity` units at this unit price.
    pub fn times(self, quantity: Quantity) -> Money {
        Money(self.0 * quantity as f64)
    }
}

impl From<f64> for Money {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("nan");
        }
        if v.is_infinite() {
            return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
        }
        if v == 0.0 {
            return f.write_str(if v.is_sign_negative() { "-0.0" } else { "0.0" });
        }

        let abs = v.abs();
        if !(1e-4..1e16).contains(&abs) {
            let sci = format!("{v:e}");
            if let Some((mantissa, exp)) = sci.split_once('e') {
                let exp: i32 = exp.parse().map_err(|_| fmt::Error)?;
                let sign = if exp < 0 { '-' } else { '+' };
                return write!(f, "{mantissa}e{sign}{:02}", exp.abs());
            }
        }

        let plain = v.to_string();
        if plain.contains('.') {
            f.write_str(&plain)
        } else {
            write!(f, "{plain}.0")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn show(v: f64) -> String {
        Money::new(v).to_string()
    }

    #[test]
    fn integral_amounts_keep_one_decimal() {
        assert_eq!(show(100.0), "100.0");
        assert_eq!(show(-20.0), "-20.0");
        assert_eq!(show(0.0), "0.0");
        assert_eq!(show(95.0), "95.0");
    }

    #[test]
    fn fractional_amounts_use_shortest_form() {
        assert_eq!(show(2.5), "2.5");
        assert_eq!(show(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(show(0.0001), "0.0001");
    }

    #[test]
    fn extreme_magnitudes_switch_to_exponent_form() {
        assert_eq!(show(1e16), "1e+16");
        assert_eq!(show(1.5e20), "1.5e+20");
        assert_eq!(show(1e-5), "1e-05");
        assert_eq!(show(-2.5e-7), "-2.5e-07");
        assert_eq!(show(9999999999999998.0), "9999999999999998.0");
    }

    #[test]
    fn non_finite_amounts() {
        assert_eq!(show(f64::INFINITY), "inf");
        assert_eq!(show(f64::NEG_INFINITY), "-inf");
        assert_eq!(show(f64::NAN), "nan");
    }

    #[test]
    fn arithmetic_follows_f64() {
        let mut balance = Money::ZERO;
        balance += Money::new(100.0);
        balance -= Money::new(2.0).times(10);
        assert_eq!(balance, Money::new(80.0));
        assert_eq!(balance + Money::new(15.0), Money::new(95.0));
        assert!(Money::new(20.0) > Money::ZERO);
    }

    proptest! {
        /// Property: the rendered text always parses back to the same amount.
        #[test]
        fn display_is_lossless(v in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
            let text = show(v);
            let parsed: f64 = text.parse().unwrap();
            prop_assert_eq!(parsed, v);
        }
    }
}
