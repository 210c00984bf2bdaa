use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::op;

pub const NT_CURRENCY_CODE: &str = "NT$";

//--------------------------------------      Money       ------------------------------------------------------------
/// An amount of New Taiwan dollars.
///
/// Arithmetic is carried out at full `f64` precision. Rounding to cents only happens when an
/// amount is rendered for display or for a ledger row, via [`Money::rounded`] or [`Display`].
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Money(f64);

op!(binary Money, Add, add);
op!(binary Money, Sub, sub);
op!(inplace Money, SubAssign, sub_assign);
op!(unary Money, Neg, neg);

impl Mul<f64> for Money {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a monetary amount: {0}")]
pub struct MoneyConversionError(String);

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl TryFrom<f64> for Money {
    type Error = MoneyConversionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(MoneyConversionError(format!("{value} is not a finite number")))
        }
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cents = self.rounded().0;
        let sign = if cents < 0.0 { "-" } else { "" };
        let cents = cents.abs();
        let whole = cents.trunc() as i64;
        let frac = ((cents - cents.trunc()) * 100.0).round() as i64;
        write!(f, "{sign}{}.{frac:02}", group_thousands(whole))
    }
}

impl Money {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// The amount rounded to the nearest cent, half away from zero.
    pub fn rounded(&self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }
}

fn group_thousands(mut value: i64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while value > 0 {
        groups.push((value % 1000) as u16);
        value /= 1000;
    }
    let mut result = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        result.push_str(&format!(",{g:03}"));
    }
    result
}
