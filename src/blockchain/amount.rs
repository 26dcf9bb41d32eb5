// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Arbitrary-precision ledger amounts.
//!
//! Every monetary value (UTXO amounts, balances, fees) is an [`Amount`] in
//! base units. 1 BOA = 10^7 base units.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{CheckedSub, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::RefOr;

/// Largest integer an `f64` holds exactly (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Non-negative amount in base units.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigUint);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountParseError {
    #[error("Amount is empty")]
    Empty,
    #[error("Amount must not be negative")]
    Negative,
    #[error("Invalid amount: {0}")]
    Invalid(String),
}

impl Amount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `self - other`, or `None` when the result would be negative.
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        CheckedSub::checked_sub(&self.0, &other.0).map(Amount)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<BigUint> for Amount {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    /// Parses a base-unit integer. A leading `-` is reported as
    /// [`AmountParseError::Negative`] so callers can tell "fee < 0" apart
    /// from garbage input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountParseError::Empty);
        }
        if let Some(rest) = s.strip_prefix('-') {
            return if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
                Err(AmountParseError::Negative)
            } else {
                Err(AmountParseError::Invalid(s.to_string()))
            };
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountParseError::Invalid(s.to_string()));
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Amount)
            .ok_or_else(|| AmountParseError::Invalid(s.to_string()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Amount> for &'a Amount {
    type Output = Amount;

    fn add(self, rhs: &'a Amount) -> Amount {
        Amount(&self.0 + &rhs.0)
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, rhs: &Amount) {
        self.0 += &rhs.0;
    }
}

impl Mul<u64> for &Amount {
    type Output = Amount;

    fn mul(self, rhs: u64) -> Amount {
        Amount(&self.0 * BigUint::from(rhs))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |mut acc, x| {
            acc += x;
            acc
        })
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// The chain API sends amounts as decimal strings in most places and as
/// JSON numbers in transaction overviews.
struct AmountVisitor;

impl de::Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer amount as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Amount, E> {
        Ok(Amount(BigUint::from(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        u64::try_from(v)
            .map(Amount::from)
            .map_err(|_| E::custom(AmountParseError::Negative))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        if v < 0.0 {
            return Err(E::custom(AmountParseError::Negative));
        }
        // Floats past 2^53 have already lost digits; those must be sent as strings.
        if !v.is_finite() || v.fract() != 0.0 || v > MAX_EXACT_FLOAT {
            return Err(E::custom(AmountParseError::Invalid(v.to_string())));
        }
        Ok(Amount::from(v as u64))
    }
}

impl utoipa::PartialSchema for Amount {
    fn schema() -> RefOr<Schema> {
        ObjectBuilder::new()
            .schema_type(Type::String)
            .description(Some("Amount in base units (1 BOA = 10^7), decimal string"))
            .into()
    }
}

impl utoipa::ToSchema for Amount {}
