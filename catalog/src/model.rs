// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! High-level data types.

use catalog_core::clocks::truncate_to_micros;
use catalog_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::Constructor;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
#[cfg(test)]
use serde::Deserialize;
use serde::{Serialize, Serializer};
use std::str::FromStr;
use time::{OffsetDateTime, UtcOffset};

/// Identifier of a product.  Assigned by the database at creation time and never modified.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub(crate) struct ProductId(i32);

impl ProductId {
    /// Creates a new identifier from its raw database representation.
    pub(crate) fn new(id: i32) -> Self {
        Self(id)
    }

    /// Parses an identifier from its textual representation, as received in request paths.
    pub(crate) fn parse(s: &str) -> ModelResult<Self> {
        match s.parse::<i32>() {
            Ok(id) => Ok(Self(id)),
            Err(_) => Err(ModelError("Invalid product ID".to_owned())),
        }
    }

    /// Returns the identifier as an `i32`, which is the type used by the database.
    pub(crate) fn as_i32(self) -> i32 {
        self.0
    }
}

/// Name of a product.  Guaranteed to not be empty.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub(crate) struct ProductName(String);

impl ProductName {
    /// Creates a new product name after validating it.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Product name cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns the string representation of the name.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// Upper bound (exclusive) of the prices we can store, given that the database uses a
/// `NUMERIC(10,2)` column.
const MAX_PRICE_UNITS: i64 = 100_000_000;

/// Price of a product as an exact decimal number.
///
/// Prices are non-negative, have at most two fractional digits, and fit in a `NUMERIC(10,2)`
/// column.  They travel over the wire as JSON numbers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Price(Decimal);

impl Price {
    /// Creates a new price from a decimal value after validating it.
    pub(crate) fn new(value: Decimal) -> ModelResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ModelError(format!("Price cannot be negative: {}", value)));
        }
        if value.normalize().scale() > 2 {
            return Err(ModelError(format!("Price cannot have more than 2 decimal places: {}", value)));
        }
        if value >= Decimal::from(MAX_PRICE_UNITS) {
            return Err(ModelError(format!("Price is too large: {}", value)));
        }
        Ok(Self(value.round_dp(2)))
    }

    /// Creates a new price from a floating point value, as received in JSON payloads.
    ///
    /// The conversion goes through the shortest textual representation of `value` so that inputs
    /// such as `11.22` are interpreted as the exact decimal the user typed.
    pub(crate) fn from_f64(value: f64) -> ModelResult<Self> {
        if !value.is_finite() {
            return Err(ModelError(format!("Invalid price: {}", value)));
        }
        match Decimal::from_str(&value.to_string()) {
            Ok(decimal) => Self::new(decimal),
            Err(e) => Err(ModelError(format!("Invalid price {}: {}", value, e))),
        }
    }

    /// Creates a new price from an amount of cents.
    #[cfg(any(feature = "sqlite", test))]
    pub(crate) fn from_cents(cents: i64) -> ModelResult<Self> {
        Self::new(Decimal::new(cents, 2))
    }

    /// Returns the price as an exact decimal.
    pub(crate) fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns the price as an amount of cents.
    #[cfg(any(feature = "sqlite", test))]
    pub(crate) fn as_cents(&self) -> ModelResult<i64> {
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .ok_or_else(|| ModelError(format!("Price {} cannot be represented in cents", self.0)))
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => Err(serde::ser::Error::custom(format!("Cannot represent price {}", self.0))),
        }
    }
}

#[cfg(test)]
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Price::from_f64(value).map_err(serde::de::Error::custom)
    }
}

/// Converts a timestamp to the representation used for products: in UTC and with microsecond
/// precision, which is what the database can hold.
pub(crate) fn normalize_timestamp(ts: OffsetDateTime) -> OffsetDateTime {
    truncate_to_micros(ts.to_offset(UtcOffset::UTC))
}

/// A product as stored in the catalog.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Product {
    /// Identifier of the product.
    id: ProductId,

    /// Unique name of the product.
    name: ProductName,

    /// Current price of the product.
    price: Price,

    /// Timestamp of when the product was created.
    #[serde(with = "time::serde::rfc3339")]
    created_on: OffsetDateTime,
}
