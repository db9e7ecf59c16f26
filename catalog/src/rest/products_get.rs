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

//! API to list products.

use crate::driver::Driver;
use crate::model::Product;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use catalog_core::rest::{EmptyBody, RestError};
use log::debug;
use serde::Deserialize;

/// Number of products returned when the request does not specify a valid count.
const DEFAULT_COUNT: i64 = 10;

/// Query parameters accepted by this API.
///
/// The values are kept as raw strings because malformed values fall back to defaults instead of
/// failing the request.
#[derive(Default, Deserialize)]
pub(crate) struct ListQuery {
    /// Maximum number of products to return.
    count: Option<String>,

    /// Number of products to skip.
    start: Option<String>,
}

impl ListQuery {
    /// Returns the number of products to return, which is never negative.
    fn count(&self) -> i64 {
        match self.count.as_deref().map(str::parse::<i64>) {
            Some(Ok(count)) if count >= 0 => count,
            _ => DEFAULT_COUNT,
        }
    }

    /// Returns the number of products to skip, which is never negative.
    fn start(&self) -> i64 {
        match self.start.as_deref().map(str::parse::<i64>) {
            Some(Ok(start)) if start > 0 => start,
            _ => 0,
        }
    }
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    query: Result<Query<ListQuery>, QueryRejection>,
    _: EmptyBody,
) -> Result<Json<Vec<Product>>, RestError> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => {
            debug!("Ignoring malformed query: {}", e);
            ListQuery::default()
        }
    };

    let products = driver.get_products(query.start(), query.count()).await?;
    Ok(Json(products))
}
