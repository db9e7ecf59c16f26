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

//! API to create a product.

use crate::driver::Driver;
use crate::model::{Price, Product, ProductName};
use axum::extract::State;
use axum::{http, Json};
use catalog_core::rest::{JsonBody, RestError};
use serde::Deserialize;
use time::OffsetDateTime;

/// Message sent to the server to create a product.
#[derive(Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct CreateRequest {
    /// Name of the new product.  Must be unique.
    #[serde(default)]
    name: String,

    /// Price of the new product.
    #[serde(default)]
    price: f64,

    /// Creation timestamp of the new product.  Defaults to the current time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    created_on: Option<OffsetDateTime>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<CreateRequest>,
) -> Result<(http::StatusCode, Json<Product>), RestError> {
    let name = ProductName::new(request.name)?;
    let price = Price::from_f64(request.price)?;
    let product = driver.create_product(name, price, request.created_on).await?;
    Ok((http::StatusCode::CREATED, Json(product)))
}
