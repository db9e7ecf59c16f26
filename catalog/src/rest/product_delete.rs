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

//! API to delete a product.

use crate::driver::Driver;
use crate::model::ProductId;
use axum::extract::{Path, State};
use axum::Json;
use catalog_core::rest::{EmptyBody, RestError};
use serde::Serialize;

/// Message returned by the server after deleting a product.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, serde::Deserialize, PartialEq))]
pub(crate) struct DeleteResponse {
    /// Outcome of the operation.  Always `success`.
    result: String,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    _: EmptyBody,
) -> Result<Json<DeleteResponse>, RestError> {
    let id = ProductId::parse(&id)?;
    driver.delete_product(id).await?;
    Ok(Json(DeleteResponse { result: "success".to_owned() }))
}
