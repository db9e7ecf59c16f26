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

//! Operations on a single product.

use crate::db;
use crate::driver::Driver;
use crate::model::{normalize_timestamp, Price, Product, ProductId, ProductName};
use catalog_core::db::DbError;
use catalog_core::driver::{DriverError, DriverResult};
use log::debug;
use time::OffsetDateTime;

/// Converts a database error into the driver error returned when looking up a product.
fn map_not_found(e: DbError) -> DriverError {
    match e {
        DbError::NotFound => DriverError::NotFound("Product not found".to_owned()),
        e => e.into(),
    }
}

impl Driver {
    /// Gets the product identified by `id`.
    pub(crate) async fn get_product(self, id: ProductId) -> DriverResult<Product> {
        let product = db::get_product(&mut self.db.ex().await?, id).await.map_err(map_not_found)?;
        Ok(product)
    }

    /// Creates a new product.
    ///
    /// The creation timestamp is `created_on` if provided, or the current time otherwise.  In
    /// both cases it is stored in UTC with microsecond precision.
    pub(crate) async fn create_product(
        self,
        name: ProductName,
        price: Price,
        created_on: Option<OffsetDateTime>,
    ) -> DriverResult<Product> {
        let created_on = normalize_timestamp(created_on.unwrap_or_else(|| self.clock.now_utc()));
        let product = db::create_product(&mut self.db.ex().await?, name, price, created_on).await?;
        debug!("Created product {:?}", product.id());
        Ok(product)
    }

    /// Replaces the name and price of the product identified by `id`, keeping its creation
    /// timestamp, and returns the product as stored after the update.
    pub(crate) async fn update_product(
        self,
        id: ProductId,
        name: ProductName,
        price: Price,
    ) -> DriverResult<Product> {
        let mut tx = self.db.begin().await?;
        let existing = db::get_product(tx.ex(), id).await.map_err(map_not_found)?;
        let product = Product::new(id, name, price, *existing.created_on());
        db::update_product(tx.ex(), &product).await?;
        let product = db::get_product(tx.ex(), id).await.map_err(map_not_found)?;
        tx.commit().await?;
        Ok(product)
    }

    /// Deletes the product identified by `id`.  Deleting a missing product is not an error.
    pub(crate) async fn delete_product(self, id: ProductId) -> DriverResult<()> {
        db::delete_product(&mut self.db.ex().await?, id).await?;
        Ok(())
    }
}
