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

//! Operations on the collection of products.

use crate::db;
use crate::driver::Driver;
use crate::model::Product;
use catalog_core::driver::DriverResult;

impl Driver {
    /// Gets up to `count` products, skipping the first `start` of them.
    pub(crate) async fn get_products(self, start: i64, count: i64) -> DriverResult<Vec<Product>> {
        let products = db::get_products(&mut self.db.ex().await?, start, count).await?;
        Ok(products)
    }
}
