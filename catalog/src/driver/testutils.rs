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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::{Price, Product, ProductName};
use catalog_core::clocks::testutils::SettableClock;
use catalog_core::db::{Db, Executor};
use std::sync::Arc;
use time::macros::datetime;
use time::OffsetDateTime;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used by the driver, which tests can adjust.
    clock: Arc<SettableClock>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database and a clock fixed at a well-known time.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(catalog_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(SettableClock::new(datetime!(2021-04-15 19:00:00 UTC)));
        let driver = Driver::new(db.clone(), clock.clone());
        Self { db, clock, driver }
    }

    /// Obtains a direct executor against the database to manipulate it outside of the driver.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns the clock used by the driver.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Returns a copy of the driver to run one operation against it.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Syntactic sugar to insert a product directly into the database.
    pub(crate) async fn create_product(
        &self,
        name: &'static str,
        cents: i64,
        created_on: OffsetDateTime,
    ) -> Product {
        db::create_product(
            &mut self.ex().await,
            ProductName::new(name).unwrap(),
            Price::from_cents(cents).unwrap(),
            created_on,
        )
        .await
        .unwrap()
    }
}
