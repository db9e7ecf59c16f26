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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::{Price, Product, ProductId, ProductName};
use crate::rest::app;
use axum::Router;
use catalog_core::clocks::testutils::SettableClock;
use catalog_core::db::{Db, DbError};
use std::sync::Arc;
use time::macros::datetime;
use time::OffsetDateTime;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used by the app, which tests can adjust.
    clock: Arc<SettableClock>,

    /// The router for the app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app using an in-memory database and a clock fixed at a well-known time.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(catalog_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(SettableClock::new(datetime!(2021-04-15 19:00:00 UTC)));
        let driver = Driver::new(db.clone(), clock.clone());
        let app = app(driver);
        Self { db, clock, app }
    }

    /// Returns a copy of the router to send one request to it.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Returns the clock used by the app.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Syntactic sugar to insert a product directly into the database.
    pub(crate) async fn create_product(
        &self,
        name: &'static str,
        cents: i64,
        created_on: OffsetDateTime,
    ) -> Product {
        db::create_product(
            &mut self.db.ex().await.unwrap(),
            ProductName::new(name).unwrap(),
            Price::from_cents(cents).unwrap(),
            created_on,
        )
        .await
        .unwrap()
    }

    /// Gets the product with identifier `id` directly from the database, if it exists.
    pub(crate) async fn get_product(&self, id: i32) -> Option<Product> {
        match db::get_product(&mut self.db.ex().await.unwrap(), ProductId::new(id)).await {
            Ok(product) => Some(product),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("Unexpected database error: {}", e),
        }
    }

    /// Gets all products directly from the database.
    pub(crate) async fn get_all_products(&self) -> Vec<Product> {
        db::get_products(&mut self.db.ex().await.unwrap(), 0, i64::MAX).await.unwrap()
    }
}
