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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;

mod product_delete;
mod product_get;
mod product_post;
mod product_put;
mod products_get;
#[cfg(test)]
mod testutils;

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{get, post};
    Router::new()
        .route("/products", get(products_get::handler))
        .route("/product", post(product_post::handler))
        .route(
            "/product/:id",
            get(product_get::handler).put(product_put::handler).delete(product_delete::handler),
        )
        .with_state(driver)
}
