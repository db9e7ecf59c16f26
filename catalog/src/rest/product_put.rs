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

//! API to update an existing product.

use crate::driver::Driver;
use crate::model::{Price, Product, ProductId, ProductName};
use axum::extract::{Path, State};
use axum::Json;
use catalog_core::rest::{JsonBody, RestError};
use serde::Deserialize;

/// Message sent to the server to update a product.
///
/// Any `id` or `created_on` fields in the payload are ignored: the identifier comes from the path
/// and the creation timestamp never changes.
#[derive(Deserialize)]
pub(crate) struct UpdateRequest {
    /// New name of the product.  Must be unique.
    #[serde(default)]
    name: String,

    /// New price of the product.
    #[serde(default)]
    price: f64,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateRequest>,
) -> Result<Json<Product>, RestError> {
    let id = ProductId::parse(&id)?;
    let name = ProductName::new(request.name)?;
    let price = Price::from_f64(request.price)?;
    let product = driver.update_product(id, name, price).await?;
    Ok(Json(product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use catalog_core::rest::testutils::*;
    use time::macros::datetime;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::PUT, format!("/product/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let original =
            context.create_product("test product", 1122, datetime!(2021-04-15 19:00:00 UTC)).await;
        let other = context.create_product("other", 500, datetime!(2021-04-15 19:00:00 UTC)).await;

        let response = OneShotBuilder::new(context.app(), route("1"))
            .send_json(serde_json::json!({
                "name": "test product - updated name",
                "price": 11.22,
            }))
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!(
            serde_json::json!({
                "id": 1,
                "name": "test product - updated name",
                "price": 11.22,
                "created_on": "2021-04-15T19:00:00Z",
            }),
            response
        );

        let product = context.get_product(1).await.unwrap();
        assert_eq!("test product - updated name", product.name().as_str());
        assert_eq!(original.created_on(), product.created_on());
        assert_eq!(Some(other), context.get_product(2).await);
    }

    #[tokio::test]
    async fn test_path_id_wins_and_created_on_is_kept() {
        let context = TestContext::setup().await;
        context.create_product("first", 100, datetime!(2021-04-15 19:00:00 UTC)).await;
        let second = context.create_product("second", 200, datetime!(2021-04-16 19:00:00 UTC)).await;

        let response = OneShotBuilder::new(context.app(), route("2"))
            .send_json(serde_json::json!({
                "id": 1,
                "name": "renamed",
                "price": 7.5,
                "created_on": "2030-01-01T00:00:00Z",
            }))
            .await
            .expect_json::<Product>()
            .await;
        assert_eq!(second.id(), response.id());
        assert_eq!(750, response.price().as_cents().unwrap());
        assert_eq!(second.created_on(), response.created_on());

        assert_eq!("first", context.get_product(1).await.unwrap().name().as_str());
        assert_eq!("renamed", context.get_product(2).await.unwrap().name().as_str());
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("10"))
            .send_json(serde_json::json!({"name": "ghost", "price": 1.0}))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Product not found$")
            .await;

        assert!(context.get_all_products().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("abc"))
            .send_json(serde_json::json!({"name": "foo", "price": 1.0}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("^Invalid product ID$")
            .await;
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let context = TestContext::setup().await;
        context.create_product("first", 100, datetime!(2021-04-15 19:00:00 UTC)).await;
        let second = context.create_product("second", 200, datetime!(2021-04-15 19:00:00 UTC)).await;

        OneShotBuilder::new(context.app(), route("2"))
            .send_json(serde_json::json!({"name": "first", "price": 1.0}))
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("UNIQUE constraint failed")
            .await;

        assert_eq!(Some(second), context.get_product(2).await);
    }

    #[tokio::test]
    async fn test_bad_price() {
        let context = TestContext::setup().await;
        let original = context.create_product("first", 100, datetime!(2021-04-15 19:00:00 UTC)).await;

        OneShotBuilder::new(context.app(), route("1"))
            .send_json(serde_json::json!({"name": "first", "price": -2.0}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("cannot be negative")
            .await;

        assert_eq!(Some(original), context.get_product(1).await);
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route("1"));
}
