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

//! Data access layer for products.
//!
//! All SQL statements issued by the service live in this module.  Every operation takes an
//! `Executor`, which may be backed by a direct pool connection or by an open transaction, and
//! dispatches to the query flavor of the database behind it.

use crate::model::{Price, Product, ProductId, ProductName};
use catalog_core::db::{DbError, DbResult, Executor};
#[cfg(feature = "postgres")]
use catalog_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use catalog_core::db::sqlite::{self, build_timestamp, unpack_timestamp};
use futures::TryStreamExt;
use log::info;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
#[cfg(feature = "postgres")]
use rust_decimal::Decimal;
use time::OffsetDateTime;

#[cfg(test)]
mod tests;

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    info!("Initializing database schema");
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Product {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let price: Decimal = row.try_get("price").map_err(postgres::map_sqlx_error)?;
        let created_on: OffsetDateTime =
            row.try_get("created_on").map_err(postgres::map_sqlx_error)?;

        Ok(Product::new(ProductId::new(id), ProductName::new(name)?, Price::new(price)?, created_on))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Product {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let price_cents: i64 = row.try_get("price_cents").map_err(sqlite::map_sqlx_error)?;
        let created_on_sec: i64 = row.try_get("created_on_sec").map_err(sqlite::map_sqlx_error)?;
        let created_on_nsec: i64 =
            row.try_get("created_on_nsec").map_err(sqlite::map_sqlx_error)?;

        Ok(Product::new(
            ProductId::new(id),
            ProductName::new(name)?,
            Price::from_cents(price_cents)?,
            build_timestamp(created_on_sec, created_on_nsec)?,
        ))
    }
}

/// Gets up to `count` products, skipping the first `start` of them in ascending `id` order.
pub(crate) async fn get_products(
    ex: &mut Executor,
    start: i64,
    count: i64,
) -> DbResult<Vec<Product>> {
    let mut products = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT id, name, price, created_on
                FROM product
                ORDER BY id
                LIMIT $1 OFFSET $2
            ";
            let mut rows = sqlx::query(query_str).bind(count).bind(start).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                products.push(Product::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT id, name, price_cents, created_on_sec, created_on_nsec
                FROM product
                ORDER BY id
                LIMIT ? OFFSET ?
            ";
            let mut rows = sqlx::query(query_str).bind(count).bind(start).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                products.push(Product::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(products)
}

/// Gets the product identified by `id`.
pub(crate) async fn get_product(ex: &mut Executor, id: ProductId) -> DbResult<Product> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, price, created_on FROM product WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i32())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Product::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT id, name, price_cents, created_on_sec, created_on_nsec
                FROM product
                WHERE id = ?
            ";
            let row = sqlx::query(query_str)
                .bind(id.as_i32())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Product::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Creates a new product with the given properties and returns it with the identifier that the
/// database assigned to it.
pub(crate) async fn create_product(
    ex: &mut Executor,
    name: ProductName,
    price: Price,
    created_on: OffsetDateTime,
) -> DbResult<Product> {
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO product (name, price, created_on)
                VALUES ($1, $2, $3)
                RETURNING id
            ";
            let row = sqlx::query(query_str)
                .bind(name.as_str())
                .bind(price.as_decimal())
                .bind(created_on)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i32, _>("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (created_on_sec, created_on_nsec) = unpack_timestamp(created_on)?;

            let query_str = "
                INSERT INTO product (name, price_cents, created_on_sec, created_on_nsec)
                VALUES (?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(name.as_str())
                .bind(price.as_cents()?)
                .bind(created_on_sec)
                .bind(created_on_nsec)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            i32::try_from(done.last_insert_rowid()).map_err(|e| {
                DbError::DataIntegrityError(format!("Product id cannot be represented: {}", e))
            })?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(Product::new(ProductId::new(id), name, price, created_on))
}

/// Updates the name and price of the product identified by `product.id`.
///
/// The creation timestamp is never modified.  Updating a product that does not exist is not an
/// error: the operation simply affects no rows.
pub(crate) async fn update_product(ex: &mut Executor, product: &Product) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "UPDATE product SET name = $1, price = $2 WHERE id = $3";
            sqlx::query(query_str)
                .bind(product.name().as_str())
                .bind(product.price().as_decimal())
                .bind(product.id().as_i32())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "UPDATE product SET name = ?, price_cents = ? WHERE id = ?";
            sqlx::query(query_str)
                .bind(product.name().as_str())
                .bind(product.price().as_cents()?)
                .bind(product.id().as_i32())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(())
}

/// Deletes the product identified by `id`.
///
/// Deleting a product that does not exist is not an error.
pub(crate) async fn delete_product(ex: &mut Executor, id: ProductId) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM product WHERE id = $1";
            sqlx::query(query_str)
                .bind(id.as_i32())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM product WHERE id = ?";
            sqlx::query(query_str)
                .bind(id.as_i32())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(())
}
