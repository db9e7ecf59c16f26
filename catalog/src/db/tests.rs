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

//! Database tests shared by all implementations.

use super::*;
use catalog_core::db::Db;
use std::sync::Arc;
use time::macros::datetime;

/// Syntactic sugar to create a product given only its name and price in cents.
async fn create_simple_product(ex: &mut Executor, name: &'static str, cents: i64) -> Product {
    create_product(
        ex,
        ProductName::new(name).unwrap(),
        Price::from_cents(cents).unwrap(),
        datetime!(2021-04-15 19:00:00 UTC),
    )
    .await
    .unwrap()
}

async fn test_get_products_empty(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    init_schema(&mut ex).await.unwrap();

    assert!(get_products(&mut ex, 0, 10).await.unwrap().is_empty());
    assert!(get_products(&mut ex, 5, 10).await.unwrap().is_empty());
}

async fn test_create_and_get_product(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    init_schema(&mut ex).await.unwrap();

    let product = create_product(
        &mut ex,
        ProductName::new("test product").unwrap(),
        Price::from_f64(11.22).unwrap(),
        datetime!(2021-04-15 19:00:00.123456 UTC),
    )
    .await
    .unwrap();
    assert_eq!(ProductId::new(1), *product.id());
    assert_eq!("test product", product.name().as_str());
    assert_eq!(1122, product.price().as_cents().unwrap());
    assert_eq!(datetime!(2021-04-15 19:00:00.123456 UTC), *product.created_on());

    assert_eq!(product, get_product(&mut ex, ProductId::new(1)).await.unwrap());
}

async fn test_get_product_not_found(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    init_schema(&mut ex).await.unwrap();

    assert_eq!(DbError::NotFound, get_product(&mut ex, ProductId::new(10)).await.unwrap_err());

    create_simple_product(&mut ex, "first", 100).await;
    assert_eq!(DbError::NotFound, get_product(&mut ex, ProductId::new(10)).await.unwrap_err());
}

async fn test_create_product_ids_are_sequential(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    init_schema(&mut ex).await.unwrap();

    let product1 = create_simple_product(&mut ex, "first", 100).await;
    let product2 = create_simple_product(&mut ex, "second", 200).await;
    assert_eq!(ProductId::new(1), *product1.id());
    assert_eq!(ProductId::new(2), *product2.id());
}

async fn test_create_product_duplicate_name(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    init_schema(&mut ex).await.unwrap();

    create_simple_product(&mut ex, "the name", 100).await;
    match create_product(
        &mut ex,
        ProductName::new("the name").unwrap(),
        Price::from_cents(200).unwrap(),
        datetime!(2022-01-01 00:00:00 UTC),
    )
    .await
    {
        Err(DbError::AlreadyExists(_)) => (),
        e => panic!("Unexpected result: {:?}", e),
    }

    assert_eq!(1, get_products(&mut ex, 0, 10).await.unwrap().len());
}

async fn test_get_products_paging(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    init_schema(&mut ex).await.unwrap();

    let mut all = vec![];
    for (name, cents) in [("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)] {
        all.push(create_simple_product(&mut ex, name, cents).await);
    }

    assert_eq!(all, get_products(&mut ex, 0, 10).await.unwrap());
    assert_eq!(all[0..2], get_products(&mut ex, 0, 2).await.unwrap());
    assert_eq!(all[1..3], get_products(&mut ex, 1, 2).await.unwrap());
    assert_eq!(all[3..5], get_products(&mut ex, 3, 10).await.unwrap());
    assert!(get_products(&mut ex, 5, 10).await.unwrap().is_empty());
}

async fn test_update_product(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    init_schema(&mut ex).await.unwrap();

    let original = create_simple_product(&mut ex, "original", 100).await;
    let other = create_simple_product(&mut ex, "other", 300).await;

    let updated = Product::new(
        *original.id(),
        ProductName::new("updated").unwrap(),
        Price::from_cents(250).unwrap(),
        datetime!(2030-01-01 00:00:00 UTC),
    );
    update_product(&mut ex, &updated).await.unwrap();

    let product = get_product(&mut ex, *original.id()).await.unwrap();
    assert_eq!(updated.name(), product.name());
    assert_eq!(updated.price(), product.price());
    assert_eq!(original.created_on(), product.created_on());

    assert_eq!(other, get_product(&mut ex, *other.id()).await.unwrap());
}

async fn test_update_product_not_found(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    init_schema(&mut ex).await.unwrap();

    let product = Product::new(
        ProductId::new(10),
        ProductName::new("ghost").unwrap(),
        Price::from_cents(100).unwrap(),
        datetime!(2021-04-15 19:00:00 UTC),
    );
    update_product(&mut ex, &product).await.unwrap();
    assert_eq!(DbError::NotFound, get_product(&mut ex, ProductId::new(10)).await.unwrap_err());
}

async fn test_update_product_duplicate_name(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    init_schema(&mut ex).await.unwrap();

    create_simple_product(&mut ex, "first", 100).await;
    let second = create_simple_product(&mut ex, "second", 200).await;

    let renamed = Product::new(
        *second.id(),
        ProductName::new("first").unwrap(),
        *second.price(),
        *second.created_on(),
    );
    match update_product(&mut ex, &renamed).await {
        Err(DbError::AlreadyExists(_)) => (),
        e => panic!("Unexpected result: {:?}", e),
    }
    assert_eq!(second, get_product(&mut ex, *second.id()).await.unwrap());
}

async fn test_delete_product(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    init_schema(&mut ex).await.unwrap();

    let product1 = create_simple_product(&mut ex, "first", 100).await;
    let product2 = create_simple_product(&mut ex, "second", 200).await;

    delete_product(&mut ex, *product1.id()).await.unwrap();
    assert_eq!(DbError::NotFound, get_product(&mut ex, *product1.id()).await.unwrap_err());
    assert_eq!(vec![product2], get_products(&mut ex, 0, 10).await.unwrap());
}

async fn test_delete_product_not_found(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    init_schema(&mut ex).await.unwrap();

    delete_product(&mut ex, ProductId::new(10)).await.unwrap();
}

async fn test_create_product_rolled_back(db: Arc<dyn Db + Send + Sync>) {
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    {
        let mut tx = db.begin().await.unwrap();
        create_simple_product(tx.ex(), "discarded", 100).await;
    }

    let mut tx = db.begin().await.unwrap();
    create_simple_product(tx.ex(), "kept", 200).await;
    tx.commit().await.unwrap();

    let products = get_products(&mut db.ex().await.unwrap(), 0, 10).await.unwrap();
    assert_eq!(1, products.len());
    assert_eq!("kept", products[0].name().as_str());
}

macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta] )? ) => {
        catalog_core::db::testutils::generate_tests!(
            $(#[$extra],)?
            $setup,
            $crate::db::tests,
            test_get_products_empty,
            test_create_and_get_product,
            test_get_product_not_found,
            test_create_product_ids_are_sequential,
            test_create_product_duplicate_name,
            test_get_products_paging,
            test_update_product,
            test_update_product_not_found,
            test_update_product_duplicate_name,
            test_delete_product,
            test_delete_product_not_found,
            test_create_product_rolled_back
        );
    }
];

mod sqlite {
    use super::*;

    generate_db_tests!(Arc::new(catalog_core::db::sqlite::testutils::setup().await));
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::*;

    generate_db_tests!(
        Arc::new(catalog_core::db::postgres::testutils::setup().await),
        #[ignore = "Requires environment configuration and is expensive"]
    );
}
