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

//! Entry point to the product catalog service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use catalog::db::init_schema;
use catalog::serve;
use catalog_core::db::postgres::{PostgresDb, PostgresOptions};
use catalog_core::db::Db;
use catalog_core::env::get_optional_var;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

/// Default port to listen on when `CATALOG_PORT` is not set.
const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    env_logger::init();

    let address = get_optional_var::<IpAddr>("CATALOG", "ADDRESS")
        .unwrap()
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
    let port = get_optional_var::<u16>("CATALOG", "PORT").unwrap().unwrap_or(DEFAULT_PORT);

    let db_opts = PostgresOptions::from_env("PGSQL_PROD").unwrap();
    let db: Arc<dyn Db + Send + Sync> = Arc::new(PostgresDb::connect(db_opts).unwrap());
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    serve((address, port), db).await.unwrap()
}
