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

//! REST service that manages a catalog of products.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use catalog_core::clocks::SystemClock;
use catalog_core::db::Db;
use log::{info, warn};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

pub mod db;
mod driver;
use driver::Driver;
pub(crate) mod model;
mod rest;
use rest::app;

/// Instantiates all resources to serve the application on `bind_addr` until the process receives
/// a termination signal.
///
/// The database `db` must already have its schema initialized.  It is closed before returning.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let clock = Arc::from(SystemClock::default());
    let driver = Driver::new(db.clone(), clock);
    let app = app(driver);

    let listener = tokio::net::TcpListener::bind(bind_addr.into()).await?;
    info!("Listening on {}", listener.local_addr()?);
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to wait for termination signal: {}", e);
            }
            info!("Shutting down");
        })
        .await;

    db.close().await;
    result?;
    Ok(())
}
