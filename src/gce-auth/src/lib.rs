// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Google Compute Engine metadata credentials for Rust.
//!
//! Processes running on [Google Compute Engine] (and other environments with a
//! [Metadata Service], such as GKE or Cloud Run) can obtain access tokens for
//! their service accounts from a local metadata server, without managing any
//! credential files.
//!
//! This crate contains:
//! * [AuthTransport], a [Transport] decorator that fetches, caches and
//!   refreshes access tokens, and adds them to each outgoing request.
//! * [default_client], a process-wide client using the default service
//!   account.
//! * [metadata_value], [project_id] and [on_gce] to query the metadata service
//!   directly.
//!
//! The crate uses the [tracing] facade for diagnostics. It does not install a
//! subscriber.
//!
//! [Google Compute Engine]: https://cloud.google.com/products/compute
//! [Metadata Service]: https://cloud.google.com/compute/docs/metadata/overview

pub mod errors;

pub mod mds;

pub mod environment;

pub mod token;

pub mod transport;

pub mod auth_transport;

pub mod client;

pub use auth_transport::AuthTransport;
pub use client::{Client, default_client};
pub use environment::Environment;
pub use transport::Transport;

use std::sync::LazyLock;

/// A `Result` alias where the `Err` case is
/// `google_cloud_gce_auth::errors::Error`.
pub type Result<T> = std::result::Result<T, crate::errors::Error>;

static DEFAULT_ENVIRONMENT: LazyLock<Environment> = LazyLock::new(Environment::default);

/// Returns a value from the metadata service.
///
/// The suffix is appended to `http://metadata/computeMetadata/v1/`.
pub async fn metadata_value(suffix: &str) -> Result<String> {
    DEFAULT_ENVIRONMENT.client().fetch(suffix).await
}

/// Returns the current instance's project id, or an empty string if not
/// running on Google Compute Engine.
///
/// The value is computed once per process. See [Environment] for the
/// limitations of this memoization.
pub async fn project_id() -> String {
    DEFAULT_ENVIRONMENT.project_id().await
}

/// Reports whether this process is running on Google Compute Engine.
pub async fn on_gce() -> bool {
    DEFAULT_ENVIRONMENT.on_gce().await
}
