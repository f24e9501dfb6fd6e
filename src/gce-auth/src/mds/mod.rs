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

//! Access to the Google Compute Engine [Metadata Service].
//!
//! [Metadata Service]: https://cloud.google.com/compute/docs/metadata/overview

mod client;

pub use client::Client;

pub(crate) const METADATA_FLAVOR_VALUE: &str = "Google";
pub(crate) const METADATA_FLAVOR: &str = "metadata-flavor";
pub(crate) const METADATA_ROOT: &str = "http://metadata";
pub(crate) const METADATA_PREFIX: &str = "/computeMetadata/v1/";
pub(crate) const PROJECT_ID_SUFFIX: &str = "project/project-id";

pub(crate) fn token_suffix(service_account: &str) -> String {
    format!("instance/service-accounts/{service_account}/token")
}
