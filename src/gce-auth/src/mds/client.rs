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

use crate::errors::Error;
use reqwest::{Client as ReqwestClient, StatusCode};

/// A client for the Google Compute Engine Metadata Service (MDS).
///
/// Each call to [fetch][Client::fetch] issues exactly one `GET` request. The
/// client does not cache values and does not retry failures.
///
/// The client uses its own HTTP connection pool. It never sends requests
/// through the transport wrapped by [AuthTransport][crate::AuthTransport].
#[derive(Clone, Debug)]
pub struct Client {
    endpoint: String,
    inner: ReqwestClient,
}

impl Client {
    /// Creates a client for the default metadata endpoint, `http://metadata`.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Creates a client for a custom metadata endpoint, such as a local
    /// emulator.
    pub fn with_endpoint<S: Into<String>>(endpoint: S) -> Self {
        Self::build(Some(endpoint.into()))
    }

    pub(crate) fn build(endpoint_override: Option<String>) -> Self {
        let endpoint = endpoint_override.unwrap_or_else(|| super::METADATA_ROOT.to_string());
        let endpoint = endpoint.trim_end_matches('/').to_string();
        Self {
            endpoint,
            inner: ReqwestClient::new(),
        }
    }

    /// The metadata root used by this client, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches a value from the metadata service.
    ///
    /// The `suffix` is appended verbatim to `<endpoint>/computeMetadata/v1/`.
    /// It is not validated; a malformed suffix typically results in an
    /// [Error::BadStatus].
    ///
    /// # Example
    /// ```no_run
    /// # use google_cloud_gce_auth::mds::Client;
    /// # tokio_test::block_on(async {
    /// let client = Client::new();
    /// let zone = client.fetch("instance/zone").await?;
    /// println!("running in {zone}");
    /// # Ok::<(), google_cloud_gce_auth::errors::Error>(())
    /// # });
    /// ```
    pub async fn fetch(&self, suffix: &str) -> crate::Result<String> {
        let url = format!("{}{}{suffix}", self.endpoint, super::METADATA_PREFIX);
        let response = self
            .inner
            .get(&url)
            .header(super::METADATA_FLAVOR, super::METADATA_FLAVOR_VALUE)
            .send()
            .await
            .map_err(Error::transport)?;

        if response.status() != StatusCode::OK {
            return Err(Error::BadStatus {
                status: response.status(),
                url,
            });
        }

        response.text().await.map_err(Error::incomplete)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
