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

//! A ready-to-use HTTP client for authenticated requests.

use crate::Result;
use crate::auth_transport::{AuthTransport, DEFAULT_SERVICE_ACCOUNT};
use crate::transport::Transport;
use reqwest::{Method, Request, Response, Url};
use std::sync::{Arc, LazyLock};

static DEFAULT_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    let transport = AuthTransport::new(DEFAULT_SERVICE_ACCOUNT, Arc::new(reqwest::Client::new()));
    Client::new(Arc::new(transport))
});

/// Returns a process-wide client that authenticates requests as the default
/// service account of the instance.
///
/// The client is created on first use and shared by all callers. Its access
/// token is cached and refreshed as described in [AuthTransport].
///
/// # Example
/// ```no_run
/// # use google_cloud_gce_auth::default_client;
/// # tokio_test::block_on(async {
/// let url = reqwest::Url::parse("https://storage.googleapis.com/storage/v1/b?project=my-project")?;
/// let response = default_client().get(url).await?;
/// println!("{}", response.text().await?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # });
/// ```
pub fn default_client() -> &'static Client {
    &DEFAULT_CLIENT
}

/// An HTTP client that sends all requests through a [Transport].
///
/// Typically the transport is an [AuthTransport], or a chain of transports
/// ending in one.
#[derive(Clone, Debug)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Creates a client sending requests through `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// The transport used by this client.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Sends `request`.
    pub async fn execute(&self, request: Request) -> Result<Response> {
        self.transport.send(request).await
    }

    /// Sends a `GET` request for `url`.
    pub async fn get(&self, url: Url) -> Result<Response> {
        self.execute(Request::new(Method::GET, url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{Expectation, Server, matchers::*, responders::*};

    #[test]
    fn default_client_is_shared() {
        let a = default_client();
        let b = default_client();
        assert!(std::ptr::eq(a, b));
        let fmt = format!("{:?}", a.transport());
        assert!(fmt.contains("AuthTransport"), "{fmt}");
        assert!(fmt.contains(DEFAULT_SERVICE_ACCOUNT), "{fmt}");
    }

    #[tokio::test]
    async fn get_authenticates() -> anyhow::Result<()> {
        let mds = Server::run();
        mds.expect(
            Expectation::matching(request::method_path(
                "GET",
                "/computeMetadata/v1/instance/service-accounts/default/token",
            ))
            .times(1)
            .respond_with(
                status_code(200).body(r#"{"access_token":"test-token","expires_in":3600}"#),
            ),
        );
        let api = Server::run();
        api.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/v1/things"),
                request::headers(contains(("authorization", "Bearer test-token"))),
            ])
            .times(2)
            .respond_with(status_code(200).body("things")),
        );

        let transport = AuthTransport::builder(Arc::new(reqwest::Client::new()))
            .endpoint(format!("http://{}", mds.addr()))
            .build();
        let client = Client::new(Arc::new(transport));
        let url = Url::parse(&api.url_str("/v1/things"))?;
        for _ in 0..2 {
            let response = client.get(url.clone()).await?;
            assert_eq!(response.text().await?, "things");
        }
        Ok(())
    }
}
