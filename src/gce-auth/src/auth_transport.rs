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

//! An HTTP transport that authenticates requests with tokens from the
//! metadata service.

use crate::Result;
use crate::errors::Error;
use crate::mds;
use crate::token::{MdsTokenProvider, Token, TokenProvider};
use crate::transport::Transport;
use http::header::{AUTHORIZATION, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// The service account used when none is configured.
pub const DEFAULT_SERVICE_ACCOUNT: &str = "default";

// Tokens expiring within this margin are refreshed before use, so a slow
// request does not carry a token that expires in flight.
const EXPIRY_MARGIN: Duration = Duration::from_secs(2);

#[derive(Debug)]
enum CachedToken {
    Empty,
    Valid { token: Token, header: HeaderValue },
}

/// Adds an `Authorization: Bearer` header to each request, and forwards the
/// request to an underlying [Transport].
///
/// The access token is fetched lazily from the [Metadata Service] and cached
/// until it is within two seconds of its expiration. Concurrent requests share
/// the cached token. When the token must be refreshed, exactly one request
/// fetches the new token, while any concurrent requests wait for the result.
/// The wrapped request itself is sent without holding any lock.
///
/// If a token cannot be obtained, the request is not sent and the error is
/// returned to the caller. The transport never retries.
///
/// The header is appended, existing `Authorization` headers are not removed.
/// Callers should not set their own `Authorization` header on requests sent
/// through this transport.
///
/// # Example
/// ```no_run
/// # use google_cloud_gce_auth::{AuthTransport, Transport};
/// # use std::sync::Arc;
/// # tokio_test::block_on(async {
/// let transport = AuthTransport::new("default", Arc::new(reqwest::Client::new()));
/// let url = reqwest::Url::parse("https://storage.googleapis.com/storage/v1/b?project=my-project")?;
/// let response = transport
///     .send(reqwest::Request::new(reqwest::Method::GET, url))
///     .await?;
/// println!("status = {}", response.status());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # });
/// ```
///
/// [Metadata Service]: https://cloud.google.com/compute/docs/metadata/overview
#[derive(Debug)]
pub struct AuthTransport {
    base: Arc<dyn Transport>,
    service_account: String,
    provider: Box<dyn TokenProvider>,
    cache: Mutex<CachedToken>,
}

impl AuthTransport {
    /// Creates a transport that authenticates as `service_account` and sends
    /// requests using `base`.
    ///
    /// An empty `service_account` selects the instance's default service
    /// account.
    pub fn new<S: Into<String>>(service_account: S, base: Arc<dyn Transport>) -> Self {
        Builder::new(base).service_account(service_account).build()
    }

    /// Returns a [Builder] to customize the transport.
    pub fn builder(base: Arc<dyn Transport>) -> Builder {
        Builder::new(base)
    }

    fn with_provider(
        base: Arc<dyn Transport>,
        service_account: String,
        provider: Box<dyn TokenProvider>,
    ) -> Self {
        Self {
            base,
            service_account,
            provider,
            cache: Mutex::new(CachedToken::Empty),
        }
    }

    /// The service account whose tokens authenticate the requests.
    pub fn service_account(&self) -> &str {
        &self.service_account
    }

    /// Returns the cached access token, refreshing it first if needed.
    pub async fn token(&self) -> Result<Token> {
        self.cached_or_refresh().await.map(|(token, _)| token)
    }

    // The lock is held across the refresh, so a single fetch satisfies all the
    // callers waiting on it.
    async fn cached_or_refresh(&self) -> Result<(Token, HeaderValue)> {
        let mut cache = self.cache.lock().await;
        if let CachedToken::Valid { token, header } = &*cache {
            if token.expires_at > Instant::now() + EXPIRY_MARGIN {
                tracing::trace!(
                    service_account = %self.service_account,
                    "using cached access token"
                );
                return Ok((token.clone(), header.clone()));
            }
        }

        tracing::debug!(
            service_account = %self.service_account,
            "fetching access token from the metadata service"
        );
        let token = self.provider.token().await?;
        let header = bearer_header(&token.token)?;
        tracing::debug!(
            service_account = %self.service_account,
            expires_in_secs = token.expires_at.saturating_duration_since(Instant::now()).as_secs(),
            "refreshed access token"
        );
        *cache = CachedToken::Valid {
            token: token.clone(),
            header: header.clone(),
        };
        Ok((token, header))
    }
}

fn bearer_header(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(Error::malformed)?;
    value.set_sensitive(true);
    Ok(value)
}

#[async_trait::async_trait]
impl Transport for AuthTransport {
    async fn send(&self, mut request: reqwest::Request) -> Result<reqwest::Response> {
        let (_, header) = self.cached_or_refresh().await?;
        request.headers_mut().append(AUTHORIZATION, header);
        self.base.send(request).await
    }
}

/// Creates [AuthTransport] instances.
///
/// # Example
/// ```
/// # use google_cloud_gce_auth::AuthTransport;
/// # use std::sync::Arc;
/// let transport = AuthTransport::builder(Arc::new(reqwest::Client::new()))
///     .service_account("my-sa@my-project.iam.gserviceaccount.com")
///     .build();
/// assert_eq!(transport.service_account(), "my-sa@my-project.iam.gserviceaccount.com");
/// ```
#[derive(Debug)]
pub struct Builder {
    base: Arc<dyn Transport>,
    service_account: Option<String>,
    endpoint: Option<String>,
}

impl Builder {
    /// Creates a builder for a transport that forwards requests to `base`.
    pub fn new(base: Arc<dyn Transport>) -> Self {
        Self {
            base,
            service_account: None,
            endpoint: None,
        }
    }

    /// Sets the service account used to authenticate requests.
    ///
    /// If not set, or set to an empty string, the transport uses the
    /// [default service account] of the instance.
    ///
    /// [default service account]: https://cloud.google.com/iam/docs/service-account-types#default
    pub fn service_account<S: Into<String>>(mut self, service_account: S) -> Self {
        self.service_account = Some(service_account.into());
        self
    }

    /// Sets the metadata service endpoint.
    ///
    /// If not set, the transport uses `http://metadata`.
    pub fn endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Returns an [AuthTransport] with the configured settings.
    pub fn build(self) -> AuthTransport {
        let service_account = self
            .service_account
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_ACCOUNT.to_string());
        let provider = MdsTokenProvider::new(mds::Client::build(self.endpoint), &service_account);
        AuthTransport::with_provider(self.base, service_account, Box::new(provider))
    }
}
