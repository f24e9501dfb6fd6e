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

//! Types and functions to work with access [Tokens].
//!
//! [Tokens]: https://cloud.google.com/docs/authentication#token

use crate::Result;
use crate::errors::Error;
use crate::mds;
use std::time::Duration;
// Using tokio's wrapper makes the cache testable without relying on clock times.
use tokio::time::Instant;

/// Represents an access token obtained from the metadata service.
#[derive(Clone, PartialEq)]
pub struct Token {
    /// The actual token string.
    ///
    /// This is the value used in the `Authorization: Bearer` header.
    pub token: String,

    /// The instant at which the token expires.
    ///
    /// Note that the `Instant` is not valid across processes.
    pub expires_at: Instant,
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("token", &"[censored]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[async_trait::async_trait]
pub(crate) trait TokenProvider: std::fmt::Debug + Send + Sync {
    async fn token(&self) -> Result<Token>;
}

#[derive(Debug, serde::Deserialize)]
struct MDSTokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    expires_in: i64,
}

/// Fetches tokens for one service account from the metadata service.
#[derive(Clone, Debug)]
pub(crate) struct MdsTokenProvider {
    client: mds::Client,
    suffix: String,
}

impl MdsTokenProvider {
    pub(crate) fn new(client: mds::Client, service_account: &str) -> Self {
        Self {
            client,
            suffix: mds::token_suffix(service_account),
        }
    }
}

#[async_trait::async_trait]
impl TokenProvider for MdsTokenProvider {
    async fn token(&self) -> Result<Token> {
        let body = self.client.fetch(&self.suffix).await?;
        parse_token_response(&body, Instant::now())
    }
}

// Longer lifetimes are truncated, so the expiration is always representable.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

// Unknown fields are ignored. Missing fields decode as empty, and a negative
// lifetime is the same as an expired token.
fn parse_token_response(body: &str, now: Instant) -> Result<Token> {
    let response = serde_json::from_str::<MDSTokenResponse>(body).map_err(Error::malformed)?;
    if response.access_token.is_empty() {
        return Err(Error::EmptyToken);
    }
    let lifetime = Duration::from_secs(u64::try_from(response.expires_in).unwrap_or(0))
        .min(MAX_TOKEN_LIFETIME);
    Ok(Token {
        token: response.access_token,
        expires_at: now.checked_add(lifetime).unwrap_or(now),
    })
}
