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

//! Errors returned by the metadata client and the authenticating transport.

use http::StatusCode;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Represents an error fetching metadata, obtaining an access token, or
/// sending an authenticated request.
///
/// Neither the metadata client nor the authenticating transport retry
/// internally. Applications that need resilience should wrap their calls in a
/// retry loop, and may use [Error::is_retryable] to decide when to stop.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The request could not be sent, or no response was received.
    ///
    /// When talking to the metadata service this is the expected outcome
    /// outside Google Compute Engine: the `metadata` host does not resolve.
    #[error("cannot send the request: {0}")]
    Transport(#[source] BoxError),

    /// The metadata service returned a status code other than `200 OK`.
    #[error("status code {status} trying to fetch {url}")]
    BadStatus {
        /// The status code returned by the metadata service.
        status: StatusCode,
        /// The full URL of the failed request.
        url: String,
    },

    /// The response body could not be read in full.
    #[error("cannot read the response body: {0}")]
    IncompleteResponse(#[source] BoxError),

    /// The token response could not be decoded.
    #[error("malformed token response: {0}")]
    MalformedTokenResponse(#[source] BoxError),

    /// The token response decoded, but it did not contain an access token.
    #[error("no access token returned")]
    EmptyToken,
}

impl Error {
    pub(crate) fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self::Transport(source.into())
    }

    pub(crate) fn incomplete<T: Into<BoxError>>(source: T) -> Self {
        Self::IncompleteResponse(source.into())
    }

    pub(crate) fn malformed<T: Into<BoxError>>(source: T) -> Self {
        Self::MalformedTokenResponse(source.into())
    }

    /// Returns `true` if a future attempt of the same operation may succeed.
    ///
    /// Connection and read failures are transient. Only some status codes are
    /// worth retrying. A malformed or empty token response usually indicates a
    /// misconfigured endpoint, and repeating the request will not fix it.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::IncompleteResponse(_) => true,
            Self::BadStatus { status, .. } => is_retryable(*status),
            Self::MalformedTokenResponse(_) | Self::EmptyToken => false,
        }
    }

    /// The status code, if the metadata service rejected the request.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::BadStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub(crate) fn is_retryable(c: StatusCode) -> bool {
    match c {
        // Internal server errors do not indicate that there is anything wrong
        // with our request, so we retry them.
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::REQUEST_TIMEOUT
        | StatusCode::TOO_MANY_REQUESTS => true,
        _ => false,
    }
}
