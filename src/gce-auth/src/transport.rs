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

//! The capability to send an HTTP request and receive a response.

use crate::Result;
use crate::errors::Error;
use std::sync::Arc;

/// Sends HTTP requests.
///
/// [AuthTransport][crate::AuthTransport] decorates any implementation of this
/// trait. Implementations are shared across tasks and must be safe for
/// concurrent use.
///
/// `reqwest::Client` implements this trait, and is the default underlying
/// transport.
#[async_trait::async_trait]
pub trait Transport: std::fmt::Debug + Send + Sync {
    /// Sends `request` and returns the response, whatever its status code.
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response>;
}

#[async_trait::async_trait]
impl Transport for reqwest::Client {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        self.execute(request).await.map_err(Error::transport)
    }
}

#[async_trait::async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        self.as_ref().send(request).await
    }
}
