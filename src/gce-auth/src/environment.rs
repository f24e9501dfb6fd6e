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

//! Detects whether the process runs on Google Compute Engine.

use crate::mds;
use tokio::sync::OnceCell;

/// Memoizes facts about the environment hosting this process.
///
/// The project id is fetched from the metadata service at most once per
/// `Environment`. Any error fetching it is treated as "not running on Google
/// Compute Engine".
///
/// # Limitations
///
/// The first outcome is kept for the lifetime of the `Environment`, including
/// failures. If the metadata service is temporarily unavailable on the first
/// call, the environment reports an empty project id and `on_gce() == false`
/// until a new `Environment` is created.
#[derive(Debug, Default)]
pub struct Environment {
    client: mds::Client,
    project_id: OnceCell<String>,
}

impl Environment {
    /// Creates an environment that queries `client`.
    pub fn new(client: mds::Client) -> Self {
        Self {
            client,
            project_id: OnceCell::new(),
        }
    }

    /// The metadata client used by this environment.
    pub fn client(&self) -> &mds::Client {
        &self.client
    }

    /// Returns the project id of the current instance, or an empty string if
    /// not running on Google Compute Engine.
    pub async fn project_id(&self) -> String {
        self.project_id
            .get_or_init(|| async {
                match self.client.fetch(mds::PROJECT_ID_SUFFIX).await {
                    Ok(id) => id,
                    Err(e) => {
                        tracing::debug!(
                            "cannot fetch the project id from the metadata service: {e}"
                        );
                        String::new()
                    }
                }
            })
            .await
            .clone()
    }

    /// Returns `true` if the process is running on Google Compute Engine.
    pub async fn on_gce(&self) -> bool {
        !self.project_id().await.is_empty()
    }
}
