//! Azure AD profile mapping via the Microsoft Graph user-info endpoint
//!
//! Fetches `/v1.0/me` with the issued access token and maps the response
//! onto the normalized `{id, email, name}` triple. Failure is fail-closed:
//! a transient error is retried once with backoff, anything else rejects
//! the sign-in attempt.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{HookError, Result};
use crate::identity::NormalizedIdentity;
use crate::providers::ProfileMapper;

const USER_API_URL: &str = "https://graph.microsoft.com/v1.0/me";
const USER_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, Deserialize)]
struct GraphUser {
    id: String,
    #[serde(default)]
    mail: Option<String>,
    #[serde(default, rename = "displayName")]
    display_name: Option<String>,
}

/// [`ProfileMapper`] backed by the Microsoft Graph `me` resource.
pub struct AzureGraphMapper {
    client: reqwest::Client,
    endpoint: String,
}

impl AzureGraphMapper {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(USER_API_URL)
    }

    /// Use a non-default user-info endpoint (sovereign clouds, tests).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(USER_FETCH_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn fetch_user(&self, access_token: &str) -> Result<NormalizedIdentity> {
        let response = self
            .client
            .get(&self.endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    HookError::TransientNetwork(e.to_string())
                } else {
                    HookError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HookError::UpstreamRejected(status));
        }

        let user: GraphUser = response
            .json()
            .await
            .map_err(|e| HookError::MalformedProfile(e.to_string()))?;

        if user.id.is_empty() {
            return Err(HookError::MalformedProfile(
                "user info response carried an empty id".to_string(),
            ));
        }

        Ok(NormalizedIdentity {
            id: user.id,
            email: user.mail,
            name: user.display_name,
        })
    }
}

#[async_trait]
impl ProfileMapper for AzureGraphMapper {
    async fn map_profile(&self, access_token: &str) -> Result<NormalizedIdentity> {
        match self.fetch_user(access_token).await {
            Ok(identity) => {
                debug!("Mapped Azure AD profile for user {}", identity.id);
                Ok(identity)
            }
            // One retry for transient failures, then fail the sign-in.
            Err(err) if err.is_retryable() => {
                warn!("Azure AD user info fetch failed: {}, retrying once", err);
                tokio::time::sleep(RETRY_BACKOFF).await;
                self.fetch_user(access_token).await
            }
            Err(err) => Err(err),
        }
    }
}
