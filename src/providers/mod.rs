//! Sign-in provider registry

pub mod azure;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::{HookError, Result};
use crate::identity::NormalizedIdentity;

pub use azure::AzureGraphMapper;

/// Configured identity providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderId {
    Google,
    GitHub,
    Discord,
    AzureAd,
}

impl ProviderId {
    /// Discriminator string as it appears on [`crate::identity::Account`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Google => "google",
            ProviderId::GitHub => "github",
            ProviderId::Discord => "discord",
            ProviderId::AzureAd => "azure-ad",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "google" => Ok(ProviderId::Google),
            "github" => Ok(ProviderId::GitHub),
            "discord" => Ok(ProviderId::Discord),
            "azure-ad" => Ok(ProviderId::AzureAd),
            other => Err(HookError::Config(format!("Unknown provider: {}", other))),
        }
    }
}

/// Immutable per-provider registration handed to the external auth library.
#[derive(Debug, Clone)]
pub struct ProviderRegistration {
    pub id: ProviderId,
    pub client_id: String,
    pub client_secret: String,
    /// OAuth scopes to request; empty means the library's provider default.
    pub scopes: Vec<String>,
    /// Link accounts across providers that share a verified email address.
    pub allow_email_account_linking: bool,
}

/// Maps an issued access token to the normalized identity triple.
///
/// Alternate to the library's default claim mapping: implementations call
/// the provider's user-info endpoint after token issuance.
#[async_trait]
pub trait ProfileMapper: Send + Sync {
    async fn map_profile(&self, access_token: &str) -> Result<NormalizedIdentity>;
}
