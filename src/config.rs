//! Configuration parsing and validation
//!
//! Provider credentials are assembled once at process start from the
//! environment into an immutable [`AuthConfig`] that the hook handlers
//! borrow. There is no module-level mutable state.

use crate::error::{HookError, Result};
use crate::providers::{ProviderId, ProviderRegistration};
use clap::Parser;

const DEFAULT_MICROSOFT_SCOPES: &str = "openid profile email User.Read";
const DEFAULT_SIGN_IN_PATH: &str = "/signin";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "auth-hooks",
    version,
    about = "OAuth/OIDC sign-in provider configuration",
    long_about = "Wires Google, GitHub, Discord and Azure AD sign-in providers: credentials, callback hooks and token/session claim propagation for the embedding web application"
)]
pub struct AuthConfig {
    /// Public base URL of the application (redirect targets must stay under it)
    #[arg(long, env = "AUTH_BASE_URL")]
    pub base_url: String,

    /// Google OAuth client ID
    #[arg(long, env = "GOOGLE_CLIENT_ID")]
    pub google_client_id: Option<String>,

    /// Google OAuth client secret
    #[arg(long, env = "GOOGLE_CLIENT_SECRET")]
    pub google_client_secret: Option<String>,

    /// GitHub OAuth client ID
    #[arg(long, env = "GITHUB_CLIENT_ID")]
    pub github_client_id: Option<String>,

    /// GitHub OAuth client secret
    #[arg(long, env = "GITHUB_CLIENT_SECRET")]
    pub github_client_secret: Option<String>,

    /// Discord OAuth client ID
    #[arg(long, env = "DISCORD_CLIENT_ID")]
    pub discord_client_id: Option<String>,

    /// Discord OAuth client secret
    #[arg(long, env = "DISCORD_CLIENT_SECRET")]
    pub discord_client_secret: Option<String>,

    /// Azure AD (Microsoft) OAuth client ID
    #[arg(long, env = "MICROSOFT_CLIENT_ID")]
    pub microsoft_client_id: Option<String>,

    /// Azure AD (Microsoft) OAuth client secret
    #[arg(long, env = "MICROSOFT_CLIENT_SECRET")]
    pub microsoft_client_secret: Option<String>,

    /// Space-separated Azure AD scopes (default: "openid profile email User.Read")
    #[arg(long, env = "MICROSOFT_AUTH_SCOPE")]
    pub microsoft_auth_scope: Option<String>,

    /// Path unauthenticated users are redirected to (default: /signin)
    #[arg(long, env = "AUTH_SIGN_IN_PATH")]
    pub sign_in_path: Option<String>,
}

impl AuthConfig {
    /// Parse configuration from CLI arguments and environment variables
    pub fn parse_args() -> Self {
        AuthConfig::parse()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(HookError::Config("base URL is required".to_string()));
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| HookError::Config(format!("Invalid base URL: {}", e)))?;

        if let Some(ref path) = self.sign_in_path {
            if !path.starts_with('/') {
                return Err(HookError::Config(format!(
                    "Sign-in path must be absolute, got {:?}",
                    path
                )));
            }
        }

        Ok(())
    }

    /// Get Azure AD OAuth scopes as a list (with defaults)
    pub fn azure_scopes(&self) -> Vec<String> {
        let scopes_str = self
            .microsoft_auth_scope
            .as_deref()
            .unwrap_or(DEFAULT_MICROSOFT_SCOPES);

        let mut scopes: Vec<String> = scopes_str.split_whitespace().map(String::from).collect();

        // Ensure "openid" scope is always included
        if !scopes.iter().any(|s| s == "openid") {
            scopes.insert(0, "openid".to_string());
        }

        scopes
    }

    /// Get sign-in page path (with default)
    pub fn sign_in_path(&self) -> String {
        self.sign_in_path
            .clone()
            .unwrap_or_else(|| DEFAULT_SIGN_IN_PATH.to_string())
    }

    /// Assemble the provider registration list.
    ///
    /// Providers with missing credentials are registered with empty strings,
    /// matching the upstream behavior of deferring the failure to the first
    /// sign-in attempt against that provider.
    pub fn providers(&self) -> Vec<ProviderRegistration> {
        vec![
            ProviderRegistration {
                id: ProviderId::Google,
                client_id: self.google_client_id.clone().unwrap_or_default(),
                client_secret: self.google_client_secret.clone().unwrap_or_default(),
                scopes: Vec::new(),
                allow_email_account_linking: true,
            },
            ProviderRegistration {
                id: ProviderId::GitHub,
                client_id: self.github_client_id.clone().unwrap_or_default(),
                client_secret: self.github_client_secret.clone().unwrap_or_default(),
                scopes: Vec::new(),
                allow_email_account_linking: true,
            },
            ProviderRegistration {
                id: ProviderId::Discord,
                client_id: self.discord_client_id.clone().unwrap_or_default(),
                client_secret: self.discord_client_secret.clone().unwrap_or_default(),
                scopes: Vec::new(),
                allow_email_account_linking: true,
            },
            ProviderRegistration {
                id: ProviderId::AzureAd,
                client_id: self.microsoft_client_id.clone().unwrap_or_default(),
                client_secret: self.microsoft_client_secret.clone().unwrap_or_default(),
                scopes: self.azure_scopes(),
                allow_email_account_linking: true,
            },
        ]
    }
}
