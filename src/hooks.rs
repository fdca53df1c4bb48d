//! Auth callback hooks
//!
//! The external auth library drives these per request: sign-in decision on
//! callback completion, token enrichment on issuance/refresh, session
//! projection on every session materialization, and redirect resolution
//! after sign-in/sign-out. Each invocation is independent; nothing here is
//! shared mutable state.

use std::sync::Arc;

use tracing::debug;

use crate::config::AuthConfig;
use crate::identity::{Account, Profile, Session, Token, User};
use crate::providers::ProviderId;

/// Hook handlers bound to the process-wide immutable configuration.
pub struct Callbacks {
    config: Arc<AuthConfig>,
}

impl Callbacks {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Sign-in decision hook.
    ///
    /// For Azure AD sign-ins, backfills `user.email` and `user.name` from
    /// the profile when they are absent. Existing values are never
    /// overwritten. Always admits the attempt; there is no rejection policy.
    pub fn sign_in(
        &self,
        user: &mut User,
        account: Option<&Account>,
        profile: Option<&Profile>,
    ) -> bool {
        debug!(
            provider = account.map(|a| a.provider.as_str()),
            "sign-in hook invoked"
        );

        if is_azure_ad(account) {
            if let Some(profile) = profile {
                if user.email.is_none() {
                    if let Some(email) = profile.email() {
                        user.email = Some(email.to_string());
                        debug!("Setting user email from Azure AD profile");
                    }
                }

                if user.name.is_none() {
                    if let Some(name) = profile.name() {
                        user.name = Some(name.to_string());
                        debug!("Setting user name from Azure AD profile");
                    }
                }
            }
        }

        true
    }

    /// Token enrichment hook.
    ///
    /// Attaches the Azure AD object id to the token, preferring the `oid`
    /// claim and falling back to `sub`. Other providers pass through
    /// unchanged. Idempotent: re-running with the same profile yields the
    /// same token.
    pub fn enrich_token(
        &self,
        token: &mut Token,
        account: Option<&Account>,
        profile: Option<&Profile>,
    ) {
        if is_azure_ad(account) {
            if let Some(profile) = profile {
                token.azure_ad_id = profile
                    .oid()
                    .or_else(|| profile.sub())
                    .map(String::from);
                debug!(azure_ad_id = token.azure_ad_id.as_deref(), "enriched token");
            }
        }
    }

    /// Session projection hook.
    ///
    /// Copies the Azure AD object id from the durable token into the
    /// per-request session when present. No other fields are synchronized
    /// here.
    pub fn project_session(&self, session: &mut Session, token: &Token) {
        if let Some(ref azure_ad_id) = token.azure_ad_id {
            session.azure_ad_id = Some(azure_ad_id.clone());
        }
    }

    /// Redirect resolution against the configured base URL.
    pub fn redirect(&self, url: &str) -> String {
        resolve_redirect(url, &self.config.base_url)
    }
}

/// Resolve the post-sign-in/sign-out redirect target.
///
/// Same-prefix URLs pass through, anything else falls back to the base URL.
/// This is a prefix match, not an origin check: a base of `https://a.com`
/// also matches `https://a.com.evil.com`. Kept as-is to match upstream
/// behavior; a strict origin-equality check is the safer alternative.
pub fn resolve_redirect(url: &str, base_url: &str) -> String {
    if url.starts_with(base_url) {
        url.to_string()
    } else {
        base_url.to_string()
    }
}

fn is_azure_ad(account: Option<&Account>) -> bool {
    account.is_some_and(|a| a.provider == ProviderId::AzureAd.as_str())
}
