//! Auth Hooks Library
//!
//! OAuth/OIDC sign-in provider configuration and the identity-claim
//! normalization hooks the external auth library invokes per request.

pub mod config;
pub mod error;
pub mod hooks;
pub mod identity;
pub mod providers;

pub use config::AuthConfig;
pub use error::{HookError, Result};
pub use hooks::{resolve_redirect, Callbacks};
pub use identity::{Account, NormalizedIdentity, Profile, Session, Token, User};
pub use providers::{AzureGraphMapper, ProfileMapper, ProviderId, ProviderRegistration};
