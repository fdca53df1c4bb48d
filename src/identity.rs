//! Identity records exchanged with the external auth library
//!
//! The library hands us loosely-typed claim maps; everything here owns an
//! explicit superset type with an adapter to and from that base map. Custom
//! claims keep their exact wire names (`azureAdId`, `superAdmin`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire name of the Azure AD object-id claim carried on tokens and sessions.
pub const AZURE_AD_ID_CLAIM: &str = "azureAdId";

/// Raw provider profile: a claim map whose shape varies per provider.
///
/// Absent or non-string claims read as `None`, never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile(Map<String, Value>);

impl Profile {
    pub fn new(claims: Map<String, Value>) -> Self {
        Profile(claims)
    }

    pub fn claim(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.claim("email")
    }

    pub fn name(&self) -> Option<&str> {
        self.claim("name")
    }

    /// Azure AD object id.
    pub fn oid(&self) -> Option<&str> {
        self.claim("oid")
    }

    /// OIDC subject claim.
    pub fn sub(&self) -> Option<&str> {
        self.claim("sub")
    }
}

impl From<Map<String, Value>> for Profile {
    fn from(claims: Map<String, Value>) -> Self {
        Profile(claims)
    }
}

/// Which provider-side account produced a sign-in event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_account_id: Option<String>,
}

impl Account {
    pub fn new(provider: impl Into<String>) -> Self {
        Account {
            provider: provider.into(),
            provider_account_id: None,
        }
    }
}

/// Application-side identity candidate for a sign-in event.
///
/// Mutable during the sign-in hook; email and name may be backfilled from
/// the provider profile before the external library persists the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Durable token record: the external library's base claims plus the custom
/// claims this application defines on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Token {
    pub azure_ad_id: Option<String>,
    claims: Map<String, Value>,
}

impl Token {
    /// Adapt the external library's base claim map into the extended record.
    pub fn from_claims(mut claims: Map<String, Value>) -> Self {
        let azure_ad_id = match claims.remove(AZURE_AD_ID_CLAIM) {
            Some(Value::String(id)) => Some(id),
            _ => None,
        };

        Token {
            azure_ad_id,
            claims,
        }
    }

    /// Adapt back into the base claim map the external library persists.
    pub fn into_claims(mut self) -> Map<String, Value> {
        if let Some(id) = self.azure_ad_id.take() {
            self.claims.insert(AZURE_AD_ID_CLAIM.to_string(), Value::String(id));
        }
        self.claims
    }

    /// Read a base claim by wire name.
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }
}

/// Organization membership exposed on the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub role: String,
}

/// Application-specific user fields projected into each session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(default)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizations: Option<Vec<Organization>>,
}

/// Per-request session: projection of [`Token`] plus application fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub azure_ad_id: Option<String>,
    pub user: Option<SessionUser>,
    pub access_token: Option<String>,
    fields: Map<String, Value>,
}

impl Session {
    /// Adapt the external library's base session map into the extended record.
    ///
    /// A missing or malformed `user` object reads as `None`; user fields
    /// are populated outside this component and are never fabricated here.
    pub fn from_fields(mut fields: Map<String, Value>) -> Self {
        let azure_ad_id = match fields.remove(AZURE_AD_ID_CLAIM) {
            Some(Value::String(id)) => Some(id),
            _ => None,
        };
        let access_token = match fields.remove("accessToken") {
            Some(Value::String(token)) => Some(token),
            _ => None,
        };
        let user = fields
            .remove("user")
            .and_then(|v| serde_json::from_value(v).ok());

        Session {
            azure_ad_id,
            user,
            access_token,
            fields,
        }
    }

    /// Adapt back into the base session map handed to the application.
    pub fn into_fields(mut self) -> Map<String, Value> {
        if let Some(id) = self.azure_ad_id.take() {
            self.fields.insert(AZURE_AD_ID_CLAIM.to_string(), Value::String(id));
        }
        if let Some(token) = self.access_token.take() {
            self.fields.insert("accessToken".to_string(), Value::String(token));
        }
        if let Some(user) = self.user.take() {
            if let Ok(user) = serde_json::to_value(&user) {
                self.fields.insert("user".to_string(), user);
            }
        }
        self.fields
    }
}

/// Normalized identity triple expected by the external library after a
/// custom profile mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedIdentity {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
