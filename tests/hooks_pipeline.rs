//! End-to-end tests of the hook pipeline
//!
//! Drives the hooks the way the external auth library does: sign-in
//! decision, token enrichment on issuance, then session projection per
//! request, all over raw claim maps.

use std::sync::Arc;

use auth_hooks::identity::AZURE_AD_ID_CLAIM;
use auth_hooks::{Account, AuthConfig, Callbacks, Profile, Session, Token, User};
use serde_json::{json, Map, Value};

fn test_config() -> AuthConfig {
    AuthConfig {
        base_url: "https://app.example.com".to_string(),
        google_client_id: Some("google-id".to_string()),
        google_client_secret: Some("google-secret".to_string()),
        github_client_id: None,
        github_client_secret: None,
        discord_client_id: None,
        discord_client_secret: None,
        microsoft_client_id: Some("ms-id".to_string()),
        microsoft_client_secret: Some("ms-secret".to_string()),
        microsoft_auth_scope: None,
        sign_in_path: None,
    }
}

fn claims(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[test]
fn test_azure_ad_sign_in_flows_object_id_into_session() {
    let hooks = Callbacks::new(Arc::new(test_config()));
    let account = Account::new("azure-ad");
    let profile = Profile::new(claims(json!({
        "oid": "obj-123",
        "sub": "sub-456",
        "email": "alice@contoso.com",
        "name": "Alice Example"
    })));

    // 1. Callback completion: sign-in decision with user backfill.
    let mut user = User::default();
    assert!(hooks.sign_in(&mut user, Some(&account), Some(&profile)));
    assert_eq!(user.email.as_deref(), Some("alice@contoso.com"));
    assert_eq!(user.name.as_deref(), Some("Alice Example"));

    // 2. Token issuance: enrichment over the library's claim map.
    let mut token = Token::from_claims(claims(json!({
        "sub": "sub-456",
        "iat": 1700000000
    })));
    hooks.enrich_token(&mut token, Some(&account), Some(&profile));
    assert_eq!(token.azure_ad_id.as_deref(), Some("obj-123"));

    // 3. Session materialization: projection into the per-request session.
    let mut session = Session::from_fields(claims(json!({
        "user": {"id": "user-1", "superAdmin": false}
    })));
    hooks.project_session(&mut session, &token);

    let fields = session.into_fields();
    assert_eq!(fields.get(AZURE_AD_ID_CLAIM), Some(&json!("obj-123")));
}

#[test]
fn test_token_refresh_without_account_keeps_enrichment() {
    let hooks = Callbacks::new(Arc::new(test_config()));
    let account = Account::new("azure-ad");
    let profile = Profile::new(claims(json!({"sub": "sub-456"})));

    let mut token = Token::default();
    hooks.enrich_token(&mut token, Some(&account), Some(&profile));
    assert_eq!(token.azure_ad_id.as_deref(), Some("sub-456"));

    // Refresh invocations carry no account or profile; the claim persists
    // through the round trip to the library's claim map.
    hooks.enrich_token(&mut token, None, None);
    let round_tripped = Token::from_claims(token.into_claims());
    assert_eq!(round_tripped.azure_ad_id.as_deref(), Some("sub-456"));
}

#[test]
fn test_google_sign_in_leaves_token_and_session_untouched() {
    let hooks = Callbacks::new(Arc::new(test_config()));
    let account = Account::new("google");
    let profile = Profile::new(claims(json!({
        "sub": "google-sub",
        "email": "bob@gmail.com"
    })));

    let mut user = User::default();
    assert!(hooks.sign_in(&mut user, Some(&account), Some(&profile)));
    assert_eq!(user, User::default());

    let mut token = Token::default();
    hooks.enrich_token(&mut token, Some(&account), Some(&profile));
    assert_eq!(token.azure_ad_id, None);

    let mut session = Session::default();
    hooks.project_session(&mut session, &token);
    let fields = session.into_fields();
    assert_eq!(fields.get(AZURE_AD_ID_CLAIM), None);
}

#[test]
fn test_non_oauth_flow_without_account_is_admitted() {
    let hooks = Callbacks::new(Arc::new(test_config()));

    let mut user = User {
        email: Some("local@example.com".to_string()),
        ..User::default()
    };
    assert!(hooks.sign_in(&mut user, None, None));
    assert_eq!(user.email.as_deref(), Some("local@example.com"));
}

#[test]
fn test_redirect_resolution_against_configured_base() {
    let hooks = Callbacks::new(Arc::new(test_config()));

    assert_eq!(
        hooks.redirect("https://app.example.com/dashboard"),
        "https://app.example.com/dashboard"
    );
    assert_eq!(
        hooks.redirect("https://attacker.example.net/"),
        "https://app.example.com"
    );
}

#[test]
fn test_configuration_registers_expected_providers() {
    let config = test_config();
    config.validate().expect("config should validate");

    assert_eq!(config.sign_in_path(), "/signin");
    assert_eq!(
        config.azure_scopes(),
        vec!["openid", "profile", "email", "User.Read"]
    );
    assert_eq!(config.providers().len(), 4);
}
