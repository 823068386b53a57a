use super::*;
use crate::state::test_helpers::{mem_state, seed_user};

// =============================================================================
// PURE HELPERS
// =============================================================================

#[test]
fn name_from_email_takes_local_part() {
    assert_eq!(name_from_email("alice@example.com"), "alice");
}

#[test]
fn name_from_email_handles_degenerate_input() {
    assert_eq!(name_from_email("@example.com"), "user");
    assert_eq!(name_from_email(""), "user");
}

#[test]
fn synthesized_record_uses_metadata_name() {
    let identity = AuthIdentity {
        id: "u1".into(),
        email: "alice@example.com".into(),
        name: Some("Alice".into()),
    };
    let record = synthesize_record(&identity);
    assert_eq!(record.name, "Alice");
    assert_eq!(record.role, Role::User);
}

#[test]
fn synthesized_record_falls_back_to_email_local_part() {
    let identity = AuthIdentity { id: "u1".into(), email: "bob@example.com".into(), name: None };
    let record = synthesize_record(&identity);
    assert_eq!(record.name, "bob");
}

#[test]
fn synthesized_record_never_gets_admin() {
    let identity = AuthIdentity { id: "u1".into(), email: "x@y.z".into(), name: None };
    assert!(!synthesize_record(&identity).role.is_admin());
}

#[test]
fn ensure_admin_allows_admin_only() {
    let mut record = UserRecord {
        id: "u1".into(),
        name: "Alice".into(),
        email: "alice@example.com".into(),
        role: Role::User,
    };
    assert!(matches!(ensure_admin(&record), Err(ApiError::Forbidden)));
    record.role = Role::Admin;
    assert!(ensure_admin(&record).is_ok());
}

#[test]
fn provider_message_prefers_known_keys() {
    assert_eq!(
        provider_message(r#"{"msg":"User already registered"}"#),
        Some("User already registered".to_owned())
    );
    assert_eq!(
        provider_message(r#"{"error_description":"bad grant"}"#),
        Some("bad grant".to_owned())
    );
    assert_eq!(provider_message("not json"), None);
    assert_eq!(provider_message(r#"{"other":"ignored"}"#), None);
}

// =============================================================================
// CALLER RESOLUTION
// =============================================================================

#[tokio::test]
async fn resolve_caller_without_token_is_unauthorized() {
    let (state, _auth) = mem_state();
    let provider = state.provider().unwrap();
    let err = resolve_caller(provider, state.store.as_ref(), None).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn resolve_caller_with_empty_token_is_unauthorized() {
    let (state, _auth) = mem_state();
    let provider = state.provider().unwrap();
    let err = resolve_caller(provider, state.store.as_ref(), Some("")).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn resolve_caller_with_unknown_token_is_unauthorized() {
    let (state, _auth) = mem_state();
    let provider = state.provider().unwrap();
    let err = resolve_caller(provider, state.store.as_ref(), Some("forged"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn resolve_caller_prefers_cached_record() {
    let (state, auth) = mem_state();
    let token = seed_user(&state, &auth, "u1", Role::Admin).await;
    let caller = resolve_caller(state.provider().unwrap(), state.store.as_ref(), Some(&token))
        .await
        .unwrap();
    assert_eq!(caller.id, "u1");
    assert!(caller.role.is_admin());
}

#[tokio::test]
async fn resolve_caller_synthesizes_when_cache_missing() {
    let (state, auth) = mem_state();
    auth.issue(
        "tok-u9",
        AuthIdentity { id: "u9".into(), email: "dana@example.com".into(), name: None },
    )
    .await;

    let caller = resolve_caller(state.provider().unwrap(), state.store.as_ref(), Some("tok-u9"))
        .await
        .unwrap();
    assert_eq!(caller.name, "dana");
    assert_eq!(caller.role, Role::User);

    // Synthesis is read-only; the login path is what persists the record.
    let cached = store::get_record::<UserRecord>(state.store.as_ref(), &store::user_key("u9"))
        .await
        .unwrap();
    assert!(cached.is_none());
}
