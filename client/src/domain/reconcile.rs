//! Profile reconciliation: merging a freshly fetched authoritative user
//! record into the locally cached copy.

use log::warn;
use shared::User;
use thiserror::Error;

use crate::services::api::{ApiError, LedgerApi};
use crate::services::session::SessionStore;

/// Why a profile refresh produced no usable result.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The cached user carries no identifier; the session is not
    /// authenticated and the caller must redirect to login.
    #[error("no authenticated session")]
    AuthRequired,
    /// The authoritative fetch failed; the cached user stays as-is.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Merge a server snapshot into the cached user, field by field.
///
/// A server value wins only when it is present (non-empty for text fields)
/// and differs from the cached value; everything else keeps the cached value.
/// A wholesale overwrite could erase fields the server left empty but the
/// client still holds.
pub fn reconcile(cached: &User, server: &User) -> User {
    let mut merged = cached.clone();
    merge_text(&mut merged.username, &server.username);
    merge_text(&mut merged.email, &server.email);
    merge_value(&mut merged.current_balance, &server.current_balance);
    merge_opt_text(&mut merged.created_at, &server.created_at);
    merge_opt_text(&mut merged.last_login, &server.last_login);
    merge_value(&mut merged.currency_id, &server.currency_id);
    merge_opt_text(&mut merged.image_url, &server.image_url);
    merge_value(&mut merged.id, &server.id);
    // The credential hash counts as present even when empty.
    merge_value(&mut merged.password_hash, &server.password_hash);
    merged
}

fn merge_text(target: &mut String, server: &str) {
    if !server.is_empty() && server != target {
        *target = server.to_string();
    }
}

fn merge_opt_text(target: &mut Option<String>, server: &Option<String>) {
    if let Some(value) = server {
        if !value.is_empty() && target.as_deref() != Some(value.as_str()) {
            *target = Some(value.clone());
        }
    }
}

fn merge_value<T: Clone + PartialEq>(target: &mut Option<T>, server: &Option<T>) {
    if server.is_some() && *server != *target {
        *target = server.clone();
    }
}

/// Fetch the authoritative profile, merge it into the cached copy, persist
/// the result, and return the merged snapshot.
///
/// A cached user without an id aborts before any network traffic.
pub async fn refresh_user(
    api: &dyn LedgerApi,
    store: &dyn SessionStore,
    cached: &User,
) -> Result<User, RefreshError> {
    let user_id = cached.id.ok_or(RefreshError::AuthRequired)?;
    let server = api.get_user(user_id).await?;
    let merged = reconcile(cached, &server);
    // A failed cache write must not discard the merged snapshot.
    if let Err(e) = store.save_user(&merged) {
        warn!("failed to persist reconciled profile: {e:#}");
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session::{MemorySessionStore, SessionStore};
    use crate::testing::{sample_user, MockLedgerApi};

    #[test]
    fn test_changed_field_updates_unchanged_field_stays() {
        let cached = sample_user();
        let mut server = sample_user();
        server.email = "new@example.com".to_string();

        let merged = reconcile(&cached, &server);
        assert_eq!(merged.username, cached.username);
        assert_eq!(merged.email, "new@example.com");
    }

    #[test]
    fn test_empty_server_text_never_overwrites() {
        let cached = sample_user();
        let mut server = sample_user();
        server.username = String::new();
        server.image_url = Some(String::new());

        let merged = reconcile(&cached, &server);
        assert_eq!(merged.username, cached.username);
        assert_eq!(merged.image_url, cached.image_url);
    }

    #[test]
    fn test_absent_server_value_keeps_cached() {
        let cached = sample_user();
        let mut server = sample_user();
        server.current_balance = None;
        server.currency_id = None;
        server.last_login = None;

        let merged = reconcile(&cached, &server);
        assert_eq!(merged.current_balance, cached.current_balance);
        assert_eq!(merged.currency_id, cached.currency_id);
        assert_eq!(merged.last_login, cached.last_login);
    }

    #[test]
    fn test_present_numeric_change_is_taken() {
        let cached = sample_user();
        let mut server = sample_user();
        server.current_balance = Some(999.75);
        server.currency_id = Some(8);

        let merged = reconcile(&cached, &server);
        assert_eq!(merged.current_balance, Some(999.75));
        assert_eq!(merged.currency_id, Some(8));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let cached = sample_user();
        let mut server = sample_user();
        server.email = "new@example.com".to_string();
        server.current_balance = Some(500.0);

        let once = reconcile(&cached, &server);
        let twice = reconcile(&once, &server);
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_refresh_without_id_aborts_before_any_network_call() {
        let api = MockLedgerApi::happy();
        let store = MemorySessionStore::new();
        let mut cached = sample_user();
        cached.id = None;

        let err = refresh_user(&api, &store, &cached).await.unwrap_err();
        assert!(matches!(err, RefreshError::AuthRequired));
        assert!(api.calls.borrow().is_empty());
        assert_eq!(store.load_user().unwrap(), None);
    }

    #[tokio::test]
    async fn test_refresh_fetch_failure_is_distinguishable() {
        let mut api = MockLedgerApi::happy();
        api.user = Err(ApiError::Status(502));
        let store = MemorySessionStore::new();

        let err = refresh_user(&api, &store, &sample_user()).await.unwrap_err();
        assert!(matches!(err, RefreshError::Api(ApiError::Status(502))));
        assert_eq!(store.load_user().unwrap(), None);
    }

    #[tokio::test]
    async fn test_refresh_persists_merged_snapshot() {
        let mut api = MockLedgerApi::happy();
        let mut server = sample_user();
        server.current_balance = Some(1000.0);
        api.user = Ok(server);

        let store = MemorySessionStore::new();
        let merged = refresh_user(&api, &store, &sample_user()).await.unwrap();

        assert_eq!(merged.current_balance, Some(1000.0));
        assert_eq!(store.load_user().unwrap(), Some(merged));
    }
}
