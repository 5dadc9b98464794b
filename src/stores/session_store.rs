// ============================================================================
// SESSION STORE - token persisted in browser storage
// ============================================================================
// A session is "a non-empty token string exists". Nothing validates it
// client-side; the API rejects stale tokens with 401.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use gloo_storage::{LocalStorage, Storage};

pub const ADMIN_TOKEN_KEY: &str = "auth_token";
pub const CITIZEN_TOKEN_KEY: &str = "authToken";

pub trait SessionStore {
    fn get(&self) -> Option<String>;

    fn set(&self, token: &str);

    /// Removes the token and every other value the portal persisted
    fn clear(&self);

    fn is_authenticated(&self) -> bool {
        self.get().map_or(false, |token| !token.is_empty())
    }
}

/// `localStorage`-backed session
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserSessionStore {
    key: &'static str,
}

impl BrowserSessionStore {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    pub fn admin() -> Self {
        Self::new(ADMIN_TOKEN_KEY)
    }

    pub fn citizen() -> Self {
        Self::new(CITIZEN_TOKEN_KEY)
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStore for BrowserSessionStore {
    fn get(&self) -> Option<String> {
        Self::storage()?.get_item(self.key).ok()?
    }

    fn set(&self, token: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(self.key, token).is_err() {
                    log::error!("❌ Could not persist session token");
                }
            }
            None => log::warn!("⚠️ localStorage unavailable, session not persisted"),
        }
    }

    fn clear(&self) {
        if Self::storage().is_none() {
            log::warn!("⚠️ localStorage unavailable, nothing to clear");
            return;
        }
        LocalStorage::delete(self.key);
        LocalStorage::clear();
        log::info!("🗑️ Local session cleared");
    }
}

/// In-memory store, used where no browser storage exists (tests, previews)
#[derive(Debug)]
pub struct MemorySessionStore {
    key: String,
    entries: RefCell<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            key: ADMIN_TOKEN_KEY.to_string(),
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }

    /// Seeds an unrelated persisted value
    pub fn put(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.entries.borrow().get(&self.key).cloned()
    }

    fn set(&self, token: &str) {
        self.put(&self.key.clone(), token);
    }

    fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_non_empty_token_counts_as_authenticated() {
        let store = MemorySessionStore::new();
        assert!(!store.is_authenticated());

        store.set("");
        assert!(!store.is_authenticated());

        for token in ["x", "not-a-jwt", "eyJhbGciOiJIUzI1NiJ9.expired.sig"] {
            store.set(token);
            assert!(store.is_authenticated(), "token {token:?} should authenticate");
        }
    }

    #[test]
    fn clear_wipes_everything_persisted() {
        let store = MemorySessionStore::with_token("abc");
        store.put("sidebar_collapsed", "true");
        store.put("last_filter", "Resolved");
        assert_eq!(store.len(), 3);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.get(), None);
    }
}
