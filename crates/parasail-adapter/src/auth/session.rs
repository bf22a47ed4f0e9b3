/*
[INPUT]:  Persisted wallet address and bearer token
[OUTPUT]: Session value, its derived state, and the persistence seam
[POS]:    Auth layer - session data and storage abstraction
[UPDATE]: When session fields or persistence contract change
*/

use std::sync::Mutex;

use crate::http::{Credentials, Result};

/// Current authentication session.
///
/// `bearer_token` is `None` until the first successful verify. The token is
/// never checked locally; expiry is learned from a 401.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub wallet_address: String,
    pub bearer_token: Option<String>,
}

impl Session {
    pub fn new(wallet_address: impl Into<String>, bearer_token: Option<String>) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            bearer_token: bearer_token.filter(|token| !token.trim().is_empty()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer_token.is_some()
    }

    /// Credentials for one request, if a token is present
    pub fn credentials(&self) -> Option<Credentials> {
        self.bearer_token.as_ref().map(|token| Credentials {
            bearer_token: token.clone(),
            wallet_address: self.wallet_address.clone(),
        })
    }
}

/// Authentication state as seen by the session manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
    Reauthenticating,
}

/// Persists the session after every successful authentication
pub trait SessionStore: Send + Sync {
    fn save(&self, session: &Session) -> Result<()>;
}

/// In-memory store keeping every saved session, in order
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    saved: Mutex<Vec<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<Session> {
        self.saved
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> Result<()> {
        let mut guard = self.saved.lock().map_err(|_| {
            crate::http::ParasailError::Persistence("session store lock poisoned".to_string())
        })?;
        guard.push(session.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_unauthenticated() {
        let session = Session::new("0x123", Some("   ".to_string()));
        assert!(!session.is_authenticated());
        assert!(session.credentials().is_none());
    }

    #[test]
    fn test_credentials_carry_address_and_token() {
        let session = Session::new("0x123", Some("jwt".to_string()));
        let credentials = session.credentials().unwrap();
        assert_eq!(credentials.bearer_token, "jwt");
        assert_eq!(credentials.wallet_address, "0x123");
    }

    #[test]
    fn test_memory_store_records_in_order() {
        let store = MemorySessionStore::new();
        store.save(&Session::new("a", Some("1".to_string()))).unwrap();
        store.save(&Session::new("a", Some("2".to_string()))).unwrap();

        let saved = store.saved();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[1].bearer_token.as_deref(), Some("2"));
    }
}
