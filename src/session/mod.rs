//! Signed-in user identity.
//!
//! The session lives in memory and is mirrored to persistent storage as a
//! JSON record under [`SESSION_STORAGE_KEY`]. Storage failures on write are
//! logged and the in-memory session is kept; on read they count as "no
//! session".

mod bootstrap;
mod error;
mod storage;

pub use bootstrap::{Bootstrap, BootstrapState};
pub use error::StorageError;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

use fake::Dummy;
use log::*;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Storage key for the persisted session record.
///
pub const SESSION_STORAGE_KEY: &str = "userDetails";

/// Defines the signed-in user identity.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Session {
    pub fn new(email: impl Into<String>) -> Self {
        Session {
            email: email.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Return the uppercase first letter of the email, or "U".
    ///
    pub fn initial(&self) -> String {
        self.email
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "U".to_string())
    }
}

/// Holds at most one active session and its persisted copy.
///
pub struct SessionStore {
    tx: watch::Sender<Option<Session>>,
    storage: Box<dyn KeyValueStorage>,
}

impl SessionStore {
    /// Return a new signed-out store writing through to the given storage.
    ///
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        let (tx, _rx) = watch::channel(None);
        SessionStore { tx, storage }
    }

    /// Start a session for the email.
    ///
    pub fn sign_in(&self, email: impl Into<String>) -> Session {
        self.establish(Session::new(email))
    }

    /// Start a session for a newly registered user.
    ///
    pub fn register(&self, email: impl Into<String>, name: impl Into<String>) -> Session {
        self.establish(Session::new(email).with_name(name))
    }

    /// Make the session current and persist it.
    ///
    pub fn establish(&self, session: Session) -> Session {
        let session = self.activate(session);
        self.write_through();
        session
    }

    /// Make the session current in memory only. Follow with
    /// [`SessionStore::write_through`].
    ///
    pub fn activate(&self, session: Session) -> Session {
        info!("Starting session for {}.", session.email);
        self.tx.send_replace(Some(session.clone()));
        session
    }

    /// End the current session in memory and in storage.
    ///
    pub fn logout(&self) {
        self.deactivate();
        self.write_through();
    }

    /// End the current session in memory only. Follow with
    /// [`SessionStore::write_through`].
    ///
    pub fn deactivate(&self) {
        if let Some(session) = self.tx.send_replace(None) {
            info!("Ending session for {}.", session.email);
        }
    }

    /// Mirror the in-memory session to storage: write the record when
    /// signed in, remove it otherwise. Blocks on storage IO.
    ///
    pub fn write_through(&self) {
        match self.current() {
            Some(session) => {
                if let Err(e) = self.persist(&session) {
                    error!("Failed to persist session for {}: {}", session.email, e);
                }
            }
            None => {
                if let Err(e) = self.storage.remove(SESSION_STORAGE_KEY) {
                    error!("Failed to remove persisted session: {}", e);
                }
            }
        }
    }

    fn persist(&self, session: &Session) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(session)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;
        self.storage.set(SESSION_STORAGE_KEY, &encoded)
    }

    /// Load the persisted session into memory. Missing, unreadable and
    /// malformed records all yield `None`.
    ///
    pub fn restore(&self) -> Option<Session> {
        let restored = match self.storage.get(SESSION_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) if !session.email.trim().is_empty() => Some(session),
                Ok(_) => {
                    warn!("Ignoring persisted session with empty email.");
                    None
                }
                Err(e) => {
                    warn!("Ignoring malformed persisted session: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                error!("Failed to read persisted session: {}", e);
                None
            }
        };
        self.tx.send_replace(restored.clone());
        restored
    }

    /// Return the current session.
    ///
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Return a receiver that observes session changes.
    ///
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Storage shared between two stores to simulate a process restart.
    struct Shared(Arc<MemoryStorage>);

    impl KeyValueStorage for Shared {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    struct Broken;

    impl KeyValueStorage for Broken {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk gone".to_string()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk gone".to_string()))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk gone".to_string()))
        }
    }

    fn shared_pair() -> (SessionStore, SessionStore, Arc<MemoryStorage>) {
        let backing = Arc::new(MemoryStorage::new());
        (
            SessionStore::new(Box::new(Shared(Arc::clone(&backing)))),
            SessionStore::new(Box::new(Shared(Arc::clone(&backing)))),
            backing,
        )
    }

    #[test]
    fn test_sign_in_persists_email_only() {
        let (store, _, backing) = shared_pair();
        store.sign_in("a@b.com");
        let raw = backing.get(SESSION_STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json, serde_json::json!({ "email": "a@b.com" }));
        assert_eq!(store.current(), Some(Session::new("a@b.com")));
    }

    #[test]
    fn test_register_persists_name() {
        let (store, _, backing) = shared_pair();
        store.register("a@b.com", "Ada");
        let raw = backing.get(SESSION_STORAGE_KEY).unwrap().unwrap();
        let session: Session = serde_json::from_str(&raw).unwrap();
        assert_eq!(session.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_restore_after_sign_in_in_fresh_store() {
        let (first, second, _) = shared_pair();
        first.sign_in("a@b.com");
        assert!(!second.is_signed_in());
        let restored = second.restore().unwrap();
        assert_eq!(restored.email, "a@b.com");
        assert!(second.is_signed_in());
    }

    #[test]
    fn test_restore_after_logout_is_none() {
        let (first, second, _) = shared_pair();
        first.sign_in("a@b.com");
        first.logout();
        assert!(!first.is_signed_in());
        assert_eq!(second.restore(), None);
    }

    #[test]
    fn test_restore_malformed_is_none() {
        let (store, _, backing) = shared_pair();
        backing.set(SESSION_STORAGE_KEY, "not json at all").unwrap();
        assert_eq!(store.restore(), None);

        backing.set(SESSION_STORAGE_KEY, r#"{"name":"no email"}"#).unwrap();
        assert_eq!(store.restore(), None);

        backing.set(SESSION_STORAGE_KEY, r#"{"email":"  "}"#).unwrap();
        assert_eq!(store.restore(), None);
        assert!(!store.is_signed_in());
    }

    #[test]
    fn test_storage_failure_keeps_memory_session() {
        let store = SessionStore::new(Box::new(Broken));
        let session = store.sign_in("a@b.com");
        assert_eq!(store.current(), Some(session));

        store.logout();
        assert!(!store.is_signed_in());
        assert_eq!(store.restore(), None);
    }

    #[test]
    fn test_activate_leaves_storage_until_write_through() {
        let (store, fresh, _) = shared_pair();
        store.activate(Session::new("a@b.com"));
        assert!(store.is_signed_in());
        assert_eq!(fresh.restore(), None);

        store.write_through();
        assert_eq!(fresh.restore(), Some(Session::new("a@b.com")));

        store.deactivate();
        assert!(fresh.restore().is_some());
        store.write_through();
        assert_eq!(fresh.restore(), None);
    }

    #[test]
    fn test_subscribers_see_session_changes() {
        let store = SessionStore::new(Box::new(MemoryStorage::new()));
        let mut rx = store.subscribe();
        store.sign_in("a@b.com");
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|s| s.email.clone()),
            Some("a@b.com".to_string())
        );
    }

    #[test]
    fn test_initial() {
        assert_eq!(Session::new("bob@x.io").initial(), "B");
        assert_eq!(Session::new("").initial(), "U");
    }
}
