//! Session
//!
//! The client-held authenticated flag plus the identity it was granted to.
//! The session has no token and no expiry; it is created by a successful
//! login, read on every protected page activation and destroyed by logout.

pub mod guard;
pub mod store;

pub use guard::{Access, SessionGuard};
pub use store::{MemoryStorage, Storage, StorageError, StorageResult};

#[cfg(feature = "native")]
pub use store::FileStorage;

use std::rc::Rc;

/// Storage key of the authenticated flag
pub const AUTH_FLAG_KEY: &str = "isAuthenticated";

/// Storage key of the logged-in email
pub const EMAIL_KEY: &str = "userEmail";

/// Snapshot of the session read from storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub email: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Narrow read/write interface over the session storage keys
///
/// This is the only component that touches [`AUTH_FLAG_KEY`] and
/// [`EMAIL_KEY`]; everything else goes through it.
#[derive(Clone)]
pub struct SessionContext {
    storage: Rc<dyn Storage>,
}

impl SessionContext {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Session backed by a fresh [`MemoryStorage`]
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStorage::new()))
    }

    /// Current session. Unreadable storage reads as anonymous.
    pub fn get(&self) -> Session {
        let authenticated = match self.storage.get_item(AUTH_FLAG_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session flag, treating as signed out");
                return Session::anonymous();
            }
        };

        let email = self.storage.get_item(EMAIL_KEY).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read session email");
            None
        });

        Session {
            authenticated,
            email,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().authenticated
    }

    /// Mark the session authenticated for `email`
    ///
    /// The email is written before the flag. On any write failure both keys
    /// are removed again, so a failed call never leaves an authenticated
    /// flag without an identity.
    pub fn set_authenticated(&self, email: &str) -> StorageResult<()> {
        let written = self
            .storage
            .set_item(EMAIL_KEY, email)
            .and_then(|_| self.storage.set_item(AUTH_FLAG_KEY, "true"));

        if let Err(e) = written {
            tracing::warn!(error = %e, "Failed to persist session, rolling back");
            let _ = self.storage.remove_item(AUTH_FLAG_KEY);
            let _ = self.storage.remove_item(EMAIL_KEY);
            return Err(e);
        }

        tracing::info!(email = %email, "Session authenticated");
        Ok(())
    }

    /// Remove both session keys
    pub fn clear(&self) -> StorageResult<()> {
        // Attempt both removals even if the first fails
        let flag = self.storage.remove_item(AUTH_FLAG_KEY);
        let email = self.storage.remove_item(EMAIL_KEY);
        flag.and(email)?;
        tracing::info!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn remove_item(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    /// Accepts the first write, then fails every later one
    #[derive(Default)]
    struct FailSecondWrite {
        inner: MemoryStorage,
        writes: std::cell::Cell<usize>,
    }

    impl Storage for FailSecondWrite {
        fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
            self.writes.set(self.writes.get() + 1);
            if self.writes.get() > 1 {
                return Err(StorageError::Unavailable("quota".to_string()));
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> StorageResult<()> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn test_session_lifecycle() {
        let storage = Rc::new(MemoryStorage::new());
        let session = SessionContext::new(storage.clone());
        assert_eq!(session.get(), Session::anonymous());

        session.set_authenticated("ops@example.com").unwrap();
        assert_eq!(
            session.get(),
            Session {
                authenticated: true,
                email: Some("ops@example.com".to_string()),
            }
        );
        assert_eq!(storage.get_item(AUTH_FLAG_KEY).unwrap().as_deref(), Some("true"));

        session.clear().unwrap();
        assert!(!session.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_only_literal_true_authenticates() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set_item(AUTH_FLAG_KEY, "yes").unwrap();

        let session = SessionContext::new(storage);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_broken_storage_reads_anonymous() {
        let session = SessionContext::new(Rc::new(BrokenStorage));
        assert_eq!(session.get(), Session::anonymous());
        assert!(session.set_authenticated("a@b.com").is_err());
        assert!(session.clear().is_err());
    }

    #[test]
    fn test_partial_write_rolls_back() {
        let storage = Rc::new(FailSecondWrite::default());
        let session = SessionContext::new(storage.clone());

        assert!(session.set_authenticated("a@b.com").is_err());
        assert_eq!(session.get(), Session::anonymous());
        assert!(storage.inner.is_empty());
    }
}
