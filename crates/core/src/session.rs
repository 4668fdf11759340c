//! Client-side session storage
//!
//! Credentials are kept as flat string entries under role-qualified keys
//! (`adminToken`, `adminRefreshToken`, ...), the same layout the web client
//! keeps in browser storage. Any number of roles may hold a session at once.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

use crate::{Result, Role};

/// Credentials issued to one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    /// Not every login response carries one
    pub refresh_token: Option<String>,
}

/// Key/value storage backing the client session
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Stored access token of `role`; an empty entry counts as absent
    fn access_token(&self, role: Role) -> Option<String> {
        self.get(role.token_key()).filter(|token| !token.is_empty())
    }

    /// Stored refresh token of `role`; an empty entry counts as absent
    fn refresh_token(&self, role: Role) -> Option<String> {
        self.get(role.refresh_token_key())
            .filter(|token| !token.is_empty())
    }

    fn set_access_token(&self, role: Role, token: &str) -> Result<()> {
        self.set(role.token_key(), token)
    }

    /// Store a freshly issued pair, replacing whatever the role held before
    fn store_pair(&self, role: Role, pair: &TokenPair) -> Result<()> {
        self.set(role.token_key(), &pair.access_token)?;
        match &pair.refresh_token {
            Some(refresh) => self.set(role.refresh_token_key(), refresh),
            None => self.remove(role.refresh_token_key()),
        }
    }

    /// Drop both credentials of a role
    ///
    /// Both removals are attempted; the first failure is returned.
    fn clear(&self, role: Role) -> Result<()> {
        let access = self.remove(role.token_key());
        let refresh = self.remove(role.refresh_token_key());
        access.and(refresh)
    }

    /// Roles currently holding an access token
    fn active_roles(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.access_token(*role).is_some())
            .collect()
    }
}

/// In-memory session store, lost when the process exits
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// Session store persisted as a JSON object on disk
///
/// The whole file is rewritten after every mutation.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened session store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        pub Store {}

        impl SessionStore for Store {
            fn get(&self, key: &str) -> Option<String>;
            fn set(&self, key: &str, value: &str) -> Result<()>;
            fn remove(&self, key: &str) -> Result<()>;
        }
    }

    fn pair(access: &str, refresh: Option<&str>) -> TokenPair {
        TokenPair {
            access_token: access.to_string(),
            refresh_token: refresh.map(str::to_string),
        }
    }

    #[test]
    fn test_clear_removes_both_role_keys() {
        let mut store = MockStore::new();
        store
            .expect_remove()
            .with(eq("professionalToken"))
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_remove()
            .with(eq("professionalRefreshToken"))
            .times(1)
            .returning(|_| Ok(()));

        store.clear(Role::Professional).unwrap();
    }

    #[test]
    fn test_clear_removes_refresh_key_after_storage_error() {
        let mut store = MockStore::new();
        store
            .expect_remove()
            .with(eq("adminToken"))
            .times(1)
            .returning(|_| Err(Error::Session("disk full".into())));
        store
            .expect_remove()
            .with(eq("adminRefreshToken"))
            .times(1)
            .returning(|_| Ok(()));

        assert!(matches!(
            store.clear(Role::Admin),
            Err(Error::Session(ref message)) if message == "disk full"
        ));
    }

    #[test]
    fn test_empty_entries_count_as_absent() {
        let store = MemorySessionStore::new();
        store.set("adminToken", "").unwrap();
        store.set("adminRefreshToken", "").unwrap();
        store.set("customerToken", "c-access").unwrap();

        assert_eq!(store.access_token(Role::Admin), None);
        assert_eq!(store.refresh_token(Role::Admin), None);
        assert_eq!(store.active_roles(), vec![Role::Customer]);
    }

    #[test]
    fn test_memory_store_survives_poisoned_lock() {
        let store = std::sync::Arc::new(MemorySessionStore::new());
        store.set("customerToken", "c-access").unwrap();

        let poisoner = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.write().unwrap();
            panic!("poison the session lock");
        })
        .join();

        assert!(store.entries.is_poisoned());
        assert_eq!(store.access_token(Role::Customer).as_deref(), Some("c-access"));
        store.clear(Role::Customer).unwrap();
        assert_eq!(store.access_token(Role::Customer), None);
    }

    #[test]
    fn test_memory_store_roles_are_independent() {
        let store = MemorySessionStore::new();
        store
            .store_pair(Role::Admin, &pair("a-access", Some("a-refresh")))
            .unwrap();
        store
            .store_pair(Role::Customer, &pair("c-access", None))
            .unwrap();

        assert_eq!(store.access_token(Role::Admin).as_deref(), Some("a-access"));
        assert_eq!(store.refresh_token(Role::Admin).as_deref(), Some("a-refresh"));
        assert_eq!(store.access_token(Role::Customer).as_deref(), Some("c-access"));
        assert_eq!(store.refresh_token(Role::Customer), None);
        assert_eq!(store.active_roles(), vec![Role::Admin, Role::Customer]);

        store.clear(Role::Admin).unwrap();
        assert_eq!(store.access_token(Role::Admin), None);
        assert_eq!(store.refresh_token(Role::Admin), None);
        assert_eq!(store.active_roles(), vec![Role::Customer]);
    }

    #[test]
    fn test_store_pair_drops_stale_refresh_token() {
        let store = MemorySessionStore::new();
        store
            .store_pair(Role::Customer, &pair("old", Some("old-refresh")))
            .unwrap();
        store.store_pair(Role::Customer, &pair("new", None)).unwrap();

        assert_eq!(store.access_token(Role::Customer).as_deref(), Some("new"));
        assert_eq!(store.refresh_token(Role::Customer), None);
    }

    #[test]
    fn test_file_store_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        {
            let store = FileSessionStore::open(&path).unwrap();
            store
                .store_pair(Role::Professional, &pair("p-access", Some("p-refresh")))
                .unwrap();
            store.set_access_token(Role::Professional, "p-access-2").unwrap();
        }

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(
            reopened.access_token(Role::Professional).as_deref(),
            Some("p-access-2")
        );
        assert_eq!(
            reopened.refresh_token(Role::Professional).as_deref(),
            Some("p-refresh")
        );

        reopened.clear(Role::Professional).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let entries: BTreeMap<String, String> = serde_json::from_str(&content).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FileSessionStore::open(&path),
            Err(Error::Serialization(_))
        ));
    }
}
