//! Secure Key-Value Storage Abstraction
//!
//! A small persistent string store scoped to the application, used by the
//! identity resolver and exposed to runtime callers.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::Result;

/// Secure key-value storage trait
///
/// Abstracts the platform's durable preference store:
/// - **iOS**: UserDefaults / Keychain
/// - **Android**: SharedPreferences / EncryptedSharedPreferences
/// - **Desktop/Server**: a flat properties file under the user's home
///   directory, or the OS keyring
///
/// Semantics are deliberately weak: synchronous, last-write-wins, no
/// transactions, no multi-key atomicity, and no encryption guarantee beyond
/// whatever the host store natively provides. Keys are namespaced by the
/// caller.
///
/// The fallible primitives (`get`/`put`/`remove`) exist for implementations
/// and tests; runtime callers use the infallible [`get_string`] and
/// [`put_string`] surface, which absorbs storage failures because loss of a
/// non-critical preference must never crash the host runtime.
///
/// [`get_string`]: SecureStorage::get_string
/// [`put_string`]: SecureStorage::put_string
///
/// # Example
///
/// ```ignore
/// use platform_traits::storage::SecureStorage;
///
/// fn remember_theme(store: &dyn SecureStorage) {
///     store.put_string("ui.theme", "dark");
///     let theme = store.get_string("ui.theme", "light");
///     assert_eq!(theme, "dark");
/// }
/// ```
pub trait SecureStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Durably store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Deleting an absent key succeeds.
    fn remove(&self, key: &str) -> Result<()>;

    /// Infallible read: returns `default` when the key is missing or the
    /// underlying store fails. Read failures surface only as a diagnostic
    /// log line.
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default.to_string(),
            Err(err) => {
                debug!(key = key, error = %err, "secure storage read failed, using default");
                default.to_string()
            }
        }
    }

    /// Infallible write: a failed write is logged and dropped, never
    /// surfaced to the caller.
    fn put_string(&self, key: &str, value: &str) {
        if let Err(err) = self.put(key, value) {
            warn!(key = key, error = %err, "secure storage write failed, value dropped");
        }
    }
}

/// In-memory storage for tests and ephemeral hosts.
///
/// Provides the full [`SecureStorage`] contract minus durability; contents
/// vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecureStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().expect("storage lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("storage lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("storage lock poisoned");
        entries.remove(key);
        Ok(())
    }
}
