//! Secure Storage using the OS Keychain

use keyring::Entry;
use platform_traits::error::{PlatformError, Result};
use platform_traits::storage::SecureStorage;
use tracing::debug;

/// Keyring-based storage implementation
///
/// Uses platform-specific secure storage:
/// - macOS: Keychain
/// - Windows: Credential Manager (DPAPI)
/// - Linux: Secret Service (libsecret)
///
/// An alternative to the properties-file store for hosts that want values
/// encrypted at rest. Headless systems often lack a keyring daemon; such
/// hosts should stay on the properties file.
pub struct KeyringStorage {
    service_name: String,
}

impl KeyringStorage {
    /// Create a store whose entries are namespaced by the given service
    /// name, conventionally the application identifier.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    /// Get a keyring entry for the given key
    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service_name, key).map_err(Self::map_keyring_error)
    }

    /// Convert keyring error to PlatformError
    fn map_keyring_error(e: keyring::Error) -> PlatformError {
        PlatformError::OperationFailed(format!("Keyring error: {}", e))
    }
}

impl SecureStorage for KeyringStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => {
                debug!(key = key, "retrieved entry from keyring");
                Ok(Some(value))
            }
            Err(keyring::Error::NoEntry) => {
                debug!(key = key, "entry not found in keyring");
                Ok(None)
            }
            Err(e) => Err(Self::map_keyring_error(e)),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(Self::map_keyring_error)?;

        debug!(key = key, "stored entry in keyring");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) => {
                debug!(key = key, "deleted entry from keyring");
                Ok(())
            }
            // Already deleted, consider it success
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(Self::map_keyring_error(e)),
        }
    }
}
