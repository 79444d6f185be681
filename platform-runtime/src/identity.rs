//! # Device Identity Resolution
//!
//! Produces the stable per-installation identifier scripts observe as the
//! "vendor identifier". Resolution is an ordered fallback chain:
//!
//! 1. the identifier persisted in secure storage from an earlier run
//! 2. the first platform identity source that yields a non-empty token,
//!    in the order the device capability declares them
//! 3. a freshly generated random UUID
//!
//! The chain is total: an unavailable source is logged and skipped, and the
//! random tail means resolution cannot fail. Whatever token wins is written
//! back to secure storage immediately so every later run short-circuits at
//! step 1.
//!
//! ## Concurrency
//!
//! One resolver resolves at most once; concurrent first calls block on the
//! same memoized slot. Two resolvers sharing a store (or two processes) may
//! each generate a token before either write lands; the last write wins and
//! all subsequent runs agree on it. That relaxation is deliberate, the
//! identifier is not a security credential.

use std::sync::Arc;
use std::sync::OnceLock;

use platform_traits::device::IdentitySource;
use platform_traits::storage::SecureStorage;
use tracing::{debug, info};
use uuid::Uuid;

/// Secure-storage key holding the persisted device identifier.
pub const VENDOR_ID_KEY: &str = "device.vendor-id";

/// Resolves and memoizes the per-installation device identifier.
pub struct IdentityResolver {
    storage: Arc<dyn SecureStorage>,
    sources: Vec<Arc<dyn IdentitySource>>,
    cached: OnceLock<String>,
}

impl IdentityResolver {
    /// A resolver over the given store and ordered source list. The list
    /// comes from the device capability; earlier entries are preferred.
    pub fn new(storage: Arc<dyn SecureStorage>, sources: Vec<Arc<dyn IdentitySource>>) -> Self {
        Self {
            storage,
            sources,
            cached: OnceLock::new(),
        }
    }

    /// The device identifier. Never fails, never empty, and stable across
    /// calls for the lifetime of this resolver.
    pub fn identifier_for_vendor(&self) -> String {
        self.cached.get_or_init(|| self.resolve()).clone()
    }

    fn resolve(&self) -> String {
        let stored = self.storage.get_string(VENDOR_ID_KEY, "");
        if !stored.is_empty() {
            debug!("device identifier restored from secure storage");
            return stored;
        }

        let token = self.acquire_from_sources().unwrap_or_else(|| {
            let generated = Uuid::new_v4().to_string();
            info!("no identity source available, generated random device identifier");
            generated
        });

        // Best-effort persistence; a failed write costs a regeneration on
        // the next run, nothing more.
        self.storage.put_string(VENDOR_ID_KEY, &token);
        token
    }

    fn acquire_from_sources(&self) -> Option<String> {
        for source in &self.sources {
            match source.acquire() {
                Ok(token) if !token.is_empty() => {
                    debug!(source = source.name(), "device identifier acquired");
                    return Some(token);
                }
                Ok(_) => {
                    debug!(source = source.name(), "identity source yielded empty token, skipping");
                }
                Err(err) => {
                    debug!(source = source.name(), reason = %err, "identity source unavailable, skipping");
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_traits::device::SourceUnavailable;
    use platform_traits::storage::MemoryStorage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource {
        token: &'static str,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn new(token: &'static str) -> Self {
            Self {
                token,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl IdentitySource for FixedSource {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn acquire(&self) -> Result<String, SourceUnavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.token.to_string())
        }
    }

    struct UnavailableSource;

    impl IdentitySource for UnavailableSource {
        fn name(&self) -> &'static str {
            "unavailable"
        }

        fn acquire(&self) -> Result<String, SourceUnavailable> {
            Err(SourceUnavailable::new("service not reachable"))
        }
    }

    #[test]
    fn test_stored_identifier_wins_over_sources() {
        let storage = Arc::new(MemoryStorage::new());
        storage.put(VENDOR_ID_KEY, "persisted-id").unwrap();

        let source = Arc::new(FixedSource::new("hardware-id"));
        let resolver = IdentityResolver::new(storage, vec![source.clone()]);

        assert_eq!(resolver.identifier_for_vendor(), "persisted-id");
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_first_available_source_wins_and_is_persisted() {
        let storage = Arc::new(MemoryStorage::new());
        let resolver = IdentityResolver::new(
            storage.clone(),
            vec![
                Arc::new(UnavailableSource),
                Arc::new(FixedSource::new("hardware-id")),
                Arc::new(FixedSource::new("never-reached")),
            ],
        );

        assert_eq!(resolver.identifier_for_vendor(), "hardware-id");
        assert_eq!(
            storage.get(VENDOR_ID_KEY).unwrap(),
            Some("hardware-id".to_string())
        );
    }

    #[test]
    fn test_empty_source_token_is_skipped() {
        let storage = Arc::new(MemoryStorage::new());
        let resolver = IdentityResolver::new(
            storage,
            vec![
                Arc::new(FixedSource::new("")),
                Arc::new(FixedSource::new("real-token")),
            ],
        );

        assert_eq!(resolver.identifier_for_vendor(), "real-token");
    }

    #[test]
    fn test_all_sources_unavailable_generates_uuid() {
        let storage = Arc::new(MemoryStorage::new());
        let resolver = IdentityResolver::new(
            storage.clone(),
            vec![Arc::new(UnavailableSource), Arc::new(UnavailableSource)],
        );

        let id = resolver.identifier_for_vendor();
        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(storage.get(VENDOR_ID_KEY).unwrap(), Some(id));
    }

    #[test]
    fn test_no_sources_at_all_still_resolves() {
        let storage = Arc::new(MemoryStorage::new());
        let resolver = IdentityResolver::new(storage, Vec::new());

        let id = resolver.identifier_for_vendor();
        assert!(!id.is_empty());
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_identifier_is_memoized() {
        let storage = Arc::new(MemoryStorage::new());
        let source = Arc::new(FixedSource::new("hardware-id"));
        let resolver = IdentityResolver::new(storage, vec![source.clone()]);

        let first = resolver.identifier_for_vendor();
        let second = resolver.identifier_for_vendor();

        assert_eq!(first, second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_new_resolver_over_same_store_agrees() {
        let storage = Arc::new(MemoryStorage::new());

        let first = IdentityResolver::new(storage.clone(), vec![Arc::new(UnavailableSource)])
            .identifier_for_vendor();
        let second =
            IdentityResolver::new(storage, vec![Arc::new(UnavailableSource)]).identifier_for_vendor();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_persisted_value_is_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        storage.put(VENDOR_ID_KEY, "").unwrap();

        let resolver = IdentityResolver::new(storage, vec![Arc::new(FixedSource::new("fresh"))]);

        assert_eq!(resolver.identifier_for_vendor(), "fresh");
    }
}
