//! # Platform Context
//!
//! The composition root handed to the embedding script runtime. One context
//! per host process; it owns the identity resolver and the locale data
//! provisioner and exposes the raw capability handles for binding into the
//! engine.

use std::path::PathBuf;
use std::sync::Arc;

use platform_traits::{
    BundleInfo, DeviceInfo, HostLogger, ProcessInfo, ResourceBundle, SecureStorage,
};
use tracing::debug;

use crate::config::PlatformConfig;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::identity::IdentityResolver;
use crate::provision::IcuDataProvisioner;

struct ContextInner {
    config: PlatformConfig,
    identity: IdentityResolver,
    provisioner: IcuDataProvisioner,
}

/// Primary platform facade exposed to host applications.
///
/// Cheap to clone; clones share the capability handles, the memoized device
/// identifier, and the staged locale data. Temp-staged locale data is
/// removed when the last clone drops, normally at process exit.
#[derive(Clone)]
pub struct PlatformContext {
    inner: Arc<ContextInner>,
}

impl PlatformContext {
    /// Build the context from a validated configuration.
    pub fn new(config: PlatformConfig) -> Self {
        let identity = IdentityResolver::new(
            config.secure_storage.clone(),
            config.device_info.identity_sources(),
        );
        let provisioner =
            IcuDataProvisioner::new(config.resources.clone(), config.icu_staging.clone());

        debug!(app_id = %config.app_id, "platform context ready");

        Self {
            inner: Arc::new(ContextInner {
                config,
                identity,
                provisioner,
            }),
        }
    }

    /// The application identifier this context was configured with.
    pub fn app_id(&self) -> &str {
        &self.inner.config.app_id
    }

    /// Script log output capability.
    pub fn logger(&self) -> Arc<dyn HostLogger> {
        Arc::clone(&self.inner.config.logger)
    }

    /// Device description capability.
    pub fn device_info(&self) -> Arc<dyn DeviceInfo> {
        Arc::clone(&self.inner.config.device_info)
    }

    /// Application version metadata capability.
    pub fn bundle_info(&self) -> Arc<dyn BundleInfo> {
        Arc::clone(&self.inner.config.bundle_info)
    }

    /// Persistent key-value storage capability.
    pub fn secure_storage(&self) -> Arc<dyn SecureStorage> {
        Arc::clone(&self.inner.config.secure_storage)
    }

    /// Process credential capability.
    pub fn process_info(&self) -> Arc<dyn ProcessInfo> {
        Arc::clone(&self.inner.config.process_info)
    }

    /// Packaged resource capability.
    pub fn resources(&self) -> Arc<dyn ResourceBundle> {
        Arc::clone(&self.inner.config.resources)
    }

    /// Stable per-installation device identifier. Never fails; resolved on
    /// first use and identical on every later call in this process.
    pub fn identifier_for_vendor(&self) -> String {
        self.inner.identity.identifier_for_vendor()
    }

    /// Path to a readable copy of the packaged ICU locale data, staging it
    /// on first use.
    pub fn icu_data_path(&self) -> Result<PathBuf> {
        self.inner.provisioner.icu_data_path()
    }

    /// Read-only report of the host environment, assembled fresh from the
    /// capability handles on each call.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::collect(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::Staging;
    use platform_traits::device::{IdentitySource, SourceUnavailable};
    use platform_traits::error::{PlatformError, Result as PlatformResult};
    use platform_traits::storage::MemoryStorage;
    use std::io::Read;

    struct StubDevice;

    impl DeviceInfo for StubDevice {
        fn spec(&self) -> String {
            "stub-device".to_string()
        }

        fn is_real_device(&self) -> bool {
            true
        }

        fn identity_sources(&self) -> Vec<Arc<dyn IdentitySource>> {
            vec![Arc::new(StubSource)]
        }
    }

    struct StubSource;

    impl IdentitySource for StubSource {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn acquire(&self) -> std::result::Result<String, SourceUnavailable> {
            Ok("stub-identity".to_string())
        }
    }

    struct NoResources;

    impl ResourceBundle for NoResources {
        fn open(&self, name: &str) -> PlatformResult<Box<dyn Read + Send>> {
            Err(PlatformError::NotAvailable(format!(
                "resource not packaged: {name}"
            )))
        }
    }

    fn test_context() -> (PlatformContext, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let config = PlatformConfig::builder()
            .app_id("com.example.context")
            .secure_storage(storage.clone())
            .device_info(Arc::new(StubDevice))
            .resources(Arc::new(NoResources))
            .icu_staging(Staging::TempFile)
            .build()
            .unwrap();

        (PlatformContext::new(config), storage)
    }

    #[test]
    fn test_accessors_return_injected_handles() {
        let (context, storage) = test_context();

        let via_context = context.secure_storage();
        via_context.put_string("session.marker", "value");
        assert_eq!(
            storage.get("session.marker").unwrap(),
            Some("value".to_string())
        );
        assert_eq!(context.device_info().spec(), "stub-device");
        assert_eq!(context.app_id(), "com.example.context");
    }

    #[test]
    fn test_identifier_comes_from_device_sources_and_persists() {
        let (context, storage) = test_context();

        assert_eq!(context.identifier_for_vendor(), "stub-identity");
        assert_eq!(
            storage.get(crate::identity::VENDOR_ID_KEY).unwrap(),
            Some("stub-identity".to_string())
        );
    }

    #[test]
    fn test_clones_share_identity_memoization() {
        let (context, _storage) = test_context();
        let clone = context.clone();

        assert_eq!(context.identifier_for_vendor(), clone.identifier_for_vendor());
    }

    #[test]
    fn test_icu_path_propagates_provisioning_failure() {
        let (context, _storage) = test_context();

        let err = context.icu_data_path().unwrap_err();
        assert!(matches!(err, crate::error::Error::Provisioning { .. }));
    }
}
