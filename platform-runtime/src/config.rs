//! # Platform Configuration Module
//!
//! Configuration management for the script host platform layer.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `PlatformConfig` instance holding every capability handle the platform
//! context needs. It enforces fail-fast validation so a missing capability
//! surfaces at startup with an actionable message instead of failing later
//! inside the engine.
//!
//! ## Required Capabilities
//!
//! - `SecureStorage` - Required for device identity persistence
//! - `DeviceInfo` - Required for device identification
//! - `ResourceBundle` - Required for locale data provisioning
//!
//! ## Optional Capabilities (with portable defaults)
//!
//! - `HostLogger` - Script log output (default: console, or `tracing` with
//!   the `desktop-shims` feature)
//! - `ProcessInfo` - POSIX credentials (default: sentinel values)
//! - `BundleInfo` - App version metadata (default: `"unknown"` values)
//!
//! When the `desktop-shims` feature is enabled, desktop-ready defaults for
//! the required capabilities are injected automatically if not provided.
//!
//! ## Usage
//!
//! ### Basic Configuration with Desktop Defaults
//!
//! ```ignore
//! use platform_runtime::config::PlatformConfig;
//!
//! let config = PlatformConfig::builder()
//!     .app_id("com.example.host")
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ### Configuration with Injected Capabilities
//!
//! ```ignore
//! use platform_runtime::config::PlatformConfig;
//! use std::sync::Arc;
//!
//! // Note: MyStorage, MyDeviceInfo, MyBundle implement the capability traits
//! let config = PlatformConfig::builder()
//!     .app_id("com.example.host")
//!     .secure_storage(Arc::new(MyStorage))
//!     .device_info(Arc::new(MyDeviceInfo))
//!     .resources(Arc::new(MyBundle))
//!     .build()
//!     .expect("Failed to build config");
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use platform_traits::{
    BundleInfo, DeviceInfo, HostLogger, ProcessInfo, ResourceBundle, SecureStorage,
};

use crate::error::{Error, Result};
use crate::provision::Staging;

/// Platform configuration for the script host.
///
/// Holds the fully resolved capability handles and settings required to
/// build a [`PlatformContext`](crate::context::PlatformContext). Use
/// [`PlatformConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct PlatformConfig {
    /// Application identifier, namespaces the secure store location
    pub app_id: String,

    /// Script log output (optional with portable default)
    pub logger: Arc<dyn HostLogger>,

    /// Device description and identity sources (required)
    pub device_info: Arc<dyn DeviceInfo>,

    /// Application version metadata (optional with portable default)
    pub bundle_info: Arc<dyn BundleInfo>,

    /// Persistent key-value storage (required)
    pub secure_storage: Arc<dyn SecureStorage>,

    /// Process credential queries (optional with portable default)
    pub process_info: Arc<dyn ProcessInfo>,

    /// Packaged resource access (required)
    pub resources: Arc<dyn ResourceBundle>,

    /// Where locale data is staged
    pub icu_staging: Staging,
}

impl std::fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("app_id", &self.app_id)
            .field("logger", &"HostLogger { ... }")
            .field("device_info", &"DeviceInfo { ... }")
            .field("bundle_info", &"BundleInfo { ... }")
            .field("secure_storage", &"SecureStorage { ... }")
            .field("process_info", &"ProcessInfo { ... }")
            .field("resources", &"ResourceBundle { ... }")
            .field("icu_staging", &self.icu_staging)
            .finish()
    }
}

impl PlatformConfig {
    /// Creates a new builder for constructing a `PlatformConfig`.
    pub fn builder() -> PlatformConfigBuilder {
        PlatformConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - App id is non-empty and usable as a directory name
    /// - A fixed staging directory, when configured, is non-empty
    pub fn validate(&self) -> Result<()> {
        if self.app_id.is_empty() {
            return Err(Error::Config("App id cannot be empty".to_string()));
        }

        // A dots-only id would turn the `.{app_id}` store directory into a
        // relative path component.
        if self.app_id.contains(['/', '\\'])
            || self.app_id.contains("..")
            || self.app_id.chars().all(|c| c == '.')
        {
            return Err(Error::Config(format!(
                "App id '{}' is not usable as a directory name",
                self.app_id
            )));
        }

        if let Staging::AppDirectory(dir) = &self.icu_staging {
            if dir.as_os_str().is_empty() {
                return Err(Error::Config(
                    "Locale staging directory cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn secure_storage_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "SecureStorage".to_string(),
        message: "SecureStorage implementation is required for device identity persistence. \
                 Desktop: enable the 'desktop-shims' feature to use the default properties-file store. \
                 iOS: inject a UserDefaults/Keychain-backed store. \
                 Android: inject a SharedPreferences-backed store."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn device_info_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "DeviceInfo".to_string(),
        message: "DeviceInfo implementation is required for device identification. \
                 Desktop: enable the 'desktop-shims' feature to use the default DesktopDeviceInfo. \
                 Mobile: inject a platform-native device info adapter."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn resources_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "ResourceBundle".to_string(),
        message: "ResourceBundle implementation is required for locale data provisioning. \
                 Desktop: enable the 'desktop-shims' feature to read resources installed beside the binary. \
                 iOS: inject an NSBundle-backed resource bundle. \
                 Android: inject an asset-manager-backed resource bundle."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_secure_storage(app_id: &str) -> Result<Arc<dyn SecureStorage>> {
    use platform_desktop::PropertiesStorage;

    let store = PropertiesStorage::for_app(app_id).map_err(|e| {
        Error::Internal(format!("Failed to initialize default SecureStorage: {}", e))
    })?;

    let store: Arc<dyn SecureStorage> = Arc::new(store);
    Ok(store)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_secure_storage(_app_id: &str) -> Result<Arc<dyn SecureStorage>> {
    Err(secure_storage_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_device_info() -> Result<Arc<dyn DeviceInfo>> {
    use platform_desktop::DesktopDeviceInfo;

    let info: Arc<dyn DeviceInfo> = Arc::new(DesktopDeviceInfo::new());
    Ok(info)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_device_info() -> Result<Arc<dyn DeviceInfo>> {
    Err(device_info_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_resources(resource_dir: Option<PathBuf>) -> Result<Arc<dyn ResourceBundle>> {
    use platform_desktop::DirResourceBundle;

    let bundle = match resource_dir {
        Some(dir) => DirResourceBundle::new(dir),
        None => DirResourceBundle::beside_executable(),
    };

    let bundle: Arc<dyn ResourceBundle> = Arc::new(bundle);
    Ok(bundle)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_resources(_resource_dir: Option<PathBuf>) -> Result<Arc<dyn ResourceBundle>> {
    Err(resources_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_logger() -> Arc<dyn HostLogger> {
    Arc::new(platform_desktop::TracingLogger::new())
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_logger() -> Arc<dyn HostLogger> {
    use platform_traits::ConsoleLogger;

    Arc::new(ConsoleLogger::default())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_process_info() -> Arc<dyn ProcessInfo> {
    Arc::new(platform_desktop::PosixProcessInfo::new())
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_process_info() -> Arc<dyn ProcessInfo> {
    use platform_traits::NullProcessInfo;

    Arc::new(NullProcessInfo)
}

#[cfg(feature = "desktop-shims")]
fn provide_default_bundle_info() -> Arc<dyn BundleInfo> {
    Arc::new(platform_desktop::DesktopBundleInfo::from_current_exe())
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_bundle_info() -> Arc<dyn BundleInfo> {
    use platform_traits::StaticBundleInfo;

    Arc::new(StaticBundleInfo::unknown())
}

/// Builder for constructing [`PlatformConfig`] instances.
///
/// Use this builder to incrementally inject capability handles and then
/// call [`build()`](PlatformConfigBuilder::build) to create the final
/// config. The builder validates required capabilities and provides helpful
/// error messages.
#[derive(Default)]
pub struct PlatformConfigBuilder {
    app_id: Option<String>,
    logger: Option<Arc<dyn HostLogger>>,
    device_info: Option<Arc<dyn DeviceInfo>>,
    bundle_info: Option<Arc<dyn BundleInfo>>,
    secure_storage: Option<Arc<dyn SecureStorage>>,
    process_info: Option<Arc<dyn ProcessInfo>>,
    resources: Option<Arc<dyn ResourceBundle>>,
    icu_staging: Option<Staging>,
    resource_dir: Option<PathBuf>,
}

impl PlatformConfigBuilder {
    /// Sets the application identifier (required).
    ///
    /// The id namespaces everything the platform persists for this host:
    /// the secure store directory on desktop, and whatever store the mobile
    /// adapters choose on their side.
    ///
    /// # Examples
    ///
    /// ```
    /// use platform_runtime::config::PlatformConfig;
    ///
    /// let builder = PlatformConfig::builder()
    ///     .app_id("com.example.host");
    /// ```
    pub fn app_id(mut self, id: impl Into<String>) -> Self {
        self.app_id = Some(id.into());
        self
    }

    /// Sets the script log output capability.
    ///
    /// If not provided, log calls go to the console, or into the process's
    /// `tracing` subscriber when the `desktop-shims` feature is enabled.
    ///
    /// # Arguments
    ///
    /// * `logger` - Host logger implementation
    pub fn logger(mut self, logger: Arc<dyn HostLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets the device info capability (required).
    ///
    /// Supplies the device description and the ordered identity sources the
    /// identity resolver walks.
    ///
    /// # Arguments
    ///
    /// * `info` - Device info implementation
    pub fn device_info(mut self, info: Arc<dyn DeviceInfo>) -> Self {
        self.device_info = Some(info);
        self
    }

    /// Sets the bundle info capability.
    ///
    /// If not provided, versions and identifier degrade to `"unknown"`.
    ///
    /// # Arguments
    ///
    /// * `info` - Bundle info implementation
    pub fn bundle_info(mut self, info: Arc<dyn BundleInfo>) -> Self {
        self.bundle_info = Some(info);
        self
    }

    /// Sets the secure storage capability (required).
    ///
    /// The store persists the device identifier across runs, so it must be
    /// durable for identity stability to hold.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use platform_runtime::config::PlatformConfig;
    /// use std::sync::Arc;
    ///
    /// let builder = PlatformConfig::builder()
    ///     .secure_storage(Arc::new(MyStorage));
    /// ```
    pub fn secure_storage(mut self, storage: Arc<dyn SecureStorage>) -> Self {
        self.secure_storage = Some(storage);
        self
    }

    /// Sets the process info capability.
    ///
    /// If not provided, credential queries answer with sentinel values, or
    /// with real POSIX calls when the `desktop-shims` feature is enabled.
    ///
    /// # Arguments
    ///
    /// * `info` - Process info implementation
    pub fn process_info(mut self, info: Arc<dyn ProcessInfo>) -> Self {
        self.process_info = Some(info);
        self
    }

    /// Sets the packaged resource capability (required).
    ///
    /// The locale data provisioner reads the ICU blob through this handle.
    ///
    /// # Arguments
    ///
    /// * `resources` - Resource bundle implementation
    pub fn resources(mut self, resources: Arc<dyn ResourceBundle>) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Sets where locale data is staged.
    ///
    /// Default: a temp file removed at context drop. Mobile hosts pass
    /// their app-support directory to keep one staged copy per install.
    ///
    /// # Arguments
    ///
    /// * `staging` - Staging strategy
    pub fn icu_staging(mut self, staging: Staging) -> Self {
        self.icu_staging = Some(staging);
        self
    }

    /// Sets the directory the default desktop resource bundle reads from.
    ///
    /// Only consulted when no [`resources`](Self::resources) handle is
    /// injected and the `desktop-shims` feature is enabled; the default
    /// otherwise is `resources/` beside the executable.
    ///
    /// # Arguments
    ///
    /// * `dir` - Resource directory path
    pub fn resource_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.resource_dir = Some(dir.into());
        self
    }

    /// Builds the final `PlatformConfig` instance.
    ///
    /// This validates all required capabilities are available and returns
    /// an error with an actionable message if anything is missing.
    ///
    /// # Returns
    ///
    /// Returns `Ok(PlatformConfig)` on success, or an error if:
    /// - Required capabilities are missing and no default can be injected
    /// - Configuration values are invalid
    pub fn build(self) -> Result<PlatformConfig> {
        let app_id = self.app_id.ok_or_else(|| {
            Error::Config("App id is required. Use .app_id() to set it.".to_string())
        })?;

        let secure_storage = match self.secure_storage {
            Some(storage) => storage,
            None => provide_default_secure_storage(&app_id)?,
        };

        let device_info = match self.device_info {
            Some(info) => info,
            None => provide_default_device_info()?,
        };

        let resources = match self.resources {
            Some(resources) => resources,
            None => provide_default_resources(self.resource_dir)?,
        };

        let config = PlatformConfig {
            app_id,
            logger: self.logger.unwrap_or_else(provide_default_logger),
            device_info,
            bundle_info: self.bundle_info.unwrap_or_else(provide_default_bundle_info),
            secure_storage,
            process_info: self.process_info.unwrap_or_else(provide_default_process_info),
            resources,
            icu_staging: self.icu_staging.unwrap_or_default(),
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_traits::error::Result as PlatformResult;
    use platform_traits::{MemoryStorage, PlatformError};
    use std::io::Read;
    use std::path::PathBuf;

    struct MockDeviceInfo;

    impl DeviceInfo for MockDeviceInfo {
        fn spec(&self) -> String {
            "test-device".to_string()
        }

        fn is_real_device(&self) -> bool {
            false
        }
    }

    struct MockResources;

    impl ResourceBundle for MockResources {
        fn open(&self, name: &str) -> PlatformResult<Box<dyn Read + Send>> {
            Err(PlatformError::NotAvailable(format!(
                "resource not packaged: {name}"
            )))
        }
    }

    fn full_builder() -> PlatformConfigBuilder {
        PlatformConfig::builder()
            .app_id("com.example.test")
            .secure_storage(Arc::new(MemoryStorage::new()))
            .device_info(Arc::new(MockDeviceInfo))
            .resources(Arc::new(MockResources))
    }

    #[test]
    fn test_builder_with_all_required_capabilities() {
        let config = full_builder().build().unwrap();

        assert_eq!(config.app_id, "com.example.test");
        assert_eq!(config.device_info.spec(), "test-device");
        assert!(matches!(config.icu_staging, Staging::TempFile));
    }

    #[test]
    fn test_builder_requires_app_id() {
        let result = PlatformConfig::builder()
            .secure_storage(Arc::new(MemoryStorage::new()))
            .device_info(Arc::new(MockDeviceInfo))
            .resources(Arc::new(MockResources))
            .build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("App id is required"));
    }

    #[test]
    fn test_validate_rejects_empty_app_id() {
        let result = full_builder().app_id("").build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_validate_rejects_path_like_app_id() {
        let result = full_builder().app_id("../escape").build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("not usable as a directory name"));
    }

    #[test]
    fn test_validate_rejects_dots_only_app_id() {
        // `.{app_id}` for "." would be "..", landing the store outside home.
        let result = full_builder().app_id(".").build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("not usable as a directory name"));
    }

    #[test]
    fn test_validate_rejects_empty_staging_dir() {
        let result = full_builder()
            .icu_staging(Staging::AppDirectory(PathBuf::new()))
            .build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("staging directory"));
    }

    #[test]
    fn test_unprovided_optional_capabilities_get_defaults() {
        let config = full_builder().build().unwrap();

        // Sentinel or desktop defaults, but always present.
        let _ = config.logger.min_level();
        let _ = config.process_info.credentials();
        assert!(!config.bundle_info.app_version().is_empty());
    }

    #[test]
    fn test_staging_override_is_kept() {
        let config = full_builder()
            .icu_staging(Staging::AppDirectory(PathBuf::from("/var/app/support")))
            .build()
            .unwrap();

        match config.icu_staging {
            Staging::AppDirectory(dir) => {
                assert_eq!(dir, PathBuf::from("/var/app/support"));
            }
            other => panic!("unexpected staging: {other:?}"),
        }
    }

    #[test]
    fn test_config_is_cloneable() {
        let config = full_builder().build().unwrap();
        let cloned = config.clone();

        assert_eq!(cloned.app_id, config.app_id);
    }

    #[test]
    fn test_debug_does_not_expose_capability_internals() {
        let config = full_builder().build().unwrap();
        let debug = format!("{config:?}");

        assert!(debug.contains("com.example.test"));
        assert!(debug.contains("SecureStorage { ... }"));
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_build_with_desktop_defaults() {
        use tempfile::TempDir;

        // Keep the default properties store out of the real home directory
        // by injecting a temp-backed one; everything else defaults.
        let dir = TempDir::new().unwrap();
        let storage =
            platform_desktop::PropertiesStorage::new(dir.path().join("store.properties")).unwrap();

        let config = PlatformConfig::builder()
            .app_id("com.example.desktop")
            .secure_storage(Arc::new(storage))
            .build()
            .expect("desktop defaults should succeed");

        assert!(!config.device_info.spec().is_empty());
        assert!(!config.bundle_info.bundle_identifier().is_empty());
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_missing_secure_storage_names_capability() {
        let result = PlatformConfig::builder()
            .app_id("com.example.test")
            .device_info(Arc::new(MockDeviceInfo))
            .resources(Arc::new(MockResources))
            .build();

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("SecureStorage"));
        assert!(err_msg.contains("identity persistence"));
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_missing_device_info_names_capability() {
        let result = PlatformConfig::builder()
            .app_id("com.example.test")
            .secure_storage(Arc::new(MemoryStorage::new()))
            .resources(Arc::new(MockResources))
            .build();

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("DeviceInfo"));
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_missing_resources_names_capability() {
        let result = PlatformConfig::builder()
            .app_id("com.example.test")
            .secure_storage(Arc::new(MemoryStorage::new()))
            .device_info(Arc::new(MockDeviceInfo))
            .build();

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("ResourceBundle"));
        assert!(err_msg.contains("locale data"));
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_all_capabilities_missing_fails_fast() {
        let result = PlatformConfig::builder().app_id("com.example.test").build();

        assert!(matches!(
            result.unwrap_err(),
            Error::CapabilityMissing { .. }
        ));
    }
}
