//! Application Bundle Metadata
//!
//! Version and identifier lookups against the host application artifact
//! (APK manifest, Info.plist, executable metadata).

/// Sentinel returned when a bundle lookup fails.
///
/// Bundle queries never fail; a version or identifier that cannot be
/// resolved degrades to this value.
pub const UNKNOWN: &str = "unknown";

/// Application bundle information trait
///
/// All lookups are infallible: implementations return [`UNKNOWN`] when the
/// underlying platform query fails or the value was never provided.
pub trait BundleInfo: Send + Sync {
    /// Marketing version of the host application (e.g. `"2.4.1"`).
    fn app_version(&self) -> String;

    /// Monotonic build number of the host application (e.g. `"20417"`).
    fn build_version(&self) -> String;

    /// Reverse-DNS style application identifier (package name / bundle id).
    fn bundle_identifier(&self) -> String;
}

/// Bundle info carrier for hosts that know their own metadata up front.
///
/// Mobile hosts typically construct one of these from values they read on
/// their side of the FFI boundary and inject it at configuration time.
#[derive(Debug, Clone)]
pub struct StaticBundleInfo {
    app_version: String,
    build_version: String,
    bundle_identifier: String,
}

impl StaticBundleInfo {
    pub fn new(
        app_version: impl Into<String>,
        build_version: impl Into<String>,
        bundle_identifier: impl Into<String>,
    ) -> Self {
        Self {
            app_version: app_version.into(),
            build_version: build_version.into(),
            bundle_identifier: bundle_identifier.into(),
        }
    }

    /// All fields set to the [`UNKNOWN`] sentinel.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN, UNKNOWN)
    }
}

impl BundleInfo for StaticBundleInfo {
    fn app_version(&self) -> String {
        self.app_version.clone()
    }

    fn build_version(&self) -> String {
        self.build_version.clone()
    }

    fn bundle_identifier(&self) -> String {
        self.bundle_identifier.clone()
    }
}
