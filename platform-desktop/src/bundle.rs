//! Application Bundle Description for Desktop Hosts

use platform_traits::bundle::{BundleInfo, UNKNOWN};

/// Bundle metadata for desktop and server deployments
///
/// Desktop binaries have no package manifest to interrogate at runtime, so
/// the host process supplies its own values at construction, typically from
/// its build system. Anything unsupplied degrades to `"unknown"` rather
/// than failing.
#[derive(Debug, Clone)]
pub struct DesktopBundleInfo {
    app_version: String,
    build_version: String,
    bundle_identifier: String,
}

impl DesktopBundleInfo {
    pub fn new(
        app_version: impl Into<String>,
        build_version: impl Into<String>,
        bundle_identifier: impl Into<String>,
    ) -> Self {
        Self {
            app_version: non_empty_or_unknown(app_version.into()),
            build_version: non_empty_or_unknown(build_version.into()),
            bundle_identifier: non_empty_or_unknown(bundle_identifier.into()),
        }
    }

    /// Derive the bundle identifier from the running executable's file stem,
    /// leaving both versions `"unknown"`. The fallback for hosts that pass
    /// no build metadata.
    pub fn from_current_exe() -> Self {
        let identifier = std::env::current_exe()
            .ok()
            .and_then(|path| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self::new(UNKNOWN, UNKNOWN, identifier)
    }
}

impl BundleInfo for DesktopBundleInfo {
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

fn non_empty_or_unknown(value: String) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value
    }
}
