//! Host Environment Report
//!
//! A serializable snapshot of what the platform knows about its host,
//! queried by embedding applications at startup for support bundles and
//! log headers.

use platform_traits::process::ProcessCredentials;
use serde::{Deserialize, Serialize};

use crate::context::PlatformContext;
use crate::error::{Error, Result};

/// Read-only description of the host environment.
///
/// Assembled fresh from the capability handles on each call; nothing here
/// is cached. Deliberately excludes the vendor identifier so collecting a
/// report never triggers identity resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub app_id: String,
    pub device_spec: String,
    pub real_device: bool,
    pub app_version: String,
    pub build_version: String,
    pub bundle_identifier: String,
    pub process: ProcessCredentials,
}

impl Diagnostics {
    pub(crate) fn collect(context: &PlatformContext) -> Self {
        let device = context.device_info();
        let bundle = context.bundle_info();

        Self {
            app_id: context.app_id().to_string(),
            device_spec: device.spec(),
            real_device: device.is_real_device(),
            app_version: bundle.app_version(),
            build_version: bundle.build_version(),
            bundle_identifier: bundle.bundle_identifier(),
            process: context.process_info().credentials(),
        }
    }

    /// JSON rendering for host-side logging and support bundles.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Internal(format!("Failed to serialize diagnostics: {}", e)))
    }
}
