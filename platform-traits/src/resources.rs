//! Packaged Resource Access
//!
//! Read-only access to data files shipped inside the application package,
//! such as the ICU locale data blob.

use std::io::Read;

use crate::error::Result;

/// Packaged resource bundle trait
///
/// Resolves logical resource names to readable byte streams:
/// - **iOS**: main `NSBundle` resources
/// - **Android**: APK assets
/// - **Desktop/Server**: a resource directory installed beside the binary
///
/// Names are flat logical identifiers (`"icudtl.dat"`), not paths; bundles
/// decide their own layout. Streams are returned rather than whole buffers
/// because some resources are tens of megabytes.
pub trait ResourceBundle: Send + Sync {
    /// Open the named resource for reading.
    ///
    /// Returns [`PlatformError::NotAvailable`] when the package does not
    /// contain `name`.
    ///
    /// [`PlatformError::NotAvailable`]: crate::error::PlatformError::NotAvailable
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>>;

    /// Whether the package contains the named resource.
    fn contains(&self, name: &str) -> bool {
        self.open(name).is_ok()
    }
}
