//! Device Description and Identity Sources
//!
//! Read-only hardware/OS queries plus the statically-typed registry of
//! identity-source strategies each platform backend declares for deriving a
//! stable per-installation identifier.

use std::sync::Arc;

use thiserror::Error;

/// Typed signal that an optional identity source cannot be used on the
/// current host.
///
/// Platform backends collapse every backend-specific failure (service not
/// installed, file unreadable, permission denied, ...) into this one variant
/// at the source boundary; nothing more specific crosses it. The reason
/// string exists only for diagnostic logging.
#[derive(Debug, Clone, Error)]
#[error("identity source unavailable: {reason}")]
pub struct SourceUnavailable {
    pub reason: String,
}

impl SourceUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// One strategy for producing a device identifier.
///
/// Sources are attempted in the order the backend declares them (see
/// [`DeviceInfo::identity_sources`]); an unavailable source is skipped with a
/// diagnostic log only. The terminal random fallback is not a source; it
/// lives in the resolver and cannot fail.
///
/// # Example
///
/// ```ignore
/// use platform_traits::device::{IdentitySource, SourceUnavailable};
///
/// struct MachineIdSource;
///
/// impl IdentitySource for MachineIdSource {
///     fn name(&self) -> &'static str {
///         "machine-id"
///     }
///
///     fn acquire(&self) -> Result<String, SourceUnavailable> {
///         std::fs::read_to_string("/etc/machine-id")
///             .map(|id| id.trim().to_string())
///             .map_err(|e| SourceUnavailable::new(e.to_string()))
///     }
/// }
/// ```
pub trait IdentitySource: Send + Sync {
    /// Stable name used in diagnostic logs.
    fn name(&self) -> &'static str;

    /// Attempt to produce an identifier token.
    ///
    /// Returns [`SourceUnavailable`] when the source does not apply to this
    /// host; an empty token is treated as unavailable by the resolver.
    fn acquire(&self) -> Result<String, SourceUnavailable>;
}

/// Device information trait
///
/// Pure read-only queries over host OS facilities. No operation here may
/// fail; heuristics degrade to their documented defaults instead.
pub trait DeviceInfo: Send + Sync {
    /// Human-readable hardware/OS description, e.g.
    /// `"linux x86_64 (Ubuntu 24.04 LTS)"`.
    fn spec(&self) -> String;

    /// `false` when the process appears to run on an emulator or inside a
    /// virtual machine, determined by a boolean OR over several platform
    /// fingerprint substring checks. Defaults to `true` where the host
    /// exposes no fingerprint to inspect.
    fn is_real_device(&self) -> bool;

    /// Ordered identity-source strategies this backend supports, most
    /// preferred first.
    ///
    /// The identity resolver walks this list before falling back to random
    /// generation. Backends without any platform identity service return the
    /// default empty list.
    fn identity_sources(&self) -> Vec<Arc<dyn IdentitySource>> {
        Vec::new()
    }
}
