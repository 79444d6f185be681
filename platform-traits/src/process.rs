//! Process Identity Abstraction
//!
//! POSIX-style process credentials exposed to the script runtime. Platforms
//! without the concept report sentinels rather than failing.

use serde::{Deserialize, Serialize};

/// Sentinel returned for numeric ids on platforms without POSIX credentials.
pub const UNSUPPORTED_ID: i64 = -1;

/// Snapshot of the process credential set.
///
/// Numeric ids are widened to `i64` so [`UNSUPPORTED_ID`] stays outside the
/// valid unsigned id range on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessCredentials {
    pub uid: i64,
    pub euid: i64,
    pub gid: i64,
    pub egid: i64,
    pub groups: Vec<u32>,
}

/// Process identity trait
///
/// Mirrors the POSIX credential calls:
/// - **Desktop/Server (unix)**: `getuid(2)` family
/// - **Windows and sandboxed mobile**: [`UNSUPPORTED_ID`] for ids, an empty
///   list for supplementary groups
///
/// Every accessor is total; unsupported platforms answer with sentinels
/// instead of errors so script-visible bindings stay exception-free.
pub trait ProcessInfo: Send + Sync {
    /// Real user id, or [`UNSUPPORTED_ID`].
    fn uid(&self) -> i64;

    /// Effective user id, or [`UNSUPPORTED_ID`].
    fn euid(&self) -> i64;

    /// Real group id, or [`UNSUPPORTED_ID`].
    fn gid(&self) -> i64;

    /// Effective group id, or [`UNSUPPORTED_ID`].
    fn egid(&self) -> i64;

    /// Supplementary group ids, empty where unsupported.
    fn groups(&self) -> Vec<u32>;

    /// Full credential snapshot, handy for diagnostics payloads.
    fn credentials(&self) -> ProcessCredentials {
        ProcessCredentials {
            uid: self.uid(),
            euid: self.euid(),
            gid: self.gid(),
            egid: self.egid(),
            groups: self.groups(),
        }
    }
}

/// Sentinel implementation for platforms without process credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProcessInfo;

impl ProcessInfo for NullProcessInfo {
    fn uid(&self) -> i64 {
        UNSUPPORTED_ID
    }

    fn euid(&self) -> i64 {
        UNSUPPORTED_ID
    }

    fn gid(&self) -> i64 {
        UNSUPPORTED_ID
    }

    fn egid(&self) -> i64 {
        UNSUPPORTED_ID
    }

    fn groups(&self) -> Vec<u32> {
        Vec::new()
    }
}
