//! # Desktop Platform Implementations
//!
//! Default implementations of the platform capability traits for desktop and
//! server hosts (Linux, macOS, Windows).
//!
//! ## Overview
//!
//! This crate provides production-ready implementations of every capability
//! trait using desktop-appropriate mechanisms:
//! - `SecureStorage` as a properties file under the user's home directory,
//!   or the OS keychain via the `keyring` crate
//! - `DeviceInfo` reading DMI/machine-id identity sources on Linux
//! - `ProcessInfo` using the POSIX `getuid(2)` family
//! - `BundleInfo` derived from the running executable
//! - `ResourceBundle` as a resource directory installed beside the binary
//! - `HostLogger` forwarding into the process's `tracing` subscriber
//!
//! ## Feature Flags
//!
//! - `secure-store`: Enable OS keychain integration (default)
//!
//! ## Usage
//!
//! ```ignore
//! use platform_desktop::{DesktopDeviceInfo, PropertiesStorage};
//! use platform_traits::{DeviceInfo, SecureStorage};
//!
//! let storage = PropertiesStorage::for_app("com.example.host")?;
//! let device = DesktopDeviceInfo::new();
//!
//! // Hand the capabilities to the platform configuration
//! ```

mod bundle;
mod device;
mod identity;
mod logger;
mod process;
mod properties;
mod resources;

#[cfg(feature = "secure-store")]
mod secure_store;

pub use bundle::DesktopBundleInfo;
pub use device::DesktopDeviceInfo;
pub use identity::{DmiProductUuidSource, MachineIdSource};
pub use logger::TracingLogger;
pub use process::PosixProcessInfo;
pub use properties::PropertiesStorage;
pub use resources::DirResourceBundle;

#[cfg(feature = "secure-store")]
pub use secure_store::KeyringStorage;
