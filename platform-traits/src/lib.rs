//! # Host Platform Capability Traits
//!
//! Platform abstraction contracts that must be implemented by each host
//! platform embedding the scripting runtime.
//!
//! ## Overview
//!
//! This crate defines the contract between the runtime core and
//! platform-specific implementations. Each trait represents one capability the
//! runtime host requires but that must be provided differently per platform
//! (desktop/server, iOS, Android).
//!
//! ## Traits
//!
//! ### Diagnostics
//! - [`HostLogger`](logger::HostLogger) - Tagged, five-level logging into the
//!   host's native log facility
//! - [`DeviceInfo`](device::DeviceInfo) - Hardware description and
//!   real-device/emulator heuristics
//! - [`BundleInfo`](bundle::BundleInfo) - Application version and identifier
//!   lookup
//! - [`ProcessInfo`](process::ProcessInfo) - POSIX process credential
//!   snapshots
//!
//! ### Storage & Resources
//! - [`SecureStorage`](storage::SecureStorage) - Durable key-value
//!   preferences (preferences store / properties file)
//! - [`ResourceBundle`](resources::ResourceBundle) - Read-only packaged
//!   resources shipped with the application artifact
//!
//! ### Identity
//! - [`IdentitySource`](device::IdentitySource) - One strategy for deriving a
//!   stable per-installation identifier; platform backends declare an
//!   ordered list of these via [`DeviceInfo::identity_sources`]
//!
//! ## Platform Requirements
//!
//! Each supported platform must ship concrete adapters for every required
//! capability:
//!
//! | Platform       | Implementation Crate | Status |
//! |----------------|---------------------|--------|
//! | Desktop/Server | `platform-desktop`  | ✅ Shipped |
//! | iOS            | host-injected       | 📋 Injected over FFI |
//! | Android        | host-injected       | 📋 Injected over FFI |
//!
//! Mobile hosts implement these traits on their side of the FFI boundary and
//! inject the handles at configuration time; no mobile crate lives in this
//! workspace.
//!
//! ## Failure Semantics
//!
//! Capabilities in this layer absorb their own failures wherever the runtime
//! host cannot reasonably react to them:
//!
//! - [`SecureStorage::get_string`]/[`SecureStorage::put_string`] never fail;
//!   read errors fall back to the caller's default and write errors are
//!   logged and dropped.
//! - [`BundleInfo`] lookups degrade to the [`bundle::UNKNOWN`] sentinel.
//! - [`ProcessInfo`] queries degrade to `-1` (or an empty group list) where
//!   POSIX identifiers are not meaningful.
//! - An [`IdentitySource`] that is not usable on the current host reports
//!   [`device::SourceUnavailable`]: a single typed signal, never a
//!   platform-specific error kind.
//!
//! The one deliberate exception is [`ResourceBundle::open`]: a packaged
//! resource that cannot be opened is a hard [`PlatformError::NotAvailable`],
//! because mandatory resources (ICU locale data) must fail loudly.
//!
//! ## Thread Safety
//!
//! All capability traits require `Send + Sync` and are consumed as
//! `Arc<dyn Trait>` handles shared across the runtime host's threads. Every
//! operation is synchronous; this layer performs no internal threading or
//! scheduling of its own.

pub mod bundle;
pub mod device;
pub mod error;
pub mod logger;
pub mod process;
pub mod resources;
pub mod storage;

pub use error::PlatformError;

// Re-export commonly used types
pub use bundle::{BundleInfo, StaticBundleInfo};
pub use device::{DeviceInfo, IdentitySource, SourceUnavailable};
pub use logger::{ConsoleLogger, HostLogger, LogLevel};
pub use process::{NullProcessInfo, ProcessCredentials, ProcessInfo};
pub use resources::ResourceBundle;
pub use storage::{MemoryStorage, SecureStorage};
