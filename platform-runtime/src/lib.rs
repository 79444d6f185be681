//! # Platform Runtime Module
//!
//! Composition root for the script host platform layer:
//! - Configuration management and capability injection
//! - Device identity resolution
//! - Locale data (ICU) provisioning
//! - Logging and tracing infrastructure
//!
//! ## Overview
//!
//! Host applications build a [`PlatformConfig`] with their capability
//! implementations (desktop hosts can lean on the `desktop-shims` feature
//! for defaults), wrap it in a [`PlatformContext`], and hand the context to
//! the embedded script engine. The context owns the two pieces of platform
//! machinery with real behavior behind them: the identity resolver and the
//! locale data provisioner.

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod identity;
pub mod logging;
pub mod provision;

pub use config::{PlatformConfig, PlatformConfigBuilder};
pub use context::PlatformContext;
pub use diagnostics::Diagnostics;
pub use error::{Error, Result};
pub use identity::IdentityResolver;
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use provision::{IcuDataProvisioner, Staging};
