//! Desktop Device Identity Sources
//!
//! Stable hardware/OS identifiers a desktop or server host can offer the
//! identity resolver, in preference order:
//!
//! 1. [`DmiProductUuidSource`] - the firmware product UUID. Stable across
//!    OS reinstalls, but the sysfs node is typically root-only, so this
//!    source is unavailable for ordinary users.
//! 2. [`MachineIdSource`] - the systemd/dbus machine id. World-readable and
//!    stable for the OS installation.
//!
//! Neither file exists off Linux; both sources report unavailable there and
//! the resolver moves on.

use std::path::Path;

use platform_traits::device::{IdentitySource, SourceUnavailable};

const DMI_PRODUCT_UUID: &str = "/sys/class/dmi/id/product_uuid";

const MACHINE_ID_PATHS: [&str; 2] = ["/etc/machine-id", "/var/lib/dbus/machine-id"];

fn read_token(path: &Path) -> Result<String, SourceUnavailable> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| SourceUnavailable::new(format!("{}: {}", path.display(), err)))?;

    let token = text.trim();
    if token.is_empty() {
        return Err(SourceUnavailable::new(format!(
            "{} exists but is empty",
            path.display()
        )));
    }
    Ok(token.to_string())
}

/// Identity from the DMI/SMBIOS product UUID exposed by the kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct DmiProductUuidSource;

impl IdentitySource for DmiProductUuidSource {
    fn name(&self) -> &'static str {
        "dmi-product-uuid"
    }

    fn acquire(&self) -> Result<String, SourceUnavailable> {
        read_token(Path::new(DMI_PRODUCT_UUID))
    }
}

/// Identity from the machine id written at OS install time.
#[derive(Debug, Clone, Copy, Default)]
pub struct MachineIdSource;

impl IdentitySource for MachineIdSource {
    fn name(&self) -> &'static str {
        "machine-id"
    }

    fn acquire(&self) -> Result<String, SourceUnavailable> {
        let mut last = SourceUnavailable::new("no machine-id path configured");
        for path in MACHINE_ID_PATHS {
            match read_token(Path::new(path)) {
                Ok(token) => return Ok(token),
                Err(err) => last = err,
            }
        }
        Err(last)
    }
}
