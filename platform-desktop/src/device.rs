//! Desktop Device Description

use std::sync::Arc;

use platform_traits::device::{DeviceInfo, IdentitySource};

use crate::identity::{DmiProductUuidSource, MachineIdSource};

/// Substrings that mark a DMI vendor/product string as a hypervisor.
const VIRTUALIZATION_MARKERS: [&str; 6] =
    ["qemu", "kvm", "vmware", "virtualbox", "xen", "bochs"];

/// Desktop and server device description
///
/// `spec()` reports OS, architecture and, where readable, the distribution
/// pretty-name. `is_real_device()` answers false when the DMI strings look
/// like a hypervisor, the desktop analogue of running under an emulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopDeviceInfo;

impl DesktopDeviceInfo {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceInfo for DesktopDeviceInfo {
    fn spec(&self) -> String {
        let os = std::env::consts::OS;
        let arch = std::env::consts::ARCH;

        match os_pretty_name() {
            Some(name) => format!("{os} {arch} ({name})"),
            None => format!("{os} {arch}"),
        }
    }

    fn is_real_device(&self) -> bool {
        !looks_virtualized(&dmi_fingerprint())
    }

    fn identity_sources(&self) -> Vec<Arc<dyn IdentitySource>> {
        vec![Arc::new(DmiProductUuidSource), Arc::new(MachineIdSource)]
    }
}

/// True when any virtualization marker appears in the fingerprint.
fn looks_virtualized(fingerprint: &str) -> bool {
    let fingerprint = fingerprint.to_ascii_lowercase();
    VIRTUALIZATION_MARKERS
        .iter()
        .any(|marker| fingerprint.contains(marker))
}

/// World-readable DMI identity strings, concatenated. Empty off Linux or
/// where sysfs is absent, which reads as a real device.
fn dmi_fingerprint() -> String {
    const DMI_FILES: [&str; 3] = [
        "/sys/class/dmi/id/sys_vendor",
        "/sys/class/dmi/id/product_name",
        "/sys/class/dmi/id/board_vendor",
    ];

    DMI_FILES
        .iter()
        .filter_map(|path| std::fs::read_to_string(path).ok())
        .collect::<Vec<_>>()
        .join(" ")
}

fn os_pretty_name() -> Option<String> {
    if std::env::consts::OS != "linux" {
        return None;
    }

    let text = std::fs::read_to_string("/etc/os-release").ok()?;
    for line in text.lines() {
        if let Some(value) = line.strip_prefix("PRETTY_NAME=") {
            let name = value.trim().trim_matches('"');
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_mentions_os_and_arch() {
        let spec = DesktopDeviceInfo::new().spec();

        assert!(spec.contains(std::env::consts::OS));
        assert!(spec.contains(std::env::consts::ARCH));
    }

    #[test]
    fn test_identity_sources_in_preference_order() {
        let sources = DesktopDeviceInfo::new().identity_sources();
        let names: Vec<_> = sources.iter().map(|s| s.name()).collect();

        assert_eq!(names, vec!["dmi-product-uuid", "machine-id"]);
    }

    #[test]
    fn test_hypervisor_fingerprints_detected() {
        assert!(looks_virtualized("QEMU Standard PC (Q35 + ICH9, 2009)"));
        assert!(looks_virtualized("VMware, Inc. VMware Virtual Platform"));
        assert!(looks_virtualized("innotek GmbH VirtualBox"));
        assert!(looks_virtualized("Xen HVM domU"));
        assert!(looks_virtualized("Red Hat KVM"));
        assert!(looks_virtualized("Bochs Bochs"));
    }

    #[test]
    fn test_hardware_fingerprints_pass() {
        assert!(!looks_virtualized("Dell Inc. XPS 13 9310"));
        assert!(!looks_virtualized("LENOVO 20TH"));
        assert!(!looks_virtualized(""));
    }
}
