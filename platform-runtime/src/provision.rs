//! # Locale Data Provisioning
//!
//! The embedded script engine loads its locale tables (ICU data) from a real
//! file path, but the blob ships inside the application package where no
//! direct path exists. This module stages the packaged blob onto the file
//! system once per process and hands the engine the resulting path.
//!
//! Two staging strategies:
//! - [`Staging::AppDirectory`] pins the copy to a fixed per-app location and
//!   reuses it across runs (the mobile model, one extraction per install).
//! - [`Staging::TempFile`] extracts to a fresh system temp file whose guard
//!   deletes it when the provisioner is dropped (the desktop/server model).
//!
//! Locale data is required for engine startup, so every failure here is the
//! fatal [`Error::Provisioning`] kind; there is no degraded mode.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use platform_traits::resources::ResourceBundle;
use tempfile::{NamedTempFile, TempPath};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Logical name of the locale data blob inside the application package.
pub const ICU_DATA_RESOURCE: &str = "icudtl.dat";

/// Where the provisioner materializes the locale data.
#[derive(Debug, Clone)]
pub enum Staging {
    /// Fixed target `<dir>/icudtl.dat`, reused across runs. An existing
    /// non-empty copy short-circuits extraction; an empty leftover from an
    /// interrupted run is extracted again.
    AppDirectory(PathBuf),

    /// Fresh file in the system temp directory, removed when the
    /// provisioner is dropped at process exit.
    TempFile,
}

impl Default for Staging {
    fn default() -> Self {
        Self::TempFile
    }
}

enum StagedFile {
    Fixed(PathBuf),
    Temp(TempPath),
}

impl StagedFile {
    fn path(&self) -> &Path {
        match self {
            StagedFile::Fixed(path) => path,
            StagedFile::Temp(path) => path,
        }
    }
}

/// Stages the packaged locale data and memoizes the resulting path.
pub struct IcuDataProvisioner {
    resources: Arc<dyn ResourceBundle>,
    staging: Staging,
    staged: Mutex<Option<StagedFile>>,
}

impl IcuDataProvisioner {
    pub fn new(resources: Arc<dyn ResourceBundle>, staging: Staging) -> Self {
        Self {
            resources,
            staging,
            staged: Mutex::new(None),
        }
    }

    /// Path to a readable copy of the locale data.
    ///
    /// The first call extracts (unless a prior run's copy is reusable);
    /// subsequent calls return the memoized path unchanged. If the staged
    /// file has been deleted externally, it is provisioned again.
    pub fn icu_data_path(&self) -> Result<PathBuf> {
        let mut staged = self.staged.lock().expect("provisioner lock poisoned");

        if let Some(file) = staged.as_ref() {
            if file.path().is_file() {
                return Ok(file.path().to_path_buf());
            }
            info!("staged locale data disappeared, provisioning again");
            *staged = None;
        }

        let file = match &self.staging {
            Staging::AppDirectory(dir) => self.provision_fixed(dir)?,
            Staging::TempFile => self.provision_temp()?,
        };

        let path = file.path().to_path_buf();
        *staged = Some(file);
        Ok(path)
    }

    fn provision_fixed(&self, dir: &Path) -> Result<StagedFile> {
        let target = dir.join(ICU_DATA_RESOURCE);

        // Reuse a complete copy from an earlier run; zero length marks an
        // interrupted extraction.
        if let Ok(meta) = fs::metadata(&target) {
            if meta.is_file() && meta.len() > 0 {
                debug!(path = ?target, "reusing staged locale data");
                return Ok(StagedFile::Fixed(target));
            }
        }

        let mut source = self.open_resource()?;

        fs::create_dir_all(dir)
            .map_err(|err| provisioning_error(format!("cannot create staging directory: {err}")))?;
        let mut out = File::create(&target)
            .map_err(|err| provisioning_error(format!("cannot create staged file: {err}")))?;

        if let Err(err) = io::copy(&mut source, &mut out) {
            drop(out);
            let _ = fs::remove_file(&target);
            return Err(provisioning_error(format!("extraction failed: {err}")));
        }

        debug!(path = ?target, "staged locale data");
        Ok(StagedFile::Fixed(target))
    }

    fn provision_temp(&self) -> Result<StagedFile> {
        let mut source = self.open_resource()?;

        // NamedTempFile removes itself on drop, so a failed copy leaves
        // nothing behind.
        let mut file = NamedTempFile::new()
            .map_err(|err| provisioning_error(format!("cannot create temp file: {err}")))?;

        io::copy(&mut source, &mut file)
            .map_err(|err| provisioning_error(format!("extraction failed: {err}")))?;

        let path = file.into_temp_path();
        debug!(path = ?path, "staged locale data in temp file");
        Ok(StagedFile::Temp(path))
    }

    fn open_resource(&self) -> Result<Box<dyn Read + Send>> {
        self.resources.open(ICU_DATA_RESOURCE).map_err(|err| {
            provisioning_error(format!(
                "locale data is not packaged with this application build: {err}"
            ))
        })
    }
}

fn provisioning_error(message: impl Into<String>) -> Error {
    Error::Provisioning {
        resource: ICU_DATA_RESOURCE.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_traits::error::PlatformError;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct CountingBundle {
        payload: &'static [u8],
        opens: AtomicUsize,
    }

    impl CountingBundle {
        fn new(payload: &'static [u8]) -> Self {
            Self {
                payload,
                opens: AtomicUsize::new(0),
            }
        }
    }

    impl ResourceBundle for CountingBundle {
        fn open(&self, name: &str) -> platform_traits::error::Result<Box<dyn Read + Send>> {
            if name != ICU_DATA_RESOURCE {
                return Err(PlatformError::NotAvailable(format!(
                    "resource not packaged: {name}"
                )));
            }
            self.opens.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(Cursor::new(self.payload.to_vec())))
        }
    }

    struct EmptyBundle;

    impl ResourceBundle for EmptyBundle {
        fn open(&self, name: &str) -> platform_traits::error::Result<Box<dyn Read + Send>> {
            Err(PlatformError::NotAvailable(format!(
                "resource not packaged: {name}"
            )))
        }
    }

    #[test]
    fn test_fixed_staging_extracts_then_reuses() {
        let dir = TempDir::new().unwrap();
        let bundle = Arc::new(CountingBundle::new(b"locale tables"));
        let provisioner = IcuDataProvisioner::new(
            bundle.clone(),
            Staging::AppDirectory(dir.path().to_path_buf()),
        );

        let first = provisioner.icu_data_path().unwrap();
        let second = provisioner.icu_data_path().unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"locale tables");
        assert_eq!(bundle.opens.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fixed_staging_reuses_copy_from_earlier_run() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join(ICU_DATA_RESOURCE);
        fs::write(&target, b"staged by an earlier run").unwrap();

        let bundle = Arc::new(CountingBundle::new(b"fresh payload"));
        let provisioner = IcuDataProvisioner::new(
            bundle.clone(),
            Staging::AppDirectory(dir.path().to_path_buf()),
        );

        let path = provisioner.icu_data_path().unwrap();

        assert_eq!(path, target);
        assert_eq!(fs::read(&path).unwrap(), b"staged by an earlier run");
        assert_eq!(bundle.opens.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fixed_staging_replaces_empty_leftover() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join(ICU_DATA_RESOURCE);
        fs::write(&target, b"").unwrap();

        let bundle = Arc::new(CountingBundle::new(b"locale tables"));
        let provisioner =
            IcuDataProvisioner::new(bundle, Staging::AppDirectory(dir.path().to_path_buf()));

        let path = provisioner.icu_data_path().unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"locale tables");
    }

    #[test]
    fn test_externally_deleted_copy_is_provisioned_again() {
        let dir = TempDir::new().unwrap();
        let bundle = Arc::new(CountingBundle::new(b"locale tables"));
        let provisioner = IcuDataProvisioner::new(
            bundle.clone(),
            Staging::AppDirectory(dir.path().to_path_buf()),
        );

        let path = provisioner.icu_data_path().unwrap();
        fs::remove_file(&path).unwrap();

        let again = provisioner.icu_data_path().unwrap();
        assert!(again.is_file());
        assert_eq!(bundle.opens.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_temp_staging_removes_file_on_drop() {
        let bundle = Arc::new(CountingBundle::new(b"locale tables"));
        let provisioner = IcuDataProvisioner::new(bundle, Staging::TempFile);

        let path = provisioner.icu_data_path().unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"locale tables");

        drop(provisioner);
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_resource_is_provisioning_error() {
        let provisioner = IcuDataProvisioner::new(Arc::new(EmptyBundle), Staging::TempFile);

        let err = provisioner.icu_data_path().unwrap_err();
        assert!(matches!(err, Error::Provisioning { .. }));
    }

    #[test]
    fn test_provisioning_error_names_the_resource() {
        let provisioner = IcuDataProvisioner::new(Arc::new(EmptyBundle), Staging::TempFile);

        match provisioner.icu_data_path().unwrap_err() {
            Error::Provisioning { resource, .. } => assert_eq!(resource, ICU_DATA_RESOURCE),
            other => panic!("unexpected error: {other}"),
        }
    }
}
