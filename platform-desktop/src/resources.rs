//! Packaged Resources from a Directory

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use platform_traits::error::{PlatformError, Result};
use platform_traits::resources::ResourceBundle;
use tracing::debug;

const DEFAULT_RESOURCE_DIR: &str = "resources";

/// Directory-backed resource bundle
///
/// Desktop installs ship data files in a directory beside the binary rather
/// than inside an archive. Logical resource names map to direct children of
/// the root; no subdirectory traversal.
#[derive(Debug, Clone)]
pub struct DirResourceBundle {
    root: PathBuf,
}

impl DirResourceBundle {
    /// A bundle rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The conventional install layout: `resources/` in the directory
    /// containing the current executable, or relative to the working
    /// directory when the executable path cannot be determined.
    pub fn beside_executable() -> Self {
        let root = std::env::current_exe()
            .ok()
            .and_then(|path| path.parent().map(Path::to_path_buf))
            .map(|dir| dir.join(DEFAULT_RESOURCE_DIR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCE_DIR));

        Self::new(root)
    }

    /// The bundle's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceBundle for DirResourceBundle {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>> {
        let path = self.root.join(name);
        match File::open(&path) {
            Ok(file) => {
                debug!(name = name, path = ?path, "opened packaged resource");
                Ok(Box::new(file))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(
                PlatformError::NotAvailable(format!("resource not packaged: {name}")),
            ),
            Err(err) => Err(PlatformError::Io(err)),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.root.join(name).is_file()
    }
}
