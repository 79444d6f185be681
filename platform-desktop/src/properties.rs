//! Secure Storage as a Properties File

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use platform_traits::error::{PlatformError, Result};
use platform_traits::storage::SecureStorage;
use tracing::{debug, warn};

const STORE_FILE: &str = "secure-store.properties";

/// Properties-file-backed storage implementation
///
/// Persists `key=value` lines to a flat file, by default
/// `~/.<app-id>/secure-store.properties`. The whole file is held in an
/// in-memory map loaded once at open; every write re-renders the file and
/// swaps it in atomically, so a crash mid-write never leaves a truncated
/// store.
///
/// Format notes:
/// - lines starting with `#` are comments, blank lines are ignored
/// - entries split on the first unescaped `=`
/// - `\\`, `\n`, `\r`, `\t` are backslash-escaped; inside keys `=` and a
///   leading `#` or whitespace are escaped as well
///
/// Values are stored in the clear; confidentiality is whatever the file
/// system grants. Hosts that need OS-keychain protection select the
/// keyring-backed store instead.
pub struct PropertiesStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl PropertiesStorage {
    /// Open the store backed by the given file, creating it lazily on the
    /// first write. A missing file is an empty store, not an error.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => parse(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(PlatformError::Io(err)),
        };

        debug!(path = ?path, entries = entries.len(), "opened properties store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Open the per-application store under the user's home directory:
    /// `<home>/.<app-id>/secure-store.properties`.
    pub fn for_app(app_id: &str) -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            PlatformError::NotAvailable("home directory could not be resolved".to_string())
        })?;

        Self::new(home.join(format!(".{app_id}")).join(STORE_FILE))
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)?;
                parent
            }
            _ => Path::new("."),
        };

        // Render to a sibling temp file, then rename over the store.
        let mut file = tempfile::NamedTempFile::new_in(parent)?;
        file.write_all(render(entries).as_bytes())?;
        file.flush()?;
        file.persist(&self.path)
            .map_err(|err| PlatformError::Io(err.error))?;

        Ok(())
    }
}

impl SecureStorage for PropertiesStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().expect("store lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)?;

        debug!(key = key, "stored entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
            debug!(key = key, "removed entry");
        }
        Ok(())
    }
}

fn parse(text: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();

    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match split_entry(trimmed) {
            Some((key, value)) => {
                entries.insert(unescape(key), unescape(value));
            }
            None => warn!(line = line, "skipping malformed store line"),
        }
    }

    entries
}

/// Split on the first `=` that is not preceded by a backslash.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' => return Some((&line[..idx], &line[idx + 1..])),
            _ => {}
        }
    }
    None
}

fn render(entries: &HashMap<String, String>) -> String {
    let mut keys: Vec<&String> = entries.keys().collect();
    keys.sort();

    let mut out = String::from("# Managed by the platform runtime. Do not edit.\n");
    for key in keys {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(&entries[key], false));
        out.push('\n');
    }
    out
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, ch) in text.chars().enumerate() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '=' if is_key => out.push_str("\\="),
            // Keep a key's first character clear of the parser's comment
            // marker and indentation trim.
            c if is_key && idx == 0 && (c == '#' || c.is_whitespace()) => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(ch),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
