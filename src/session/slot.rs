//! Durable key-value slots that hold the serialized session blob
//!
//! A slot stores exactly one string under a fixed key. The file slot keeps
//! it in the user's data directory; the keyring slot keeps it in the OS
//! credential store (Keychain on macOS, Secret Service on Linux, Windows
//! Credential Manager on Windows).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{Result, StudyshareError};

/// Service name used for keyring entries and the data directory.
const SERVICE: &str = "studyshare";

/// A single persisted string under a fixed key.
pub trait SessionSlot: Send {
    /// Returns the stored blob, or `None` when nothing has been written.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored blob.
    fn write(&mut self, blob: &str) -> Result<()>;

    /// Removes the stored blob. Removing an empty slot is not an error.
    fn remove(&mut self) -> Result<()>;

    /// Human-readable location, for logs and `whoami`.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// FileSlot
// ---------------------------------------------------------------------------

/// Session blob stored as a JSON file.
///
/// Writes go to a temporary sibling that is renamed over the target, so a
/// reader sees either the previous blob or the new one.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Slot backed by an explicit file path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Slot at `<data dir>/studyshare/<key>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StudyshareError::SessionStore`] if the platform data
    /// directory cannot be determined.
    pub fn in_data_dir(key: &str) -> Result<Self> {
        let proj_dirs = ProjectDirs::from("edu", SERVICE, SERVICE).ok_or_else(|| {
            StudyshareError::SessionStore("Could not determine data directory".into())
        })?;
        Ok(Self::new(proj_dirs.data_dir().join(format!("{}.json", key))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionSlot for FileSlot {
    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StudyshareError::SessionStore(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
            .into()),
        }
    }

    fn write(&mut self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StudyshareError::SessionStore(format!(
                    "Failed to create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp = self.temp_path();
        if let Err(e) = write_private(&temp, blob) {
            let _ = std::fs::remove_file(&temp);
            return Err(StudyshareError::SessionStore(format!(
                "Failed to write {}: {}",
                temp.display(),
                e
            ))
            .into());
        }

        if let Err(e) = std::fs::rename(&temp, &self.path) {
            let _ = std::fs::remove_file(&temp);
            return Err(StudyshareError::SessionStore(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
            .into());
        }
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StudyshareError::SessionStore(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))
            .into()),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Create or truncate `path` owner-only (0600 on unix) and write `blob`.
fn write_private(path: &Path, blob: &str) -> std::io::Result<()> {
    use std::io::Write;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        // `mode` applies only on create; a stale temp file keeps its old mode.
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(blob.as_bytes())?;
    file.sync_all()
}

// ---------------------------------------------------------------------------
// KeyringSlot
// ---------------------------------------------------------------------------

/// Session blob stored in the OS keyring under service `studyshare`.
#[derive(Debug, Clone)]
pub struct KeyringSlot {
    key: String,
}

impl KeyringSlot {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(SERVICE, &self.key).map_err(|e| StudyshareError::Keyring(e).into())
    }
}

impl SessionSlot for KeyringSlot {
    fn read(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(blob) => Ok(Some(blob)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StudyshareError::Keyring(e).into()),
        }
    }

    fn write(&mut self, blob: &str) -> Result<()> {
        self.entry()?
            .set_password(blob)
            .map_err(StudyshareError::Keyring)?;
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StudyshareError::Keyring(e).into()),
        }
    }

    fn describe(&self) -> String {
        format!("keyring {}/{}", SERVICE, self.key)
    }
}

// ---------------------------------------------------------------------------
// MemorySlot
// ---------------------------------------------------------------------------

/// Process-local slot, for tests and for embedding without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    blob: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with raw contents, valid or not.
    pub fn with_contents(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }
}

impl SessionSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> Result<()> {
        self.blob = Some(blob.to_string());
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        self.blob = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
