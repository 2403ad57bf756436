//! File collaborators for the patch engine.
//!
//! The engine never touches the filesystem directly. It reads through a
//! [`FileReader`] and writes through a [`FileWriter`]; [`FsFiles`] is the
//! real implementation, [`MemoryFiles`] and [`RecordingWriter`] back tests,
//! dry runs, and diffs.

use crate::engine::PatchError;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub trait FileReader {
    /// Full UTF-8 contents of `path`, or `None` if it does not exist.
    fn read(&self, path: &Path) -> Result<Option<String>, PatchError>;
}

pub trait FileWriter {
    /// Replace the full contents of `path` with `text`.
    fn write(&self, path: &Path, text: &str) -> Result<(), PatchError>;
}

/// Filesystem access rooted at a project directory.
///
/// Relative target paths resolve against `root`; absolute paths are used
/// as given.
#[derive(Debug, Clone)]
pub struct FsFiles {
    root: PathBuf,
}

impl FsFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl FileReader for FsFiles {
    fn read(&self, path: &Path) -> Result<Option<String>, PatchError> {
        let full = self.resolve(path);
        let bytes = match fs::read(&full) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(PatchError::Read { path: full, source }),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| PatchError::Encoding {
                path: full,
                source: e.utf8_error(),
            })
    }
}

impl FileWriter for FsFiles {
    fn write(&self, path: &Path, text: &str) -> Result<(), PatchError> {
        let full = self.resolve(path);
        atomic_write(&full, text.as_bytes()).map_err(|source| PatchError::Write {
            path: full,
            source,
        })
    }
}

/// Atomic file write: tempfile + fsync + rename.
///
/// The tempfile lives in the target's directory so the rename stays on one
/// filesystem.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        Some(_) => Path::new("."),
        None => {
            return Err(std::io::Error::new(
                ErrorKind::InvalidInput,
                "path has no parent directory",
            ))
        }
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    // Keep the original permissions; the tempfile is created 0600.
    if let Ok(meta) = fs::metadata(path) {
        temp.as_file().set_permissions(meta.permissions())?;
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// In-memory file store implementing both collaborators.
#[derive(Debug, Default)]
pub struct MemoryFiles {
    files: RefCell<BTreeMap<PathBuf, String>>,
    writes: Cell<usize>,
}

impl MemoryFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), text.into());
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl FileReader for MemoryFiles {
    fn read(&self, path: &Path) -> Result<Option<String>, PatchError> {
        Ok(self.get(path))
    }
}

impl FileWriter for MemoryFiles {
    fn write(&self, path: &Path, text: &str) -> Result<(), PatchError> {
        self.insert(path, text);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Writer that records every write and optionally forwards it.
///
/// With no inner writer it discards the text, which is how dry runs and
/// `status` avoid touching files.
pub struct RecordingWriter<'a> {
    inner: Option<&'a dyn FileWriter>,
    written: RefCell<Vec<(PathBuf, String)>>,
}

impl<'a> RecordingWriter<'a> {
    pub fn discard() -> Self {
        Self {
            inner: None,
            written: RefCell::new(Vec::new()),
        }
    }

    pub fn forward(inner: &'a dyn FileWriter) -> Self {
        Self {
            inner: Some(inner),
            written: RefCell::new(Vec::new()),
        }
    }

    /// Recorded writes, in order.
    pub fn into_written(self) -> Vec<(PathBuf, String)> {
        self.written.into_inner()
    }
}

impl FileWriter for RecordingWriter<'_> {
    fn write(&self, path: &Path, text: &str) -> Result<(), PatchError> {
        if let Some(inner) = self.inner {
            inner.write(path, text)?;
        }
        self.written
            .borrow_mut()
            .push((path.to_path_buf(), text.to_string()));
        Ok(())
    }
}
