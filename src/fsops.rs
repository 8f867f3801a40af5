//! Filesystem collaborators: directory listing for the completion engine,
//! parent creation, writes, and moving files to the trash.

use std::fs;
use std::path::Path;

use crate::complete::Entry;
use crate::error::Result;

/// Supplies directory listings to completion callers. A trait so prompt
/// logic can be exercised without a real filesystem underneath.
pub trait DirLister {
    /// Entries of `dir`. A missing or unreadable directory is
    /// indistinguishable from an empty one; this never fails.
    fn list(&self, dir: &Path) -> Vec<Entry>;
}

/// Lister backed by the real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsLister;

impl DirLister for OsLister {
    fn list(&self, dir: &Path) -> Vec<Entry> {
        let Ok(read_dir) = fs::read_dir(dir) else {
            return Vec::new();
        };

        let mut entries = Vec::new();
        for dir_entry in read_dir.flatten() {
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            let is_dir = dir_entry
                .file_type()
                .map(|file_type| file_type.is_dir())
                .unwrap_or(false);
            entries.push(Entry { name, is_dir });
        }
        entries
    }
}

/// Creates the missing parent directories of `path`. Parents that already
/// exist are success, not an error.
pub fn mkdirp(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Writes `contents` to `path`, creating parent directories first. Returns
/// the status line for the host to display.
pub fn write_file(path: &Path, contents: &str) -> Result<String> {
    mkdirp(path)?;
    fs::write(path, contents)?;
    Ok(format!("Saved: {}", path.display()))
}

/// Moves `path` to the OS trash.
pub fn move_to_trash(path: &Path) -> Result<()> {
    trash::delete(path)?;
    Ok(())
}
