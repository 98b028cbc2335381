//! Fragment Archive Module
//!
//! Compressed named-entry container (gzip'd tar) used in two places: the
//! payload a user encrypts is archived before encryption, and every share
//! envelope archives its three named entries before sealing.
//!
//! Entry names and raw byte content are preserved exactly; readers look
//! entries up by name, so entry order is not significant.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("archive I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed archive")]
    Malformed,
    #[error("unsupported entry type in archive: {0}")]
    UnsupportedEntry(String),
    #[error("entry name is not valid UTF-8")]
    InvalidEntryName,
}

/// One named entry in an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub data: Vec<u8>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Serialize entries into a gzip'd tar archive.
///
/// Each entry becomes one regular file with mode 0644 and the current
/// mtime.
pub fn create_archive(entries: &[FileEntry]) -> Result<Vec<u8>, ArchiveError> {
    let gz = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(gz);

    let mtime = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    for entry in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(entry.data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(mtime);
        header.set_entry_type(tar::EntryType::Regular);
        builder.append_data(&mut header, &entry.name, entry.data.as_slice())?;
    }

    let gz = builder.into_inner()?;
    Ok(gz.finish()?)
}

/// Read back all entries of a gzip'd tar archive.
///
/// Only regular-file entries are accepted; anything else (symlinks,
/// directories, devices) is rejected rather than silently skipped.
pub fn read_archive(bytes: &[u8]) -> Result<Vec<FileEntry>, ArchiveError> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    let mut files = Vec::new();

    for entry in archive.entries().map_err(|_| ArchiveError::Malformed)? {
        let mut entry = entry.map_err(|_| ArchiveError::Malformed)?;

        if !entry.header().entry_type().is_file() {
            return Err(ArchiveError::UnsupportedEntry(format!(
                "{:?}",
                entry.header().entry_type()
            )));
        }

        let name = entry
            .path()
            .map_err(|_| ArchiveError::Malformed)?
            .to_str()
            .ok_or(ArchiveError::InvalidEntryName)?
            .to_owned();

        let mut data = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut data)
            .map_err(|_| ArchiveError::Malformed)?;

        files.push(FileEntry { name, data });
    }

    Ok(files)
}

/// Archive a filesystem path.
///
/// A regular file becomes a one-entry archive keyed by its file name. A
/// directory is walked recursively and each regular file becomes one entry
/// keyed by its path relative to the directory root.
pub fn archive_path(path: &Path) -> Result<Vec<u8>, ArchiveError> {
    let meta = std::fs::metadata(path)?;

    let entries = if meta.is_dir() {
        let mut files = Vec::new();
        walk_dir(path, path, &mut files)?;
        files
    } else {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(ArchiveError::InvalidEntryName)?
            .to_owned();
        vec![FileEntry::new(name, std::fs::read(path)?)]
    };

    create_archive(&entries)
}

fn walk_dir(root: &Path, dir: &Path, out: &mut Vec<FileEntry>) -> Result<(), ArchiveError> {
    // Sort for a stable entry order across platforms
    let mut children: Vec<PathBuf> = std::fs::read_dir(dir)?
        .map(|e| e.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    children.sort();

    for child in children {
        if child.is_dir() {
            walk_dir(root, &child, out)?;
        } else {
            let rel = child
                .strip_prefix(root)
                .map_err(|_| ArchiveError::Malformed)?
                .to_str()
                .ok_or(ArchiveError::InvalidEntryName)?
                .to_owned();
            out.push(FileEntry::new(rel, std::fs::read(&child)?));
        }
    }

    Ok(())
}
