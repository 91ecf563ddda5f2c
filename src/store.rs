//! File plumbing shared by the catalog and collection stores.
//!
//! JSON files are written to a temp file first and renamed into place, and
//! whole directories are swapped in with a rename, so an interrupted write
//! never leaves a half-written file or catalog behind.

use crate::error::{CollectionsError, Result};
use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Serialize `value` as pretty JSON and write it atomically to `dest`.
pub fn write_json_atomic<T: Serialize + ?Sized>(dest: &Path, value: &T) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_dest = dest.with_extension(format!(
        "{}.tmp",
        dest.extension().and_then(|e| e.to_str()).unwrap_or("")
    ));

    let result = (|| -> Result<()> {
        let json = serde_json::to_vec_pretty(value)?;
        fs::write(&tmp_dest, json)?;
        fs::rename(&tmp_dest, dest)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_dest);
    }

    result
}

/// Return the payload of a bulk download, gunzipping it if needed.
pub fn decode_bulk(bytes: &[u8]) -> Result<Cow<'_, [u8]>> {
    if bytes.starts_with(&GZIP_MAGIC) {
        let mut decoder = GzDecoder::new(bytes);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out)?;
        Ok(Cow::Owned(out))
    } else {
        Ok(Cow::Borrowed(bytes))
    }
}

/// Create an empty staging directory next to `target`.
///
/// Staging beside the target keeps the final swap on one filesystem, where
/// a rename is atomic.
pub fn staging_dir(target: &Path) -> Result<tempfile::TempDir> {
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;
    let prefix = format!(
        ".{}-staging-",
        target
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("dir")
    );
    Ok(tempfile::Builder::new().prefix(&prefix).tempdir_in(parent)?)
}

/// Replace `target` with the fully written `staging` directory.
///
/// The previous contents of `target` are moved aside, the staging directory
/// renamed in, and the old copy removed. If the swap fails the old directory
/// is put back.
pub fn replace_dir(staging: tempfile::TempDir, target: &Path) -> Result<()> {
    let backup = sibling_with_suffix(target, ".old");
    if backup.exists() {
        fs::remove_dir_all(&backup)?;
    }

    let had_target = target.exists();
    if had_target {
        fs::rename(target, &backup)?;
    }

    if let Err(e) = fs::rename(staging.path(), target) {
        if had_target {
            if let Err(restore) = fs::rename(&backup, target) {
                log::warn!(
                    "Failed to restore {} after aborted swap: {}",
                    target.display(),
                    restore
                );
            }
        }
        return Err(CollectionsError::Io(e));
    }
    // The staging path no longer exists; dropping the handle is a no-op.
    drop(staging);

    if had_target {
        if let Err(e) = fs::remove_dir_all(&backup) {
            log::warn!("Could not remove old directory {}: {}", backup.display(), e);
        }
    }
    Ok(())
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
