//! JSON scenario files holding a whole [`CellSnapshot`].
//!
//! Missing fields fall back to the reference cell, so a file only needs to
//! name what differs from it.

use crate::cell_evaluation::CellSnapshot;
use crate::error::{ModelError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Snapshots already read from disk, keyed by path. Entries live for the
/// whole process; [`to_json_file`] evicts its own path and [`clear_cache`]
/// drops everything.
static SCENARIO_CACHE: Lazy<Mutex<HashMap<PathBuf, CellSnapshot>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn lock_cache() -> Result<std::sync::MutexGuard<'static, HashMap<PathBuf, CellSnapshot>>> {
    SCENARIO_CACHE
        .lock()
        .map_err(|_| ModelError::Scenario("scenario cache lock poisoned".to_string()))
}

pub fn from_json_str(json: &str) -> Result<CellSnapshot> {
    Ok(serde_json::from_str(json)?)
}

pub fn to_json_string(snapshot: &CellSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Load a scenario file, using the cache if it was read before.
///
/// A cached path is not re-read: edits made to the file by other programs
/// are only seen after [`clear_cache`]. Use [`reload_json_file`] to force a
/// fresh read of one path.
pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<CellSnapshot> {
    let path_buf = path.as_ref().to_path_buf();

    if let Some(snapshot) = lock_cache()?.get(&path_buf) {
        return Ok(*snapshot);
    }

    let json = fs::read_to_string(&path_buf)
        .map_err(|e| ModelError::Scenario(format!("failed to read {}: {e}", path_buf.display())))?;
    let snapshot = from_json_str(&json).map_err(|e| match e {
        ModelError::Scenario(msg) => ModelError::Scenario(format!("{}: {msg}", path_buf.display())),
        other => other,
    })?;
    debug!(path = %path_buf.display(), "loaded cell scenario");

    lock_cache()?.insert(path_buf, snapshot);
    Ok(snapshot)
}

/// Read a scenario file from disk even if it is cached, and refresh the cache.
pub fn reload_json_file<P: AsRef<Path>>(path: P) -> Result<CellSnapshot> {
    lock_cache()?.remove(path.as_ref());
    from_json_file(path)
}

pub fn to_json_file<P: AsRef<Path>>(path: P, snapshot: &CellSnapshot) -> Result<()> {
    let path_buf = path.as_ref().to_path_buf();
    fs::write(&path_buf, to_json_string(snapshot)?)?;
    // the file on disk is now authoritative
    lock_cache()?.remove(&path_buf);
    Ok(())
}

pub fn clear_cache() -> Result<()> {
    lock_cache()?.clear();
    Ok(())
}
