//! # File I/O Module
//!
//! Estimate document file operations:
//! - **Atomic saves**: write to `.tmp`, fsync, rename over the target
//! - **File locking**: keep two estimators from editing one estimate on a shared drive
//! - **Version validation**: refuse documents written by a newer schema
//!
//! Lock files sit next to the document with `.lock` appended to the
//! extension (`kitchen.json` → `kitchen.json.lock`) and name the holder.
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::document::EstimateDocument;
//! use estimate_core::file_io::{save_document, DocumentLock};
//! use std::path::Path;
//!
//! let doc = EstimateDocument::new("Smith kitchen", None);
//! let path = Path::new("smith-kitchen.json");
//!
//! let lock = DocumentLock::acquire(path, "dana")?;
//! save_document(&doc, path)?;
//! drop(lock);
//! # Ok::<(), estimate_core::errors::EstimateError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::document::{EstimateDocument, SCHEMA_VERSION};
use crate::errors::{CalcResult, EstimateError};
use crate::input::EstimateRequest;

/// Locks older than this are taken over regardless of the holder
pub const STALE_LOCK_HOURS: i64 = 12;

/// Contents of a `.lock` sidecar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockHolder {
    pub user: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockHolder {
    /// Holder record for the current process
    pub fn current(user: impl Into<String>) -> Self {
        LockHolder {
            user: user.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// True when the holder can no longer be editing: the lock is too old, or
    /// it was taken on this machine by a process that has exited.
    pub fn is_stale(&self) -> bool {
        if Utc::now() - self.locked_at > Duration::hours(STALE_LOCK_HOURS) {
            return true;
        }
        match hostname() {
            Some(ours) if ours == self.machine => !process_alive(self.pid),
            _ => false,
        }
    }
}

impl std::fmt::Display for LockHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.user, self.machine)
    }
}

fn hostname() -> Option<String> {
    whoami::fallible::hostname().ok()
}

#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{pid}")).exists()
}

// No cheap liveness check elsewhere; rely on the age check.
#[cfg(not(target_os = "linux"))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive edit lock on an estimate document. Released on drop.
///
/// Combines an OS-level lock (via fs2) with a `.lock` file naming the holder,
/// so other users see who has the estimate open.
#[derive(Debug)]
pub struct DocumentLock {
    document_path: PathBuf,
    lock_path: PathBuf,
    // keeps the OS lock alive
    _file: File,
    pub holder: LockHolder,
}

impl DocumentLock {
    /// Acquire the lock for `path` on behalf of `user`.
    ///
    /// # Returns
    ///
    /// * `Ok(DocumentLock)` - lock acquired (a stale lock is taken over)
    /// * `Err(EstimateError::FileLocked)` - someone else is editing
    /// * `Err(EstimateError::MissingField)` - `user` is blank
    pub fn acquire(path: &Path, user: impl Into<String>) -> CalcResult<Self> {
        let user = user.into();
        if user.trim().is_empty() {
            return Err(EstimateError::missing_field("user"));
        }
        let lock_path = lock_path_for(path);
        let holder = LockHolder::current(user);

        if let Some(existing) = read_holder(&lock_path) {
            if !existing.is_stale() {
                return Err(EstimateError::file_locked(
                    path.display().to_string(),
                    existing.to_string(),
                    existing.locked_at.to_rfc3339(),
                ));
            }
            tracing::warn!(
                path = %path.display(),
                previous = %existing,
                "taking over stale estimate lock"
            );
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| file_error("create lock", &lock_path, e))?;

        file.try_lock_exclusive().map_err(|_| {
            EstimateError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let json = serde_json::to_string_pretty(&holder).map_err(EstimateError::serialization)?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| file_error("write lock", &lock_path, e))?;

        tracing::info!(path = %path.display(), user = %holder.user, "acquired estimate lock");

        Ok(DocumentLock {
            document_path: path.to_path_buf(),
            lock_path,
            _file: file,
            holder,
        })
    }

    /// Who holds a live lock on `path`, if anyone.
    pub fn check(path: &Path) -> Option<LockHolder> {
        read_holder(&lock_path_for(path)).filter(|holder| !holder.is_stale())
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `estimate.json` → `estimate.json.lock`
fn lock_path_for(path: &Path) -> PathBuf {
    sibling_with_suffix(path, "lock")
}

/// `estimate.json` → `estimate.json.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    sibling_with_suffix(path, "tmp")
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut out = path.to_path_buf();
    let extension = path
        .extension()
        .map(|e| format!("{}.{suffix}", e.to_string_lossy()))
        .unwrap_or_else(|| suffix.to_string());
    out.set_extension(extension);
    out
}

/// Unreadable or missing lock files count as no lock.
fn read_holder(lock_path: &Path) -> Option<LockHolder> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a document with atomic write semantics.
///
/// 1. Serialize to pretty JSON
/// 2. Write `<path>.tmp` and fsync it
/// 3. Rename over `path`
///
/// An interrupted save leaves the previous file intact.
pub fn save_document(doc: &EstimateDocument, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(doc).map_err(EstimateError::serialization)?;
    let tmp_path = tmp_path_for(path);

    let mut tmp = File::create(&tmp_path)
        .map_err(|e| file_error("create temp file", &tmp_path, e))?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| file_error("write temp file", &tmp_path, e))?;
    tmp.sync_all()
        .map_err(|e| file_error("sync temp file", &tmp_path, e))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        file_error("rename to final", path, e)
    })?;

    tracing::info!(
        path = %path.display(),
        estimate = %doc.meta.estimate_number,
        areas = doc.area_count(),
        "saved estimate"
    );
    Ok(())
}

/// Load a document, checking its schema version.
///
/// # Returns
///
/// * `Err(EstimateError::VersionMismatch)` - written by an incompatible schema
/// * `Err(EstimateError::SerializationError)` - not a valid document
/// * `Err(EstimateError::FileError)` - I/O error
pub fn load_document(path: &Path) -> CalcResult<EstimateDocument> {
    let contents = read_file(path)?;
    let doc: EstimateDocument = serde_json::from_str(&contents)
        .map_err(|e| {
            EstimateError::serialization(format!("Invalid estimate in {}: {}", path.display(), e))
        })?;

    validate_version(&doc.meta.version)?;

    tracing::info!(path = %path.display(), estimate = %doc.meta.estimate_number, "loaded estimate");
    Ok(doc)
}

/// Load a document plus the current lock holder, if someone else is editing.
pub fn load_document_with_lock_check(
    path: &Path,
) -> CalcResult<(EstimateDocument, Option<LockHolder>)> {
    let doc = load_document(path)?;
    Ok((doc, DocumentLock::check(path)))
}

/// Read a bare estimate request (settings + areas) from a JSON file.
pub fn load_request(path: &Path) -> CalcResult<EstimateRequest> {
    parse_request(&read_file(path)?)
}

/// Parse a bare estimate request from JSON text.
pub fn parse_request(json: &str) -> CalcResult<EstimateRequest> {
    serde_json::from_str(json)
        .map_err(|e| EstimateError::serialization(format!("Invalid estimate request: {e}")))
}

fn read_file(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path).map_err(|e| file_error("read", path, e))
}

fn file_error(operation: &str, path: &Path, err: std::io::Error) -> EstimateError {
    EstimateError::file_error(operation, path.display().to_string(), err.to_string())
}

/// Major versions must match; under 0.x the file's minor may not be newer than ours.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || EstimateError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };
    let parse = |v: &str| -> Option<(u32, u32)> {
        let mut parts = v.trim().split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next().map_or(Some(0), |p| p.parse().ok())?;
        Some((major, minor))
    };

    let (file_major, file_minor) = parse(file_version).ok_or_else(mismatch)?;
    let (ours_major, ours_minor) = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != ours_major || (ours_major == 0 && file_minor > ours_minor) {
        return Err(mismatch());
    }
    Ok(())
}
