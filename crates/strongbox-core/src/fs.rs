//! Filesystem utilities for atomic vault replacement.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::error::{Result, VaultError};

/// Atomically rename a file over `destination`.
///
/// On Unix `rename` replaces an existing destination atomically, so a failed
/// rename leaves the destination as it was. Windows refuses to rename over an
/// existing file; there the destination is removed first and the rename
/// retried.
///
/// If the rename ultimately fails, the temp file is cleaned up.
///
/// # Errors
///
/// Returns an error if the rename fails (after the Windows fallback, if any).
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(temp_path, destination) {
        Ok(()) => Ok(()),
        #[cfg(windows)]
        Err(initial_err) if destination.exists() => {
            let _ = fs::remove_file(destination);
            fs::rename(temp_path, destination).map_err(|retry_err| {
                let _ = fs::remove_file(temp_path);
                io::Error::new(
                    retry_err.kind(),
                    format!(
                        "Atomic rename failed (initial: {}, retry: {})",
                        initial_err, retry_err
                    ),
                )
            })
        }
        Err(err) => {
            let _ = fs::remove_file(temp_path);
            Err(err)
        }
    }
}

/// A lock file whose owner cannot be identified is left alone for this long.
pub const STALE_LOCK_AGE: Duration = Duration::from_secs(10 * 60);

/// Exclusive claim on a vault path for the duration of a save.
///
/// Held as a `<file>.lock` sibling created with create-new semantics and
/// removed on drop. The lock file records the owner's process id so that a
/// lock left behind by a crashed save can be reclaimed.
#[derive(Debug)]
pub struct SaveLock {
    path: PathBuf,
}

impl SaveLock {
    /// Claim the lock for `destination`.
    ///
    /// An existing lock is reclaimed when its owner process is gone, or, if
    /// the owner cannot be determined, when it is older than
    /// [`STALE_LOCK_AGE`].
    ///
    /// # Errors
    ///
    /// Returns `VaultError::StorageWriteFailed` if another save holds the lock
    /// or the lock file cannot be created.
    pub fn acquire(destination: &Path) -> Result<Self> {
        let path = sibling_path(destination, "lock")?;
        match Self::create(&path) {
            Ok(lock) => Ok(lock),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if !lock_is_stale(&path) {
                    return Err(locked_error(&path));
                }

                warn!(lock = %path.display(), "reclaiming stale save lock");
                match fs::remove_file(&path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => {
                        return Err(VaultError::StorageWriteFailed(format!(
                            "Stale lock removal failed: {}",
                            e
                        )))
                    }
                }

                Self::create(&path).map_err(|e| match e.kind() {
                    io::ErrorKind::AlreadyExists => locked_error(&path),
                    _ => VaultError::StorageWriteFailed(format!("Lock file create failed: {}", e)),
                })
            }
            Err(e) => Err(VaultError::StorageWriteFailed(format!(
                "Lock file create failed: {}",
                e
            ))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create(path: &Path) -> io::Result<Self> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        let lock = Self {
            path: path.to_path_buf(),
        };
        writeln!(file, "{}", std::process::id())?;
        Ok(lock)
    }
}

impl Drop for SaveLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(lock = %self.path.display(), error = %e, "failed to remove save lock");
        }
    }
}

fn locked_error(path: &Path) -> VaultError {
    VaultError::StorageWriteFailed(format!(
        "Vault is locked by another save ({})",
        path.display()
    ))
}

fn lock_is_stale(path: &Path) -> bool {
    let owner = fs::read_to_string(path)
        .ok()
        .and_then(|contents| contents.trim().parse::<u32>().ok());

    match owner {
        Some(pid) if pid == std::process::id() => false,
        Some(pid) => match process_alive(pid) {
            Some(alive) => !alive,
            None => lock_older_than(path, STALE_LOCK_AGE),
        },
        None => lock_older_than(path, STALE_LOCK_AGE),
    }
}

fn lock_older_than(path: &Path, age: Duration) -> bool {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| modified.elapsed().ok())
        .is_some_and(|elapsed| elapsed > age)
}

/// Whether `pid` names a live process, or `None` when that cannot be told.
#[cfg(unix)]
fn process_alive(pid: u32) -> Option<bool> {
    let pid = libc::pid_t::try_from(pid).ok().filter(|pid| *pid > 0)?;
    // SAFETY: signal 0 only performs the existence and permission checks
    let result = unsafe { libc::kill(pid, 0) };
    if result == 0 {
        return Some(true);
    }
    match io::Error::last_os_error().raw_os_error() {
        Some(libc::ESRCH) => Some(false),
        Some(libc::EPERM) => Some(true),
        _ => None,
    }
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> Option<bool> {
    None
}

/// Write `data` to `path` through a synced temp file and an atomic rename.
///
/// The previous contents of `path` stay intact unless the rename succeeds.
///
/// # Errors
///
/// Returns `VaultError::StorageWriteFailed` on any I/O failure.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| VaultError::StorageWriteFailed(format!("System time error: {}", e)))?
        .as_nanos();
    let temp_path = sibling_path(path, &format!("{}.tmp", nanos))?;

    let result = write_synced(&temp_path, data);
    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    rename_with_fallback(&temp_path, path)
        .map_err(|e| VaultError::StorageWriteFailed(format!("Atomic rename failed: {}", e)))
}

fn write_synced(temp_path: &Path, data: &[u8]) -> Result<()> {
    let mut file: File = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(temp_path)
        .map_err(|e| VaultError::StorageWriteFailed(format!("Temp file create failed: {}", e)))?;
    file.write_all(data)
        .map_err(|e| VaultError::StorageWriteFailed(format!("Temp file write failed: {}", e)))?;
    file.sync_all()
        .map_err(|e| VaultError::StorageWriteFailed(format!("Temp file sync failed: {}", e)))?;
    Ok(())
}

fn sibling_path(path: &Path, suffix: &str) -> Result<PathBuf> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| VaultError::StorageWriteFailed("Invalid vault filename".to_string()))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok(parent.join(format!("{}.{}", filename, suffix)))
}
