//! Atomic file copy implementation

use crate::signal::ShutdownHandler;
use crate::types::MoverError;
use filetime::FileTime;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Result of a completed copy
#[derive(Debug)]
pub struct CopyReport {
    /// Size of the destination after the copy
    pub bytes_copied: u64,

    /// Set when the data landed but permissions or timestamps could not be
    /// applied (e.g. on filesystems without POSIX modes)
    pub metadata_warning: Option<String>,
}

/// Copy a file atomically using the write-then-rename strategy
///
/// 1. Stream `src` into a `.part` sibling of `dest`
/// 2. Flush and sync to disk
/// 3. Preserve metadata (permissions, atime, mtime)
/// 4. Rename over `dest`
///
/// The parent directory of `dest` must already exist. `<dest>.part` is
/// treated as scratch space: an existing file with that name is truncated and
/// replaced. On failure or interruption the `.part` file is removed and `dest`
/// is left as it was.
///
/// `shutdown` is checked before every chunk.
///
/// # Arguments
/// * `src` - Source file path
/// * `dest` - Destination file path
/// * `shutdown` - Cancellation flag
///
/// # Returns
/// * `Ok(CopyReport)` - Size of the resulting destination
/// * `Err(MoverError::CopyFailed)` - Any I/O error, with its cause
/// * `Err(MoverError::Interrupted)` - Shutdown requested mid-copy
///
/// # Example
/// ```no_run
/// use bigmove::executor::copy_file_atomic;
/// use bigmove::signal::ShutdownHandler;
/// use std::path::Path;
///
/// let shutdown = ShutdownHandler::new();
/// let report = copy_file_atomic(Path::new("source.bin"), Path::new("dest.bin"), &shutdown)?;
/// println!("{} bytes", report.bytes_copied);
/// # Ok::<(), bigmove::types::MoverError>(())
/// ```
pub fn copy_file_atomic(
    src: &Path,
    dest: &Path,
    shutdown: &ShutdownHandler,
) -> Result<CopyReport, MoverError> {
    let part_path = part_path_for(dest);

    let result = copy_via_part(src, dest, &part_path, shutdown);
    if result.is_err() {
        let _ = fs::remove_file(&part_path);
    }
    result
}

/// `dir/name.ext` -> `dir/name.ext.part`
pub fn part_path_for(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("bigmove"));
    name.push(".part");
    dest.with_file_name(name)
}

fn copy_via_part(
    src: &Path,
    dest: &Path,
    part_path: &Path,
    shutdown: &ShutdownHandler,
) -> Result<CopyReport, MoverError> {
    let failed = |cause: io::Error| MoverError::CopyFailed {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        cause,
    };

    let mut src_file = File::open(src).map_err(failed)?;
    let mut part_file = File::create(part_path).map_err(failed)?;

    let mut buffer = vec![0u8; 128 * 1024];
    loop {
        if shutdown.is_shutdown_requested() {
            return Err(MoverError::Interrupted);
        }
        let bytes_read = match src_file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(failed(err)),
        };
        part_file.write_all(&buffer[..bytes_read]).map_err(failed)?;
    }

    part_file.sync_all().map_err(failed)?;

    // Drop the file handle before rename (required on Windows)
    drop(part_file);

    let metadata_warning = preserve_metadata(src, part_path).err().map(|e| e.to_string());

    fs::rename(part_path, dest).map_err(failed)?;

    let bytes_copied = fs::metadata(dest).map_err(failed)?.len();
    Ok(CopyReport {
        bytes_copied,
        metadata_warning,
    })
}

fn preserve_metadata(src: &Path, target: &Path) -> io::Result<()> {
    let src_metadata = fs::metadata(src)?;

    let atime = FileTime::from_last_access_time(&src_metadata);
    let mtime = FileTime::from_last_modification_time(&src_metadata);
    filetime::set_file_times(target, atime, mtime)?;

    // Permissions last: a read-only mode would block the timestamp update on
    // some platforms.
    fs::set_permissions(target, src_metadata.permissions())
}
