//! MD5 checksums for post-copy verification

use crate::signal::ShutdownHandler;
use crate::types::MoverError;
use md5::{Digest, Md5};
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::str::FromStr;

/// Read size for streaming a file through the hasher
pub const CHUNK_SIZE: usize = 4096;

/// Lowercase hex MD5 digest
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Md5Digest(String);

impl Md5Digest {
    /// Hex representation, always lowercase
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Md5Digest {
    type Err = MoverError;

    /// Accepts 32 hex characters in either case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 32 || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MoverError::InvalidDigest(s.to_string()));
        }
        Ok(Md5Digest(trimmed.to_ascii_lowercase()))
    }
}

impl fmt::Display for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the MD5 digest of a file
///
/// The file is streamed in `CHUNK_SIZE` pieces, so memory use does not grow
/// with file size. `shutdown` is checked before every chunk.
///
/// # Errors
/// * `MoverError::DigestRead` if the file cannot be opened or a read fails
///   part way through
/// * `MoverError::Interrupted` if shutdown was requested while hashing
///
/// # Example
/// ```no_run
/// use bigmove::hash::compute_md5;
/// use bigmove::signal::ShutdownHandler;
/// use std::path::Path;
///
/// let digest = compute_md5(Path::new("file.txt"), &ShutdownHandler::new())?;
/// println!("{}", digest);
/// # Ok::<(), bigmove::types::MoverError>(())
/// ```
pub fn compute_md5(
    file_path: &Path,
    shutdown: &ShutdownHandler,
) -> Result<Md5Digest, MoverError> {
    let to_error = |cause: std::io::Error| MoverError::DigestRead {
        path: file_path.to_path_buf(),
        cause,
    };

    let file = File::open(file_path).map_err(to_error)?;
    compute_md5_reader(file, shutdown).map_err(|err| match err {
        MoverError::Io(cause) => to_error(cause),
        other => other,
    })
}

/// Compute the MD5 digest of everything `reader` yields
///
/// Read errors come back as `MoverError::Io`; a shutdown request between
/// chunks as `MoverError::Interrupted`.
pub fn compute_md5_reader<R: Read>(
    mut reader: R,
    shutdown: &ShutdownHandler,
) -> Result<Md5Digest, MoverError> {
    let mut hasher = Md5::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        if shutdown.is_shutdown_requested() {
            return Err(MoverError::Interrupted);
        }
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Md5Digest(format!("{:x}", hasher.finalize())))
}
