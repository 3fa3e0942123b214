//! Error types for bigmove

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for bigmove operations
#[derive(Debug, Error)]
pub enum MoverError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Expected digest is not a 32 character hex string
    #[error("Invalid MD5 digest: {0:?}")]
    InvalidDigest(String),

    /// Source file is not there
    #[error("Source file does not exist: {path}")]
    SourceMissing { path: PathBuf },

    /// Copy did not complete
    #[error("Failed to copy {from} to {to}: {cause}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    /// Destination could not be read while hashing
    #[error("Failed to read {path} for checksum: {cause}")]
    DigestRead {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    /// Checksum mismatch detected
    #[error("Checksum mismatch: {path} (expected {expected}, got {actual})")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Copy or checksum stopped by a shutdown request
    #[error("Interrupted")]
    Interrupted,
}

impl MoverError {
    /// Underlying I/O error, if any
    pub fn io_cause(&self) -> Option<&std::io::Error> {
        match self {
            MoverError::Io(err) => Some(err),
            MoverError::CopyFailed { cause, .. } | MoverError::DigestRead { cause, .. } => {
                Some(cause)
            }
            _ => None,
        }
    }

    /// Short suggestion shown next to the error in the log
    pub fn hint(&self) -> Option<&'static str> {
        if let Some(io) = self.io_cause() {
            return match io.kind() {
                ErrorKind::NotFound => {
                    Some("Verify the path and its parent directory exist.")
                }
                ErrorKind::PermissionDenied => {
                    Some("Check file permissions or run with a user that has access.")
                }
                ErrorKind::WriteZero | ErrorKind::UnexpectedEof | ErrorKind::BrokenPipe => {
                    Some("The transfer was cut short. Check disk space and stability.")
                }
                _ => None,
            };
        }

        match self {
            MoverError::SourceMissing { .. } => Some("Check the source path for typos."),
            MoverError::InvalidDigest(_) => Some("Pass --md5 as 32 hexadecimal characters."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Error as IoError;

    #[test]
    fn test_io_error_automatic_conversion() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let err: MoverError = io_error.into();

        assert!(matches!(err, MoverError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_io_error_from_function() {
        fn returns_io_error() -> Result<(), MoverError> {
            let _file = std::fs::File::open("/nonexistent/path/file.txt")?;
            Ok(())
        }

        let result = returns_io_error();
        assert!(matches!(result.unwrap_err(), MoverError::Io(_)));
    }

    #[test]
    fn test_copy_failed_names_both_paths() {
        let error = MoverError::CopyFailed {
            from: PathBuf::from("/data/in.bin"),
            to: PathBuf::from("/backup/out.bin"),
            cause: IoError::new(ErrorKind::PermissionDenied, "denied"),
        };
        let msg = error.to_string();
        assert!(msg.contains("/data/in.bin"));
        assert!(msg.contains("/backup/out.bin"));
        assert!(error.hint().unwrap().contains("permissions"));
    }

    #[test]
    fn test_copy_failed_exposes_source_chain() {
        use std::error::Error;

        let error = MoverError::CopyFailed {
            from: PathBuf::from("a"),
            to: PathBuf::from("b"),
            cause: IoError::new(ErrorKind::Other, "disk on fire"),
        };
        let source = error.source().expect("cause should be the error source");
        assert!(source.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_digest_read_names_path() {
        let error = MoverError::DigestRead {
            path: PathBuf::from("dest.iso"),
            cause: IoError::new(ErrorKind::UnexpectedEof, "short read"),
        };
        assert!(error.to_string().contains("dest.iso"));
        assert!(error.hint().is_some());
    }

    #[test]
    fn test_checksum_mismatch() {
        let error = MoverError::ChecksumMismatch {
            path: PathBuf::from("corrupted.dat"),
            expected: "aa".repeat(16),
            actual: "bb".repeat(16),
        };
        let msg = error.to_string();
        assert!(msg.contains("Checksum mismatch"));
        assert!(msg.contains("corrupted.dat"));
        assert!(msg.contains(&"aa".repeat(16)));
    }

    #[test]
    fn test_source_missing_hint() {
        let error = MoverError::SourceMissing {
            path: PathBuf::from("/gone.txt"),
        };
        assert!(error.to_string().contains("/gone.txt"));
        assert_eq!(error.hint(), Some("Check the source path for typos."));
    }

    #[test]
    fn test_invalid_digest_hint() {
        let error = MoverError::InvalidDigest("xyz".to_string());
        assert!(error.to_string().contains("\"xyz\""));
        assert!(error.hint().unwrap().contains("--md5"));
    }

    #[test]
    fn test_hint_absent_for_unclassified_errors() {
        assert!(MoverError::Interrupted.hint().is_none());
        assert!(MoverError::Io(IoError::new(ErrorKind::Other, "x"))
            .hint()
            .is_none());
    }
}
