//! Size-based copy decision

use crate::types::{CopyDecision, MoverError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Decide whether `dest` should be refreshed from `src`
///
/// 1. **Destination missing** → copy
/// 2. **Source larger** than destination → copy
/// 3. Otherwise → leave the destination alone
///
/// Only byte sizes are compared; content and timestamps are ignored.
///
/// # Errors
/// * `MoverError::SourceMissing` if `src` has disappeared
/// * `MoverError::Io` if either file's metadata cannot be read
pub fn decide_copy(src: &Path, dest: &Path) -> Result<CopyDecision, MoverError> {
    let dest_size = match fs::metadata(dest) {
        Ok(metadata) => metadata.len(),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Ok(CopyDecision::DestinationMissing)
        }
        Err(err) => return Err(MoverError::Io(err)),
    };

    let src_size = match fs::metadata(src) {
        Ok(metadata) => metadata.len(),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(MoverError::SourceMissing {
                path: src.to_path_buf(),
            })
        }
        Err(err) => return Err(MoverError::Io(err)),
    };

    Ok(CopyDecision::from_sizes(src_size, dest_size))
}

/// Shorthand for `decide_copy(src, dest)?.should_copy()`
pub fn should_copy(src: &Path, dest: &Path) -> Result<bool, MoverError> {
    Ok(decide_copy(src, dest)?.should_copy())
}
