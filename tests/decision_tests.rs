//! Size-based copy decision tests

use bigmove::decision::{decide_copy, should_copy};
use bigmove::{CopyDecision, MoverError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ═══════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════

fn file_of_size(dir: &Path, name: &str, size: usize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, vec![b'a'; size]).expect("Failed to write test file");
    path
}

// ═══════════════════════════════════════════════════════════
// decide_copy() Tests
// ═══════════════════════════════════════════════════════════

#[test]
fn test_missing_destination_copies() {
    let temp_dir = TempDir::new().unwrap();
    let src = file_of_size(temp_dir.path(), "src.bin", 100);
    let dest = temp_dir.path().join("dest.bin");

    let decision = decide_copy(&src, &dest).unwrap();

    assert_eq!(decision, CopyDecision::DestinationMissing);
    assert!(decision.should_copy());
}

#[test]
fn test_larger_source_copies() {
    let temp_dir = TempDir::new().unwrap();
    let src = file_of_size(temp_dir.path(), "src.bin", 100);
    let dest = file_of_size(temp_dir.path(), "dest.bin", 50);

    assert_eq!(
        decide_copy(&src, &dest).unwrap(),
        CopyDecision::SourceLarger {
            source_size: 100,
            destination_size: 50
        }
    );
}

#[test]
fn test_smaller_source_does_not_copy() {
    let temp_dir = TempDir::new().unwrap();
    let src = file_of_size(temp_dir.path(), "src.bin", 50);
    let dest = file_of_size(temp_dir.path(), "dest.bin", 100);

    let decision = decide_copy(&src, &dest).unwrap();

    assert!(!decision.should_copy());
    assert_eq!(
        decision,
        CopyDecision::UpToDate {
            source_size: 50,
            destination_size: 100
        }
    );
}

#[test]
fn test_equal_sizes_do_not_copy_even_if_content_differs() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src.txt");
    let dest = temp_dir.path().join("dest.txt");
    fs::write(&src, b"AAAA").unwrap();
    fs::write(&dest, b"BBBB").unwrap();

    assert!(!should_copy(&src, &dest).unwrap());
}

#[test]
fn test_empty_files_do_not_copy() {
    let temp_dir = TempDir::new().unwrap();
    let src = file_of_size(temp_dir.path(), "src.bin", 0);
    let dest = file_of_size(temp_dir.path(), "dest.bin", 0);

    assert!(!should_copy(&src, &dest).unwrap());
}

#[test]
fn test_vanished_source_with_existing_destination() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("gone.bin");
    let dest = file_of_size(temp_dir.path(), "dest.bin", 10);

    let err = decide_copy(&src, &dest).unwrap_err();

    assert!(matches!(err, MoverError::SourceMissing { path } if path == src));
}

#[test]
fn test_size_grid_on_disk() {
    let temp_dir = TempDir::new().unwrap();

    for (src_size, dest_size) in [(0, 1), (1, 0), (4096, 4096), (4097, 4096), (10, 9999)] {
        let src = file_of_size(temp_dir.path(), "grid_src.bin", src_size);
        let dest = file_of_size(temp_dir.path(), "grid_dest.bin", dest_size);

        assert_eq!(
            should_copy(&src, &dest).unwrap(),
            src_size > dest_size,
            "src={} dest={}",
            src_size,
            dest_size
        );
    }
}
