//! CopyDecision - Outcome of comparing source and destination

use std::fmt;

/// Whether the destination needs to be refreshed from the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyDecision {
    /// Destination does not exist yet
    DestinationMissing,

    /// Source has grown past the destination
    SourceLarger {
        source_size: u64,
        destination_size: u64,
    },

    /// Destination is at least as large as the source
    UpToDate {
        source_size: u64,
        destination_size: u64,
    },
}

impl CopyDecision {
    /// Build a decision from the two sizes of files that both exist
    pub fn from_sizes(source_size: u64, destination_size: u64) -> Self {
        if source_size > destination_size {
            CopyDecision::SourceLarger {
                source_size,
                destination_size,
            }
        } else {
            CopyDecision::UpToDate {
                source_size,
                destination_size,
            }
        }
    }

    /// True when a copy is warranted
    pub fn should_copy(&self) -> bool {
        !matches!(self, CopyDecision::UpToDate { .. })
    }
}

impl fmt::Display for CopyDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyDecision::DestinationMissing => write!(f, "destination does not exist"),
            CopyDecision::SourceLarger {
                source_size,
                destination_size,
            } => write!(
                f,
                "source is larger than destination ({} > {} bytes)",
                source_size, destination_size
            ),
            CopyDecision::UpToDate {
                source_size,
                destination_size,
            } => write!(
                f,
                "source is not larger than destination ({} <= {} bytes)",
                source_size, destination_size
            ),
        }
    }
}
