//! Process exit codes

/// Exit status reported by the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Run finished cleanly or the checksum was verified
    Success = 0,
    /// Missing source, bad configuration, or the last step failed
    Failure = 1,
    /// Stopped by Ctrl+C / SIGTERM (128 + SIGINT)
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::Failure.as_i32(), 1);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }
}
