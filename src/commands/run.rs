//! Check / copy / verify driver

use crate::commands::{Sleeper, ThreadSleeper};
use crate::decision::decide_copy;
use crate::executor::{copy_file_atomic, CopyReport};
use crate::hash::{compute_md5, Md5Digest};
use crate::signal::{install_handler, ShutdownHandler};
use crate::types::{CopyDecision, ExitCode, MoverError};
use crate::Config;
use indicatif::HumanBytes;
use std::path::Path;
use std::time::Duration;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Source was absent at startup; nothing was attempted
    SourceMissing,
    /// Single-shot run completed its one pass
    Finished,
    /// Destination matched the expected MD5
    Verified,
    /// Shutdown was requested
    Interrupted,
}

/// Step that went wrong in the most recent iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Metadata of source or destination could not be read
    Check,
    /// Copy did not complete
    Copy,
    /// Destination could not be read for hashing
    Digest,
    /// Destination hashed to something other than the expected digest
    Mismatch,
}

/// Counters and final state of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub checks: u64,
    pub copies: u64,
    pub failed_copies: u64,
    pub bytes_copied: u64,
    pub sleeps: u64,
    /// Cleared at the start of every check
    pub last_failure: Option<FailureKind>,
}

impl RunSummary {
    fn new() -> Self {
        Self {
            outcome: RunOutcome::Finished,
            checks: 0,
            copies: 0,
            failed_copies: 0,
            bytes_copied: 0,
            sleeps: 0,
            last_failure: None,
        }
    }

    /// Exit status for the process
    pub fn exit_code(&self) -> ExitCode {
        match self.outcome {
            RunOutcome::Verified => ExitCode::Success,
            RunOutcome::Interrupted => ExitCode::Interrupted,
            RunOutcome::SourceMissing => ExitCode::Failure,
            RunOutcome::Finished if self.last_failure.is_some() => ExitCode::Failure,
            RunOutcome::Finished => ExitCode::Success,
        }
    }
}

/// Events emitted while the driver runs.
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// Driver is about to check the source.
    Started { config: &'a Config },
    /// Source did not exist at startup.
    SourceMissing { path: &'a Path },
    /// Size comparison finished.
    Decided {
        source: &'a Path,
        destination: &'a Path,
        decision: CopyDecision,
    },
    /// Size comparison could not be made.
    CheckFailed { error: &'a MoverError },
    /// Copy completed.
    Copied {
        source: &'a Path,
        destination: &'a Path,
        report: &'a CopyReport,
    },
    /// Copy failed; the driver carries on.
    CopyFailed { error: &'a MoverError },
    /// Destination matched the expected digest.
    DigestMatched {
        path: &'a Path,
        digest: &'a Md5Digest,
    },
    /// Destination hashed to something else (`MoverError::ChecksumMismatch`).
    DigestMismatch { error: &'a MoverError },
    /// Destination could not be hashed; treated as a mismatch.
    DigestFailed { error: &'a MoverError },
    /// Driver is pausing before the next check.
    Sleeping { duration: Duration },
    /// Shutdown was observed, between iterations or mid copy / checksum.
    Interrupted,
    /// Run reached its terminal state.
    Finished { summary: &'a RunSummary },
}

impl RunEvent<'_> {
    /// Stable short name, handy for assertions and debug output
    pub fn name(&self) -> &'static str {
        match self {
            RunEvent::Started { .. } => "started",
            RunEvent::SourceMissing { .. } => "source-missing",
            RunEvent::Decided { .. } => "decided",
            RunEvent::CheckFailed { .. } => "check-failed",
            RunEvent::Copied { .. } => "copied",
            RunEvent::CopyFailed { .. } => "copy-failed",
            RunEvent::DigestMatched { .. } => "digest-matched",
            RunEvent::DigestMismatch { .. } => "digest-mismatch",
            RunEvent::DigestFailed { .. } => "digest-failed",
            RunEvent::Sleeping { .. } => "sleeping",
            RunEvent::Interrupted => "interrupted",
            RunEvent::Finished { .. } => "finished",
        }
    }
}

/// Observer that receives driver events.
pub type RunCallback = dyn Fn(&RunEvent<'_>) + Send + Sync;

enum State {
    Check,
    Copy,
    Verify,
    Sleep,
    Done(RunOutcome),
}

/// Run with the real clock, Ctrl+C handling and log output
pub fn run(config: &Config) -> anyhow::Result<RunSummary> {
    let shutdown = install_handler()?;
    let mut sleeper = ThreadSleeper::default();
    Ok(run_with(config, &shutdown, &mut sleeper, Some(&log_event)))
}

/// Drive the check → copy → verify → sleep cycle until a terminal state
///
/// Per-step failures never abort the run: they are reported through
/// `on_event`, recorded in `RunSummary::last_failure`, and the driver moves on
/// as if no copy were needed (loop mode sleeps, single-shot finishes).
///
/// `shutdown` is honoured before every check, while sleeping, and between
/// chunks of a copy or checksum. An interrupted copy leaves the destination
/// untouched.
pub fn run_with(
    config: &Config,
    shutdown: &ShutdownHandler,
    sleeper: &mut dyn Sleeper,
    on_event: Option<&RunCallback>,
) -> RunSummary {
    let mut summary = RunSummary::new();
    let source = config.source.as_path();
    let destination = config.destination.as_path();

    emit_event(on_event, RunEvent::Started { config });

    let mut state = if source.exists() {
        State::Check
    } else {
        emit_event(on_event, RunEvent::SourceMissing { path: source });
        State::Done(RunOutcome::SourceMissing)
    };

    loop {
        state = match state {
            State::Check => {
                if shutdown.is_shutdown_requested() {
                    emit_event(on_event, RunEvent::Interrupted);
                    State::Done(RunOutcome::Interrupted)
                } else {
                    summary.checks += 1;
                    summary.last_failure = None;

                    match decide_copy(source, destination) {
                        Ok(decision) => {
                            emit_event(
                                on_event,
                                RunEvent::Decided {
                                    source,
                                    destination,
                                    decision,
                                },
                            );
                            if decision.should_copy() {
                                State::Copy
                            } else {
                                idle(config)
                            }
                        }
                        Err(error) => {
                            summary.last_failure = Some(FailureKind::Check);
                            emit_event(on_event, RunEvent::CheckFailed { error: &error });
                            idle(config)
                        }
                    }
                }
            }

            State::Copy => match copy_file_atomic(source, destination, shutdown) {
                Ok(report) => {
                    summary.copies += 1;
                    summary.bytes_copied += report.bytes_copied;
                    emit_event(
                        on_event,
                        RunEvent::Copied {
                            source,
                            destination,
                            report: &report,
                        },
                    );
                    if config.expected_md5.is_some() {
                        State::Verify
                    } else {
                        idle(config)
                    }
                }
                Err(MoverError::Interrupted) => {
                    emit_event(on_event, RunEvent::Interrupted);
                    State::Done(RunOutcome::Interrupted)
                }
                Err(error) => {
                    summary.failed_copies += 1;
                    summary.last_failure = Some(FailureKind::Copy);
                    emit_event(on_event, RunEvent::CopyFailed { error: &error });
                    idle(config)
                }
            },

            State::Verify => match &config.expected_md5 {
                Some(expected) => match compute_md5(destination, shutdown) {
                    Ok(actual) if actual == *expected => {
                        emit_event(
                            on_event,
                            RunEvent::DigestMatched {
                                path: destination,
                                digest: &actual,
                            },
                        );
                        digest_match_ends_run()
                    }
                    Ok(actual) => {
                        summary.last_failure = Some(FailureKind::Mismatch);
                        let error = MoverError::ChecksumMismatch {
                            path: destination.to_path_buf(),
                            expected: expected.to_string(),
                            actual: actual.to_string(),
                        };
                        emit_event(on_event, RunEvent::DigestMismatch { error: &error });
                        idle(config)
                    }
                    Err(MoverError::Interrupted) => {
                        emit_event(on_event, RunEvent::Interrupted);
                        State::Done(RunOutcome::Interrupted)
                    }
                    Err(error) => {
                        summary.last_failure = Some(FailureKind::Digest);
                        emit_event(on_event, RunEvent::DigestFailed { error: &error });
                        idle(config)
                    }
                },
                None => idle(config),
            },

            State::Sleep => {
                summary.sleeps += 1;
                emit_event(
                    on_event,
                    RunEvent::Sleeping {
                        duration: config.sleep,
                    },
                );
                sleeper.sleep(config.sleep, shutdown);
                State::Check
            }

            State::Done(outcome) => {
                summary.outcome = outcome;
                emit_event(on_event, RunEvent::Finished { summary: &summary });
                return summary;
            }
        };
    }
}

/// Where to go when there is nothing (more) to do this iteration
fn idle(config: &Config) -> State {
    if config.loop_mode {
        State::Sleep
    } else {
        State::Done(RunOutcome::Finished)
    }
}

/// A verified destination ends the run, loop mode or not.
fn digest_match_ends_run() -> State {
    State::Done(RunOutcome::Verified)
}

fn emit_event(on_event: Option<&RunCallback>, event: RunEvent<'_>) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}

/// Default observer: one log line per event
pub fn log_event(event: &RunEvent<'_>) {
    match event {
        RunEvent::Started { config } => {
            if config.loop_mode {
                log::info!(
                    "Starting in loop mode: {} -> {} every {}s",
                    config.source.display(),
                    config.destination.display(),
                    config.sleep.as_secs()
                );
            } else {
                log::debug!(
                    "Checking {} -> {}",
                    config.source.display(),
                    config.destination.display()
                );
            }
            if let Some(digest) = &config.expected_md5 {
                log::debug!("Expecting MD5 {}", digest);
            }
        }
        RunEvent::SourceMissing { path } => {
            log::error!("Source file {} does not exist.", path.display());
        }
        RunEvent::Decided {
            source,
            destination,
            decision,
        } => {
            if decision.should_copy() {
                log::info!(
                    "Copy needed for {} -> {}: {}",
                    source.display(),
                    destination.display(),
                    decision
                );
            } else {
                log::info!(
                    "No need to copy {} -> {}: {}",
                    source.display(),
                    destination.display(),
                    decision
                );
            }
        }
        RunEvent::CheckFailed { error } => log_error("Size check failed", error),
        RunEvent::Copied {
            source,
            destination,
            report,
        } => {
            log::info!(
                "Copied {} to {} ({})",
                source.display(),
                destination.display(),
                HumanBytes(report.bytes_copied)
            );
            if let Some(warning) = &report.metadata_warning {
                log::warn!(
                    "Could not preserve metadata on {}: {}",
                    destination.display(),
                    warning
                );
            }
        }
        RunEvent::CopyFailed { error } => log_error("Copy failed", error),
        RunEvent::DigestMatched { path, digest } => {
            log::info!("Checksum verified for {}: {}", path.display(), digest);
        }
        RunEvent::DigestMismatch { error } => log::warn!("{}", error),
        RunEvent::DigestFailed { error } => log_error("Checksum failed", error),
        RunEvent::Sleeping { duration } => {
            log::debug!("Sleeping {}s before next check", duration.as_secs());
        }
        RunEvent::Interrupted => log::warn!("Interrupted, stopping"),
        RunEvent::Finished { summary } => {
            log::debug!(
                "Done ({:?}): {} checks, {} copies ({} failed), {} copied",
                summary.outcome,
                summary.checks,
                summary.copies,
                summary.failed_copies,
                HumanBytes(summary.bytes_copied)
            );
        }
    }
}

fn log_error(context: &str, error: &MoverError) {
    match error.hint() {
        Some(hint) => log::error!("{}: {} ({})", context, error, hint),
        None => log::error!("{}: {}", context, error),
    }
}
