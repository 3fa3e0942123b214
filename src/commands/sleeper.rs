//! Pausing between loop iterations

use crate::signal::ShutdownHandler;
use std::thread;
use std::time::{Duration, Instant};

/// Blocks the driver between checks
pub trait Sleeper {
    /// Wait for `duration`, returning early if shutdown is requested
    fn sleep(&mut self, duration: Duration, shutdown: &ShutdownHandler);
}

/// Real-time sleeper that polls the shutdown flag every `slice`
#[derive(Debug, Clone)]
pub struct ThreadSleeper {
    slice: Duration,
}

impl ThreadSleeper {
    /// Sleeper that wakes every `slice` to look at the shutdown flag
    pub fn with_slice(slice: Duration) -> Self {
        Self {
            slice: slice.max(Duration::from_millis(1)),
        }
    }
}

impl Default for ThreadSleeper {
    fn default() -> Self {
        Self::with_slice(Duration::from_millis(100))
    }
}

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration, shutdown: &ShutdownHandler) {
        // No representable deadline: wait for shutdown only
        let deadline = Instant::now().checked_add(duration);
        while !shutdown.is_shutdown_requested() {
            let remaining = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    deadline - now
                }
                None => self.slice,
            };
            thread::sleep(remaining.min(self.slice));
        }
    }
}
