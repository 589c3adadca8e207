//! Clock abstraction for the UUIDv7 generator.

use std::time;

/// A trait that provides the current Unix timestamp in milliseconds to [`V7Generator`].
///
/// The timestamps returned need not be monotonic; the generator tolerates small rollbacks.
///
/// Any `FnMut() -> u64` closure is a time source, which is handy for reproducible generation.
///
/// [`V7Generator`]: crate::V7Generator
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default time source that reads [`std::time::SystemTime`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as u64
    }
}

impl<F: FnMut() -> u64> TimeSource for F {
    fn unix_ts_ms(&mut self) -> u64 {
        self()
    }
}
