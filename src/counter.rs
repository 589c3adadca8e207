//! Counter state guarding the monotonic order of UUIDv7s.

/// The largest value of the 12-bit counter stored below the version nibble of a UUIDv7.
pub const MAX_COUNTER: u16 = (1 << 12) - 1;

/// The largest value of the 48-bit `unix_ts_ms` field of a UUIDv7.
pub const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

/// Represents the `(last_timestamp_ms, counter)` pair of a UUIDv7 generator.
///
/// The counter starts from zero whenever a new, greater timestamp is observed and is incremented
/// for each UUID generated within the same millisecond. The pair thus increases strictly with
/// every successful [`advance`](UuidCounter::advance), and so do the UUIDs built from it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct UuidCounter {
    last_timestamp_ms: u64,
    counter: u16,
}

impl UuidCounter {
    /// Creates a counter in the initial `(0, 0)` state.
    pub const fn new() -> Self {
        Self {
            last_timestamp_ms: 0,
            counter: 0,
        }
    }

    /// Returns the timestamp of the last state.
    pub const fn last_timestamp_ms(&self) -> u64 {
        self.last_timestamp_ms
    }

    /// Returns the counter value of the last state.
    pub const fn counter(&self) -> u16 {
        self.counter
    }

    /// Resets the state to `(0, 0)`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advances the state by the `unix_ts_ms` observed and returns the new `(timestamp, counter)`
    /// pair, or returns `None` without changing the state if `unix_ts_ms` is smaller than the last
    /// timestamp by more than `rollback_allowance`, or if the counter is exhausted at
    /// [`MAX_TIMESTAMP`].
    ///
    /// - A greater `unix_ts_ms` becomes the new timestamp with the counter reset to zero.
    /// - An equal, or slightly smaller, `unix_ts_ms` keeps the last timestamp and increments the
    ///   counter. When the counter is exhausted, the timestamp is incremented instead, so the
    ///   timestamp may get ahead of the clock.
    pub fn advance(&mut self, unix_ts_ms: u64, rollback_allowance: u64) -> Option<(u64, u16)> {
        if unix_ts_ms > self.last_timestamp_ms {
            self.last_timestamp_ms = unix_ts_ms;
            self.counter = 0;
        } else if unix_ts_ms.saturating_add(rollback_allowance) >= self.last_timestamp_ms {
            if self.counter < MAX_COUNTER {
                self.counter += 1;
            } else if self.last_timestamp_ms >= MAX_TIMESTAMP {
                // neither field can move any further
                return None;
            } else {
                // increment timestamp at counter overflow
                self.last_timestamp_ms += 1;
                self.counter = 0;
                tracing::trace!(
                    timestamp = self.last_timestamp_ms,
                    "counter overflowed; timestamp advanced"
                );
            }
        } else {
            return None;
        }
        Some((self.last_timestamp_ms, self.counter))
    }
}
