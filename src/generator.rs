//! UUIDv7 generator and related types.

use crate::counter::{UuidCounter, MAX_TIMESTAMP};
use crate::time::{StdSystemTime, TimeSource};
use crate::Uuid;

pub mod with_rand08;


/// A trait that defines the minimum random number generator interface for [`V7Generator`].
pub trait RandSource {
    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;

    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// Represents a UUIDv7 generator that encapsulates a [`UuidCounter`] and guarantees the monotonic
/// order of UUIDs generated within the same millisecond.
///
/// This type provides the interface to customize the random number generator and system clock of
/// a UUIDv7 generator. It also helps control the scope of guaranteed order of the generated UUIDs.
/// The following example guarantees the process-wide (cross-thread) monotonicity using Rust's
/// standard synchronization mechanism.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::{sync, thread};
/// use rfc_uuid::V7Generator;
///
/// let g = sync::Arc::new(sync::Mutex::new(V7Generator::with_rand08(OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
///
/// # Field layout
///
/// Each UUID carries the 48-bit `unix_ts_ms` in bytes 0..6, the 12-bit counter below the version
/// nibble in bytes 6..8, and 62 random bits after the variant bits in bytes 8..16.
///
/// # Generator functions
///
/// | Flavor                     | Timestamp | On big clock rewind |
/// | -------------------------- | --------- | ------------------- |
/// | [`generate`]               | Now       | Resets generator    |
/// | [`generate_or_abort`]      | Now       | Returns `None`      |
/// | [`generate_or_reset_core`] | Argument  | Resets generator    |
/// | [`generate_or_abort_core`] | Argument  | Returns `None`      |
///
/// All of the four return a monotonically increasing UUID by reusing the previous timestamp even
/// if the one provided is smaller than the immediately preceding UUID's. However, when such a
/// clock rollback is considered significant (by default, more than ten seconds), `generate`
/// (or_reset) methods reset the generator, breaking the increasing order, while `or_abort`
/// variants return `None`.
///
/// [`generate`]: V7Generator::generate
/// [`generate_or_abort`]: V7Generator::generate_or_abort
/// [`generate_or_reset_core`]: V7Generator::generate_or_reset_core
/// [`generate_or_abort_core`]: V7Generator::generate_or_abort_core
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct V7Generator<R, T = StdSystemTime> {
    counter: UuidCounter,

    /// The random number generator used by the generator.
    rand_source: R,

    /// The system clock used by the generator.
    time_source: T,
}

/// The rollback allowance used by [`V7Generator::generate`] and
/// [`V7Generator::generate_or_abort`].
pub const DEFAULT_ROLLBACK_ALLOWANCE: u64 = 10_000; // 10 seconds

impl<R> V7Generator<R> {
    /// Creates a generator object with a specified random number generator and the system clock.
    pub const fn new(rand_source: R) -> Self {
        Self::with_rand_and_time_sources(rand_source, StdSystemTime)
    }
}

impl<R, T> V7Generator<R, T> {
    /// Creates a generator object with specified random number generator and system clock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::{generator::with_rand08::Adapter, V7Generator};
    ///
    /// let mut g = V7Generator::with_rand_and_time_sources(
    ///     Adapter(rand::thread_rng()),
    ///     || 0x0123_4567_89abu64,
    /// );
    /// assert!(g.generate().to_string().starts_with("01234567-89ab-7000-"));
    /// assert!(g.generate().to_string().starts_with("01234567-89ab-7001-"));
    /// ```
    pub const fn with_rand_and_time_sources(rand_source: R, time_source: T) -> Self {
        Self {
            counter: UuidCounter::new(),
            rand_source,
            time_source,
        }
    }

    /// Returns the counter state of the generator.
    pub const fn counter(&self) -> &UuidCounter {
        &self.counter
    }
}

impl<R: RandSource, T: TimeSource> V7Generator<R, T> {
    /// Generates a new UUIDv7 object from the current timestamp, or resets the generator upon
    /// significant timestamp rollback.
    ///
    /// See the [`V7Generator`] type documentation for the description.
    pub fn generate(&mut self) -> Uuid {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_or_reset_core(unix_ts_ms, DEFAULT_ROLLBACK_ALLOWANCE)
    }

    /// Generates a new UUIDv7 object from the current timestamp, or returns `None` upon
    /// significant timestamp rollback.
    ///
    /// See the [`V7Generator`] type documentation for the description.
    pub fn generate_or_abort(&mut self) -> Option<Uuid> {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_or_abort_core(unix_ts_ms, DEFAULT_ROLLBACK_ALLOWANCE)
    }
}

impl<R: RandSource, T> V7Generator<R, T> {
    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed, or resets the generator upon
    /// significant timestamp rollback.
    ///
    /// See the [`V7Generator`] type documentation for the description.
    ///
    /// The `rollback_allowance` parameter specifies the amount of `unix_ts_ms` rollback that is
    /// considered significant. A suggested value is `10_000` (milliseconds). With `0`, any
    /// rollback resets the generator.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer.
    pub fn generate_or_reset_core(&mut self, unix_ts_ms: u64, rollback_allowance: u64) -> Uuid {
        if let Some(value) = self.generate_or_abort_core(unix_ts_ms, rollback_allowance) {
            value
        } else {
            tracing::debug!(
                unix_ts_ms,
                last_timestamp_ms = self.counter.last_timestamp_ms(),
                "timestamp rejected; resetting generator"
            );
            self.counter.reset();
            self.generate_or_abort_core(unix_ts_ms, rollback_allowance)
                .expect("rfc_uuid: reset generator must accept any timestamp")
        }
    }

    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed, or returns `None` upon
    /// significant timestamp rollback.
    ///
    /// See the [`V7Generator`] type documentation for the description.
    ///
    /// The `rollback_allowance` parameter specifies the amount of `unix_ts_ms` rollback that is
    /// considered significant. A suggested value is `10_000` (milliseconds).
    ///
    /// This method also returns `None` when the counter is exhausted at the maximum 48-bit
    /// timestamp.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer.
    pub fn generate_or_abort_core(
        &mut self,
        unix_ts_ms: u64,
        rollback_allowance: u64,
    ) -> Option<Uuid> {
        const MAX_RAND_B: u64 = (1 << 62) - 1;

        assert!(
            unix_ts_ms <= MAX_TIMESTAMP,
            "`unix_ts_ms` must be a 48-bit integer"
        );
        assert!(
            rollback_allowance < 1 << 48,
            "`rollback_allowance` out of reasonable range"
        );

        let (timestamp, counter) = self.counter.advance(unix_ts_ms, rollback_allowance)?;
        Some(Uuid::from_fields_v7(
            timestamp,
            counter,
            self.rand_source.next_u64() & MAX_RAND_B,
        ))
    }

    /// Generates a new UUIDv4 object utilizing the random number generator inside.
    pub fn generate_v4(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rand_source.fill_bytes(&mut bytes);
        bytes[6] = 0x40 | (bytes[6] & 0x0f);
        bytes[8] = 0x80 | (bytes[8] & 0x3f);
        Uuid::from_bytes(bytes)
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv7 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use rfc_uuid::V7Generator;
///
/// V7Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for V7Generator<R, T> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> std::iter::FusedIterator for V7Generator<R, T> {}
