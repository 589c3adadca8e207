//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::Uuid;
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .expect("rfc_uuid: could not lock global generator")
}

/// Generates a UUIDv7 object.
///
/// This function employs a global generator and guarantees the process-wide monotonic order of
/// UUIDs generated within the same millisecond. On Unix, this function resets the generator when
/// the process ID changes (i.e., upon process forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc_uuid::uuid7();
/// println!("{}", uuid); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = rfc_uuid::uuid7().to_string();
/// ```
pub fn uuid7() -> Uuid {
    lock_global_gen().get_mut().generate()
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc_uuid::uuid4();
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn uuid4() -> Uuid {
    lock_global_gen().get_mut().generate_v4()
}

impl Uuid {
    /// Generates a random UUID (version 4) using the global generator.
    ///
    /// This is an alias for [`uuid4()`].
    pub fn generate_random() -> Self {
        uuid4()
    }

    /// Generates a Unix-time-ordered UUID (version 7) using the global generator.
    ///
    /// This is an alias for [`uuid7()`].
    pub fn generate_unix_time_based() -> Self {
        uuid7()
    }
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha12Core;

    use crate::generator::{RandSource, V7Generator};

    /// The random number generator of the global generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
    /// emulate the strategy used by [`rand::rngs::ThreadRng`].
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl RandSource for GlobalGenRng {
        fn next_u64(&mut self) -> u64 {
            self.0.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.0.fill_bytes(dest)
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: V7Generator<GlobalGenRng>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            let core = ChaCha12Core::from_rng(OsRng)
                .expect("rfc_uuid: could not initialize global generator");
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: V7Generator::new(GlobalGenRng(ReseedingRng::new(
                    core,
                    1024 * 64,
                    OsRng,
                ))),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`V7Generator`] instance, reseting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut V7Generator<GlobalGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                tracing::debug!(
                    pid = std::process::id(),
                    "process id changed; reinitializing global generator"
                );
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{uuid4, uuid7};
    use crate::{Uuid, Variant};

    const N_SAMPLES: usize = 100_000;
    thread_local! {
        static SAMPLES_V7: Vec<String> = (0..N_SAMPLES).map(|_| uuid7().into()).collect();
        static SAMPLES_V4: Vec<String> = (0..N_SAMPLES).map(|_| uuid4().into()).collect();
    }

    /// Counts, for each of the 128 bit positions, the samples that have the bit set.
    fn count_set_bits(samples: &[String]) -> [u32; 128] {
        let mut bins = [0u32; 128];
        for e in samples {
            let value = u128::from(e.parse::<Uuid>().unwrap());
            for (i, bin) in bins.iter_mut().enumerate() {
                *bin += (value >> (127 - i)) as u32 & 1;
            }
        }
        bins
    }

    /// Asserts the set ratio of each bit is ~50% at 99.999% binomial confidence.
    fn assert_random_bits(bins: &[u32; 128], positions: impl Iterator<Item = usize>) {
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for i in positions {
            let p = bins[i] as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {}: {}", i, p);
        }
    }

    /// Generates canonical strings of each version
    #[test]
    fn generates_canonical_strings_of_each_version() {
        for (version, samples) in [('7', &SAMPLES_V7), ('4', &SAMPLES_V4)] {
            let pattern = format!(
                r"^[0-9a-f]{{8}}-[0-9a-f]{{4}}-{}[0-9a-f]{{3}}-[89ab][0-9a-f]{{3}}-[0-9a-f]{{12}}$",
                version
            );
            let re = regex::Regex::new(&pattern).unwrap();
            samples.with(|samples| assert!(samples.iter().all(|e| re.is_match(e))));
        }
    }

    /// Generates 100k identifiers of each version without collision
    #[test]
    fn generates_100k_identifiers_of_each_version_without_collision() {
        use std::collections::HashSet;
        for samples in [&SAMPLES_V7, &SAMPLES_V4] {
            let n_unique = samples.with(|samples| samples.iter().collect::<HashSet<_>>().len());
            assert_eq!(n_unique, N_SAMPLES);
        }
    }

    /// Generates UUIDv7 strings sortable by creation time
    #[test]
    fn generates_uuidv7_strings_sortable_by_creation_time() {
        SAMPLES_V7.with(|samples| assert!(samples.windows(2).all(|w| w[0] < w[1])));

        let mut prev = Uuid::nil().to_string();
        for _ in 0..=0xfff {
            let curr = Uuid::generate_unix_time_based().to_string();
            assert!(curr > prev);
            prev = curr;
        }
    }

    /// Encodes up-to-date timestamp in UUIDv7
    #[test]
    fn encodes_up_to_date_timestamp_in_uuidv7() {
        use std::time;
        for _ in 0..10_000 {
            let ts_now = time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards")
                .as_millis() as i64;
            let timestamp = uuid7().unix_ts_ms().unwrap() as i64;
            // counter overflows under load may put the timestamp ahead of the clock
            assert!((ts_now - timestamp).abs() < 1_000);
        }
    }

    /// Sets constant bits and random bits of UUIDv7 properly
    #[test]
    fn sets_constant_bits_and_random_bits_of_uuidv7_properly() {
        let bins = SAMPLES_V7.with(|samples| count_set_bits(samples));
        let n = N_SAMPLES as u32;
        assert_eq!(bins[48..52], [0, n, n, n], "version bits");
        assert_eq!(bins[64..66], [n, 0], "variant bits");
        assert_random_bits(&bins, 66..128);
    }

    /// Sets constant bits and random bits of UUIDv4 properly
    #[test]
    fn sets_constant_bits_and_random_bits_of_uuidv4_properly() {
        let bins = SAMPLES_V4.with(|samples| count_set_bits(samples));
        let n = N_SAMPLES as u32;
        assert_eq!(bins[48..52], [0, n, 0, 0], "version bits");
        assert_eq!(bins[64..66], [n, 0], "variant bits");
        assert_random_bits(&bins, (0..48).chain(52..64).chain(66..128));
    }

    /// Reports variant, version, and timestamp of generated UUIDs
    #[test]
    fn reports_variant_version_and_timestamp_of_generated_uuids() {
        for _ in 0..1_000 {
            let e = uuid7();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(7));
            assert!(e.unix_ts_ms().is_some());

            let e = Uuid::generate_random();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(4));
            assert_eq!(e.unix_ts_ms(), None);
        }
    }

    /// Shares no timestamp and counter pair across threads
    #[test]
    fn shares_no_timestamp_and_counter_pair_across_threads() {
        use std::{collections::HashSet, thread};

        let handles: Vec<_> = (0..4)
            .map(|_| thread::spawn(|| (0..10_000).map(|_| uuid7()).collect::<Vec<_>>()))
            .collect();

        let mut s = HashSet::new();
        for handle in handles {
            for e in handle.join().unwrap() {
                // bytes 0..8 hold unix_ts_ms, version, and counter
                s.insert(u128::from(e) >> 64);
            }
        }
        assert_eq!(s.len(), 4 * 10_000);
    }
}
