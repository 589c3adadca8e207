//! RFC 4122 Universally Unique IDentifiers
//!
//! ```rust
//! use rfc_uuid::{uuid4, uuid5, uuid7, Uuid};
//!
//! let uuid = uuid7();
//! println!("{}", uuid); // e.g. "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let uuid = uuid4();
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//!
//! let uuid = uuid5(Uuid::NAMESPACE_DNS, "python.org")?;
//! assert_eq!(uuid, "886313e1-3b8a-5372-9b90-0c9aee199e5d");
//! # Ok::<(), rfc_uuid::Error>(())
//! ```
//!
//! See [RFC 4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Supported versions
//!
//! - The Nil UUID ([`Uuid::nil`]) and the Max UUID ([`Uuid::MAX`]).
//! - Name-based UUIDs: version 3 (MD5) and version 5 (SHA-1) ([`Uuid::from_name`], [`uuid3`],
//!   [`uuid5`]).
//! - Random UUIDs: version 4 ([`uuid4`], [`Uuid::generate_random`]).
//! - Unix-time-ordered UUIDs: version 7 ([`uuid7`], [`Uuid::generate_unix_time_based`]).
//!
//! # UUIDv7 field and bit layout
//!
//! This implementation produces UUIDv7 values with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        counter        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                          rand                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in milliseconds.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 12-bit `counter` field is reset to zero whenever the `unix_ts_ms` moves forward and
//!   incremented by one for each new UUID generated within the same timestamp.
//! - The 2-bit `var` field is set at `10`.
//! - The remaining 62 `rand` bits are filled with a cryptographically strong random number.
//!
//! When the `counter` reaches its maximum value within the same timestamp, this library increments
//! the `unix_ts_ms`; therefore, the `unix_ts_ms` may have a larger value than that of the
//! real-time clock. If the system clock moves back more than ten seconds, this library resets the
//! generator state and thus breaks the monotonic order of generated UUIDs.
//!
//! # Crate features
//!
//! Default features:
//!
//! - `global_gen`: Enables the primary [`uuid7()`] and [`uuid4()`] functions that use a
//!   process-wide global generator seeded by the operating system.
//!
//! Optional features:
//!
//! - `serde`: Enables the serialization and deserialization of [`Uuid`] objects.
//! - `uuid`: Enables the conversion between [`Uuid`] and the `uuid` crate's `Uuid`.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod hex;
mod id;
mod name;

pub use error::{Error, ErrorKind};
pub use id::{FormatOptions, Uuid, UuidArg, Variant};
pub use name::{uuid3, uuid5, NameVersion};

pub mod counter;
pub mod generator;
pub mod time;

pub use counter::UuidCounter;
pub use generator::{RandSource, V7Generator};
pub use time::{StdSystemTime, TimeSource};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{uuid4, uuid7};
