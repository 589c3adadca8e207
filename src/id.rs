use std::{fmt, str};

use crate::{hex, Error};

/// Represents a Universally Unique IDentifier.
///
/// A `Uuid` is an immutable 16-byte value laid out as follows:
///
/// | Field                    | Bytes   |
/// | ------------------------ | ------- |
/// | `time_low`               | 0..4    |
/// | `time_mid`               | 4..6    |
/// | `time_high_and_version`  | 6..8    |
/// | `clock_seq_and_reserved` | 8       |
/// | `clock_seq_low`          | 9       |
/// | `node`                   | 10..16  |
///
/// The derived ordering compares the bytes lexicographically, which agrees with the ordering of
/// the canonical string representations.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

/// Variant of a UUID, i.e. the layout family encoded in the top bits of byte 8.
///
/// The discriminants are the conventional variant codes: `0`, `2`, `6`, and `7`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(u8)]
pub enum Variant {
    /// `0xx`: reserved for NCS backward compatibility (includes the Nil UUID).
    Var0 = 0,
    /// `10x`: the RFC 4122 layout, the only one with a meaningful version.
    Var10 = 2,
    /// `110`: reserved for Microsoft backward compatibility.
    Var110 = 6,
    /// `111`: reserved for future definition (includes the Max UUID).
    Var111 = 7,
}

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns the Nil UUID.
    pub const fn nil() -> Self {
        Self::NIL
    }

    /// Creates an object from a 16-byte big-endian array.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates an object from a byte slice, which must be exactly 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        <[u8; 16]>::try_from(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidLength {
                param: "bytes",
                found: bytes.len(),
            })
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns a copy of the underlying byte array.
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Creates a UUID byte array from UUIDv7 field values.
    ///
    /// # Panics
    ///
    /// Panics if any argument does not fit in its field.
    pub const fn from_fields_v7(unix_ts_ms: u64, rand_a: u16, rand_b: u64) -> Self {
        if unix_ts_ms >= 1 << 48 || rand_a >= 1 << 12 || rand_b >= 1 << 62 {
            panic!("invalid field value");
        }

        Self([
            (unix_ts_ms >> 40) as u8,
            (unix_ts_ms >> 32) as u8,
            (unix_ts_ms >> 24) as u8,
            (unix_ts_ms >> 16) as u8,
            (unix_ts_ms >> 8) as u8,
            unix_ts_ms as u8,
            0x70 | (rand_a >> 8) as u8,
            rand_a as u8,
            0x80 | (rand_b >> 56) as u8,
            (rand_b >> 48) as u8,
            (rand_b >> 40) as u8,
            (rand_b >> 32) as u8,
            (rand_b >> 24) as u8,
            (rand_b >> 16) as u8,
            (rand_b >> 8) as u8,
            rand_b as u8,
        ])
    }

    /// Creates an object from a string representation.
    ///
    /// Accepts, case-insensitively, the 8-4-4-4-12 hyphenated form or 32 contiguous hexadecimal
    /// digits, either optionally prefixed with `urn:uuid:`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::Uuid;
    ///
    /// let x = Uuid::from_string("URN:UUID:5EB893BA-EC79-4F55-958D-66731227B662")?;
    /// assert_eq!(x.to_string(), "5eb893ba-ec79-4f55-958d-66731227b662");
    /// # Ok::<(), rfc_uuid::Error>(())
    /// ```
    pub fn from_string(src: &str) -> Result<Self, Error> {
        parse(src)
            .map(Self)
            .ok_or(Error::InvalidString { param: "src" })
    }

    /// Returns the `time_low` field (bytes 0..4).
    pub fn time_low(&self) -> &[u8] {
        &self.0[0..4]
    }

    /// Returns the `time_mid` field (bytes 4..6).
    pub fn time_mid(&self) -> &[u8] {
        &self.0[4..6]
    }

    /// Returns the `time_high_and_version` field (bytes 6..8).
    pub fn time_high_and_version(&self) -> &[u8] {
        &self.0[6..8]
    }

    /// Returns the `clock_seq_and_reserved` field (byte 8).
    pub fn clock_seq_and_reserved(&self) -> &[u8] {
        &self.0[8..9]
    }

    /// Returns the `clock_seq_low` field (byte 9).
    pub fn clock_seq_low(&self) -> &[u8] {
        &self.0[9..10]
    }

    /// Returns the `node` field (bytes 10..16).
    pub fn node(&self) -> &[u8] {
        &self.0[10..16]
    }

    /// Reports the variant field value of the UUID.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 5 {
            0b111 => Variant::Var111,
            0b110 => Variant::Var110,
            0b100 | 0b101 => Variant::Var10,
            _ => Variant::Var0,
        }
    }

    /// Returns the version field value of the UUID, or `None` if the UUID does not have the
    /// RFC 4122 variant or its version nibble is outside `1..=8`.
    pub const fn version(&self) -> Option<u8> {
        if !matches!(self.variant(), Variant::Var10) {
            return None;
        }
        match self.0[6] >> 4 {
            v @ 1..=8 => Some(v),
            _ => None,
        }
    }

    /// Returns the 48-bit Unix timestamp in milliseconds embedded in a UUIDv7, or `None` if the
    /// UUID is not a UUIDv7.
    pub fn unix_ts_ms(&self) -> Option<u64> {
        if self.version() != Some(7) {
            return None;
        }
        let mut buffer = [0u8; 8];
        buffer[2..].copy_from_slice(&self.0[..6]);
        Some(u64::from_be_bytes(buffer))
    }

    /// Returns the hexadecimal string representation customized by `options`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::{FormatOptions, Uuid};
    ///
    /// let x: Uuid = "4525970b-49cb-4d89-9987-54ba4263ac99".parse()?;
    /// let opts = FormatOptions::new().upper_case(true).no_hyphens(true);
    /// assert_eq!(x.format(&opts), "4525970B49CB4D89998754BA4263AC99");
    /// # Ok::<(), rfc_uuid::Error>(())
    /// ```
    pub fn format(&self, options: &FormatOptions) -> String {
        let groups: [&[&[u8]]; 5] = [
            &[self.time_low()],
            &[self.time_mid()],
            &[self.time_high_and_version()],
            &[self.clock_seq_and_reserved(), self.clock_seq_low()],
            &[self.node()],
        ];

        let mut buffer = String::with_capacity(36);
        for (i, group) in groups.iter().enumerate() {
            if i > 0 && !options.no_hyphens {
                buffer.push('-');
            }
            for field in group.iter() {
                hex::encode_into(&mut buffer, field, options.upper_case);
            }
        }
        buffer
    }

    /// Returns the URN string (`urn:uuid:` followed by the canonical form).
    pub fn urn(&self) -> String {
        format!("urn:uuid:{}", self)
    }

    /// Returns the URN of the UUID as a [`url::Url`].
    pub fn to_urn(&self) -> url::Url {
        url::Url::parse(&self.urn()).expect("rfc_uuid: URN of UUID must be a valid URL")
    }

    /// Determines whether this UUID is equal to the one represented by `other`.
    ///
    /// A string that does not represent a UUID is reported as not equal instead of an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::Uuid;
    ///
    /// assert!(Uuid::NIL.equals("urn:uuid:00000000-0000-0000-0000-000000000000"));
    /// assert!(Uuid::NIL.equals(Uuid::nil()));
    /// assert!(!Uuid::NIL.equals("0"));
    /// ```
    pub fn equals<'a>(&self, other: impl Into<UuidArg<'a>>) -> bool {
        match other.into().resolve("other") {
            Ok(other) => self.0 == other.0,
            Err(err) => {
                tracing::trace!(%err, "unparseable string compared as unequal");
                false
            }
        }
    }
}

/// Parses the accepted string representations into bytes.
fn parse(src: &str) -> Option<[u8; 16]> {
    const PREFIX: &str = "urn:uuid:";
    let src = match src.get(..PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(PREFIX) => &src[PREFIX.len()..],
        _ => src,
    };

    let src = src.as_bytes();
    match src.len() {
        32 => hex::decode(src),
        36 => {
            let mut digits = [0u8; 32];
            let mut dst = digits.iter_mut();
            for (i, e) in src.iter().enumerate() {
                if i == 8 || i == 13 || i == 18 || i == 23 {
                    if *e != b'-' {
                        return None;
                    }
                } else {
                    *dst.next()? = *e;
                }
            }
            hex::decode(&digits)
        }
        _ => None,
    }
}

/// Options for [`Uuid::format()`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FormatOptions {
    /// Whether to use uppercase hexadecimal digits. Defaults to `false`.
    pub upper_case: bool,

    /// Whether to join the fields without hyphens. Defaults to `false`.
    pub no_hyphens: bool,
}

impl FormatOptions {
    /// Creates the default options, producing the canonical lowercase hyphenated form.
    pub const fn new() -> Self {
        Self {
            upper_case: false,
            no_hyphens: false,
        }
    }

    /// Sets `upper_case`.
    pub fn upper_case(mut self, value: bool) -> Self {
        self.upper_case = value;
        self
    }

    /// Sets `no_hyphens`.
    pub fn no_hyphens(mut self, value: bool) -> Self {
        self.no_hyphens = value;
        self
    }
}

/// An argument that is either a UUID object or its string representation.
///
/// Operations taking `impl Into<UuidArg>` accept [`Uuid`], `&Uuid`, `&str`, and `&String`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UuidArg<'a> {
    /// A UUID object.
    Uuid(Uuid),
    /// A string expected to represent a UUID.
    Str(&'a str),
}

impl UuidArg<'_> {
    /// Converts the argument into a UUID, parsing it if it is a string.
    pub fn resolve(self, param: &'static str) -> Result<Uuid, Error> {
        match self {
            Self::Uuid(value) => Ok(value),
            Self::Str(src) => parse(src)
                .map(Uuid)
                .ok_or(Error::InvalidString { param }),
        }
    }
}

impl From<Uuid> for UuidArg<'_> {
    fn from(src: Uuid) -> Self {
        Self::Uuid(src)
    }
}

impl From<&Uuid> for UuidArg<'_> {
    fn from(src: &Uuid) -> Self {
        Self::Uuid(*src)
    }
}

impl<'a> From<&'a str> for UuidArg<'a> {
    fn from(src: &'a str) -> Self {
        Self::Str(src)
    }
}

impl<'a> From<&'a String> for UuidArg<'a> {
    fn from(src: &'a String) -> Self {
        Self::Str(src)
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&FormatOptions::new()))
    }
}

impl str::FromStr for Uuid {
    type Err = Error;

    /// Creates an object from a string representation accepted by [`Uuid::from_string()`].
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::from_string(src)
    }
}

impl PartialEq<str> for Uuid {
    fn eq(&self, other: &str) -> bool {
        self.equals(other)
    }
}

impl PartialEq<&str> for Uuid {
    fn eq(&self, other: &&str) -> bool {
        self.equals(*other)
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<&str> for Uuid {
    type Error = Error;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl TryFrom<String> for Uuid {
    type Error = Error;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.to_string())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl de::Visitor<'_> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Uuid::from_string(value).map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Uuid::from_slice(value).map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid;
        use serde_test::{assert_de_tokens, assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases: [(&str, &[u8]); 3] = [
                ("00000000-0000-0000-0000-000000000000", &[0u8; 16]),
                (
                    "6ba7b811-9dad-11d1-80b4-00c04fd430c8",
                    &[
                        0x6b, 0xa7, 0xb8, 0x11, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0,
                        0x4f, 0xd4, 0x30, 0xc8,
                    ],
                ),
                (
                    "64be9091-88e8-5476-996b-8b541f7bf3e5",
                    &[
                        0x64, 0xbe, 0x90, 0x91, 0x88, 0xe8, 0x54, 0x76, 0x99, 0x6b, 0x8b, 0x54,
                        0x1f, 0x7b, 0xf3, 0xe5,
                    ],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Uuid>().unwrap();
                assert_tokens(&e.readable(), &[Token::Str(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }

        /// Deserializes any accepted string representation
        #[test]
        fn deserializes_any_accepted_string_representation() {
            let e = "64be9091-88e8-5476-996b-8b541f7bf3e5".parse::<Uuid>().unwrap();
            assert_de_tokens(
                &e.readable(),
                &[Token::Str("URN:UUID:64BE909188E85476996B8B541F7BF3E5")],
            );
        }
    }
}
