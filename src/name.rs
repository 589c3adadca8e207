//! Name-based UUIDs (version 3 and version 5) and the predefined namespaces.

use md5::Md5;
use sha1::{Digest, Sha1};

use crate::{Error, Uuid, UuidArg};

impl Uuid {
    /// Namespace for fully-qualified domain names (6ba7b810-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_DNS: Self = Self::from_bytes([
        0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Namespace for URLs (6ba7b811-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_URL: Self = Self::from_bytes([
        0x6b, 0xa7, 0xb8, 0x11, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Namespace for ISO object identifiers (6ba7b812-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_OID: Self = Self::from_bytes([
        0x6b, 0xa7, 0xb8, 0x12, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Namespace for X.500 distinguished names (6ba7b814-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_X500: Self = Self::from_bytes([
        0x6b, 0xa7, 0xb8, 0x14, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Creates a name-based UUID from a namespace and a name.
    ///
    /// `namespace` is either a [`Uuid`] or a string representation of one. The same arguments
    /// always produce the same UUID.
    ///
    /// # Errors
    ///
    /// Returns a range error if `namespace` is a string that does not represent a UUID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::{NameVersion, Uuid};
    ///
    /// let x = Uuid::from_name(Uuid::NAMESPACE_URL, "string", NameVersion::Sha1)?;
    /// assert_eq!(x.to_string(), "64be9091-88e8-5476-996b-8b541f7bf3e5");
    ///
    /// let ns = "6ba7b811-9dad-11d1-80b4-00c04fd430c8";
    /// let y = Uuid::from_name(ns, "string", NameVersion::try_from(3u8)?)?;
    /// assert_eq!(y.to_string(), "724533da-66b6-35a1-ad9e-20205be920e9");
    /// # Ok::<(), rfc_uuid::Error>(())
    /// ```
    pub fn from_name<'a>(
        namespace: impl Into<UuidArg<'a>>,
        name: &str,
        version: NameVersion,
    ) -> Result<Self, Error> {
        let namespace = namespace.into().resolve("namespace")?;
        let mut bytes = match version {
            NameVersion::Md5 => hash_name::<Md5>(&namespace, name),
            NameVersion::Sha1 => hash_name::<Sha1>(&namespace, name),
        };
        bytes[6] = ((version as u8) << 4) | (bytes[6] & 0x0f);
        bytes[8] = 0x80 | (bytes[8] & 0x3f);
        Ok(Self::from_bytes(bytes))
    }
}

/// Hash algorithm, and thus UUID version, of a name-based UUID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[repr(u8)]
pub enum NameVersion {
    /// Version 3, based on MD5.
    Md5 = 3,
    /// Version 5, based on SHA-1.
    #[default]
    Sha1 = 5,
}

impl TryFrom<u8> for NameVersion {
    type Error = Error;

    /// Accepts only `3` and `5`; any other number is a type error.
    fn try_from(src: u8) -> Result<Self, Self::Error> {
        match src {
            3 => Ok(Self::Md5),
            5 => Ok(Self::Sha1),
            _ => Err(Error::InvalidType { param: "version" }),
        }
    }
}

impl From<NameVersion> for u8 {
    fn from(src: NameVersion) -> Self {
        src as u8
    }
}

/// Returns the first 16 bytes of the digest of `namespace ++ name`.
fn hash_name<D: Digest>(namespace: &Uuid, name: &str) -> [u8; 16] {
    let digest = D::new()
        .chain_update(namespace.as_bytes())
        .chain_update(name.as_bytes())
        .finalize();
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    bytes
}

/// Generates a UUIDv5 object from a namespace and a name.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc_uuid::uuid5(rfc_uuid::Uuid::NAMESPACE_DNS, "python.org")?;
/// assert_eq!(uuid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
/// # Ok::<(), rfc_uuid::Error>(())
/// ```
pub fn uuid5<'a>(namespace: impl Into<UuidArg<'a>>, name: &str) -> Result<Uuid, Error> {
    Uuid::from_name(namespace, name, NameVersion::Sha1)
}

/// Generates a UUIDv3 object from a namespace and a name.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc_uuid::uuid3(rfc_uuid::Uuid::NAMESPACE_DNS, "python.org")?;
/// assert_eq!(uuid.to_string(), "6fa459ea-ee8a-3ca4-894e-db77e160355e");
/// # Ok::<(), rfc_uuid::Error>(())
/// ```
pub fn uuid3<'a>(namespace: impl Into<UuidArg<'a>>, name: &str) -> Result<Uuid, Error> {
    Uuid::from_name(namespace, name, NameVersion::Md5)
}

#[cfg(test)]
mod tests {
    use super::{uuid3, uuid5, NameVersion};
    use crate::{ErrorKind, Uuid, Variant};

    /// Returns predefined namespaces
    #[test]
    fn returns_predefined_namespaces() {
        let cases = [
            (Uuid::NAMESPACE_DNS, "6ba7b810-9dad-11d1-80b4-00c04fd430c8"),
            (Uuid::NAMESPACE_URL, "6ba7b811-9dad-11d1-80b4-00c04fd430c8"),
            (Uuid::NAMESPACE_OID, "6ba7b812-9dad-11d1-80b4-00c04fd430c8"),
            (Uuid::NAMESPACE_X500, "6ba7b814-9dad-11d1-80b4-00c04fd430c8"),
        ];

        for (ns, text) in cases {
            assert_eq!(ns.to_string(), text);
            assert_eq!(ns.version(), Some(1));
        }
    }

    /// Generates prepared version 5 cases
    #[test]
    fn generates_prepared_version_5_cases() {
        let cases = [
            ("string", "64be9091-88e8-5476-996b-8b541f7bf3e5"),
            ("あ", "fb641640-27a6-5bda-9a60-110bdf397598"),
            (
                "https://example.com/sample/123",
                "7fdb2afb-a771-50eb-a0ae-7f02b933a569",
            ),
        ];

        for (name, text) in cases {
            let e = Uuid::from_name(Uuid::NAMESPACE_URL, name, NameVersion::default()).unwrap();
            assert_eq!(e.to_string(), text);
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(5));
            assert_eq!(e.unix_ts_ms(), None);
            assert_eq!(uuid5(Uuid::NAMESPACE_URL, name), Ok(e));
        }
    }

    /// Generates prepared version 3 cases
    #[test]
    fn generates_prepared_version_3_cases() {
        let cases = [
            ("string", "724533da-66b6-35a1-ad9e-20205be920e9"),
            ("あ", "72bfcf35-4daf-306d-a757-b3a2ebac5e95"),
            (
                "https://example.com/sample/123",
                "b131a200-1fa6-313e-b5d2-6b7a9b00570c",
            ),
        ];

        for (name, text) in cases {
            let e = Uuid::from_name(Uuid::NAMESPACE_URL, name, NameVersion::Md5).unwrap();
            assert_eq!(e.to_string(), text);
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(3));
            assert_eq!(uuid3(Uuid::NAMESPACE_URL, name), Ok(e));
        }
    }

    /// Accepts namespace in string representation
    #[test]
    fn accepts_namespace_in_string_representation() {
        let expected = "64be9091-88e8-5476-996b-8b541f7bf3e5";
        for ns in [
            "6ba7b811-9dad-11d1-80b4-00c04fd430c8",
            "urn:uuid:6BA7B811-9DAD-11D1-80B4-00C04FD430C8",
            "6ba7b8119dad11d180b400c04fd430c8",
        ] {
            assert_eq!(uuid5(ns, "string").unwrap().to_string(), expected);
        }

        let ns = String::from("6ba7b811-9dad-11d1-80b4-00c04fd430c8");
        assert_eq!(uuid5(&ns, "string").unwrap().to_string(), expected);
        assert_eq!(uuid5(&Uuid::NAMESPACE_URL, "string").unwrap().to_string(), expected);
    }

    /// Returns range error to invalid namespace string
    #[test]
    fn returns_range_error_to_invalid_namespace_string() {
        let err = uuid5("6ba7b811-9dad-11d1-80b4-00c04fd430cg", "string").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.param(), "namespace");
    }

    /// Returns type error to unsupported version number
    #[test]
    fn returns_type_error_to_unsupported_version_number() {
        assert_eq!(NameVersion::try_from(3u8), Ok(NameVersion::Md5));
        assert_eq!(NameVersion::try_from(5u8), Ok(NameVersion::Sha1));
        for v in [0u8, 1, 2, 4, 6, 7, 8, 255] {
            let err = NameVersion::try_from(v).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Type);
            assert_eq!(err.param(), "version");
        }
        assert_eq!(u8::from(NameVersion::default()), 5);
    }

    /// Generates identical UUIDs from identical inputs
    #[test]
    fn generates_identical_uuids_from_identical_inputs() {
        for version in [NameVersion::Md5, NameVersion::Sha1] {
            let a = Uuid::from_name(Uuid::NAMESPACE_DNS, "rust-lang.org", version).unwrap();
            let b = Uuid::from_name(Uuid::NAMESPACE_DNS, "rust-lang.org", version).unwrap();
            let c = Uuid::from_name(Uuid::NAMESPACE_OID, "rust-lang.org", version).unwrap();
            assert_eq!(a, b);
            assert_ne!(a, c);
        }
    }
}
