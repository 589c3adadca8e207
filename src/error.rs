//! Error type shared by the fallible constructors.

/// Error returned when an argument cannot be turned into a UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum Error {
    /// The argument is of a kind the operation does not accept, e.g. a name-based version other
    /// than 3 or 5.
    #[error("invalid type for `{param}`")]
    InvalidType {
        /// Name of the offending parameter.
        param: &'static str,
    },

    /// The argument is a string that does not represent a UUID.
    #[error("invalid string representation for `{param}`")]
    InvalidString {
        /// Name of the offending parameter.
        param: &'static str,
    },

    /// The argument is a byte sequence whose length is not 16.
    #[error("invalid length for `{param}`: expected 16 bytes, found {found}")]
    InvalidLength {
        /// Name of the offending parameter.
        param: &'static str,
        /// Length of the byte sequence passed.
        found: usize,
    },
}

/// Coarse classification of [`Error`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// The argument is of the wrong type.
    Type,
    /// The argument is of the right type but its value is out of the accepted range.
    Range,
}

impl Error {
    /// Returns the kind of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidType { .. } => ErrorKind::Type,
            Self::InvalidString { .. } | Self::InvalidLength { .. } => ErrorKind::Range,
        }
    }

    /// Returns the name of the parameter that caused this error.
    pub const fn param(&self) -> &'static str {
        match self {
            Self::InvalidType { param }
            | Self::InvalidString { param }
            | Self::InvalidLength { param, .. } => param,
        }
    }
}
