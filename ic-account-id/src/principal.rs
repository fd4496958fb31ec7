use crate::crc32_be;
use std::convert::TryFrom;
use thiserror::Error;

/// Length of the CRC32 prefix carried by the textual form of a principal.
const CHECKSUM_LEN: usize = 4;

/// Errors from parsing the textual form of a [`Principal`].
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum PrincipalError {
    /// The text contains characters outside the base32 alphabet.
    #[error("Text must be a base 32 string.")]
    InvalidTextualFormatNotBase32(),

    /// The text ends in a base32 quantum that no byte sequence encodes to.
    #[error("Text has an invalid base 32 length: {0} trailing characters cannot be decoded.")]
    InvalidTextLength(usize),

    /// The text ends in a run of padding longer than a base32 quantum allows.
    #[error("Text has invalid base 32 padding: {0} padding characters.")]
    InvalidPadding(usize),

    /// The checksum carried by the text does not match its payload.
    ///
    /// Text decoding to fewer than 4 bytes carries a truncated checksum and fails here too.
    #[error("invalid checksum for principal")]
    ChecksumMismatch {
        /// CRC32 of the decoded payload.
        expected: [u8; 4],
        /// Checksum found at the start of the decoded text.
        found: Vec<u8>,
    },
}

/// The class of a principal, as encoded in the last byte of its blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PrincipalClass {
    /// A class byte with no assigned meaning.
    Unassigned = 0,
    /// An ID allocated by the system, such as a canister ID.
    OpaqueId = 1,
    /// Defined as H(public_key) || 0x02.
    SelfAuthenticating = 2,
    /// A principal derived by another principal.
    DerivedId = 3,
    /// The anonymous principal.
    Anonymous = 4,
}

impl From<u8> for PrincipalClass {
    fn from(byte: u8) -> Self {
        match byte {
            1 => PrincipalClass::OpaqueId,
            2 => PrincipalClass::SelfAuthenticating,
            3 => PrincipalClass::DerivedId,
            4 => PrincipalClass::Anonymous,
            _ => PrincipalClass::Unassigned,
        }
    }
}

/// The raw bytes of a principal, without the checksum of its text form.
///
/// No length or class is enforced on the blob: whatever remains after the checksum of a valid
/// textual principal is accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Principal(Vec<u8>);

impl Principal {
    /// The management canister, `aaaaa-aa`, whose blob is empty.
    pub fn management_canister() -> Self {
        Self(Vec::new())
    }

    /// The anonymous principal, `2vxsx-fae`.
    pub fn anonymous() -> Self {
        Self(vec![PrincipalClass::Anonymous as u8])
    }

    /// Wraps a blob as a principal.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// Parse the text format of a principal (e.g., `jkies-sibbb-ap6`).
    ///
    /// Parsing is liberal: dashes may appear anywhere and case is ignored. The text is padded to
    /// a whole number of base32 quanta, decoded, and the leading 4-byte big-endian CRC32 is
    /// checked against the rest of the bytes, which become the principal.
    pub fn from_text<S: AsRef<str>>(text: S) -> Result<Self, PrincipalError> {
        let mut s = text.as_ref().to_string();
        s.retain(|c| c != '-');
        s.make_ascii_uppercase();

        // `=` is only allowed as the trailing padding run.
        let data_len = s.trim_end_matches('=').len();
        if s[..data_len].contains('=') {
            return Err(PrincipalError::InvalidTextualFormatNotBase32());
        }

        // A final quantum of 1, 3 or 6 characters cannot come out of any byte sequence.
        let trailing = data_len % 8;
        if matches!(trailing, 1 | 3 | 6) {
            return Err(PrincipalError::InvalidTextLength(trailing));
        }
        let padding = (8 - s.len() % 8) % 8;
        s.extend(std::iter::repeat('=').take(padding));
        let padding_run = s.len() - data_len;
        if padding_run >= 8 {
            return Err(PrincipalError::InvalidPadding(padding_run));
        }

        let mut bytes = base32::decode(base32::Alphabet::Rfc4648 { padding: true }, &s)
            .ok_or(PrincipalError::InvalidTextualFormatNotBase32())?;
        let blob = bytes.split_off(bytes.len().min(CHECKSUM_LEN));

        let expected = crc32_be(&blob);
        if bytes != expected {
            return Err(PrincipalError::ChecksumMismatch {
                expected,
                found: bytes,
            });
        }
        Ok(Self(blob))
    }

    /// Renders the canonical text format, lowercase and grouped by five characters.
    pub fn to_text(&self) -> String {
        format!("{}", self)
    }

    /// The class of this principal, read from its last byte.
    ///
    /// The empty blob of the management canister reports [`PrincipalClass::Unassigned`].
    pub fn class(&self) -> PrincipalClass {
        self.0
            .last()
            .map_or(PrincipalClass::Unassigned, |byte| PrincipalClass::from(*byte))
    }

    /// The raw bytes of the principal.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let blob = self.as_slice();

        // combine blobs
        let mut bytes = Vec::with_capacity(CHECKSUM_LEN + blob.len());
        bytes.extend_from_slice(&crc32_be(blob));
        bytes.extend_from_slice(blob);

        // base32
        let mut s = base32::encode(base32::Alphabet::Rfc4648 { padding: false }, &bytes);
        s.make_ascii_lowercase();

        // write out string with dashes
        while s.len() > 5 {
            let rest = s.split_off(5);
            write!(f, "{}-", s)?;
            s = rest;
        }
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Principal {
    type Err = PrincipalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Principal::from_text(s)
    }
}

impl From<Vec<u8>> for Principal {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Principal {
    fn from(bytes: &[u8]) -> Self {
        Self::from_slice(bytes)
    }
}

impl TryFrom<&str> for Principal {
    type Error = PrincipalError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::from_text(text)
    }
}

impl AsRef<[u8]> for Principal {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

// Serialization
#[cfg(feature = "serde")]
impl serde::Serialize for Principal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.as_slice())
    }
}

#[cfg(feature = "serde")]
mod deserialize {
    use super::Principal;

    /// Simple visitor for deserialization from bytes.
    pub(super) struct PrincipalVisitor;

    impl<'de> serde::de::Visitor<'de> for PrincipalVisitor {
        type Value = Principal;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a binary large object (bytes)")
        }

        fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Principal::from_slice(value))
        }

        fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Principal::from(value))
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Principal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Principal, D::Error> {
        deserializer.deserialize_bytes(deserialize::PrincipalVisitor)
    }
}
