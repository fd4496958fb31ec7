use crate::{crc32_be, Principal};
use sha2::{Digest, Sha224};
use std::fmt::Write;
use thiserror::Error;

/// Domain separator prepended to every account identifier preimage: its length byte, then the
/// ASCII text `account-id`.
pub const ACCOUNT_DOMAIN_SEPARATOR: &[u8] = b"\x0Aaccount-id";

const CHECKSUM_LEN: usize = 4;
const HASH_LEN: usize = 28;

/// Errors from reading an [`AccountIdentifier`] back from its hex form.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum AccountIdentifierError {
    /// The string was not in a valid hexadecimal format.
    #[error("Error while decoding hex: {0}")]
    FromHexError(hex::FromHexError),

    /// The decoded bytes were not exactly 32 bytes long.
    #[error("Invalid account identifier length: expected 32 bytes, got {0}")]
    InvalidLength(usize),

    /// The checksum does not match the hash it prefixes.
    #[error("Invalid checksum: expected {expected}, found {found}")]
    InvalidChecksum {
        /// Hex of the CRC32 computed over the hash.
        expected: String,
        /// Hex of the checksum carried by the identifier.
        found: String,
    },
}

/// Distinguishes several accounts owned by the same principal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subaccount(pub [u8; 32]);

impl From<[u8; 32]> for Subaccount {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Subaccount {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A ledger account address: a 4-byte big-endian CRC32 followed by the 28-byte SHA-224 hash it
/// covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountIdentifier([u8; 32]);

impl AccountIdentifier {
    /// Derives the account of `owner` at `subaccount`.
    ///
    /// The hash is `SHA-224(0x0A || "account-id" || owner || subaccount)`, and the checksum is
    /// computed over that hash.
    pub fn new(owner: &Principal, subaccount: &Subaccount) -> Self {
        let mut hasher = Sha224::new();
        hasher.update(ACCOUNT_DOMAIN_SEPARATOR);
        hasher.update(owner.as_slice());
        hasher.update(subaccount.as_ref());
        let hash = hasher.finalize();

        let mut bytes = [0; CHECKSUM_LEN + HASH_LEN];
        bytes[..CHECKSUM_LEN].copy_from_slice(&crc32_be(&hash));
        bytes[CHECKSUM_LEN..].copy_from_slice(&hash);
        Self(bytes)
    }

    /// Reads an identifier from its 64-character hex form, checking the length and checksum.
    pub fn from_hex(hex_str: &str) -> Result<Self, AccountIdentifierError> {
        let bytes = hex::decode(hex_str).map_err(AccountIdentifierError::FromHexError)?;
        Self::try_from(bytes.as_slice())
    }

    /// The 4-byte checksum prefix.
    pub fn checksum(&self) -> [u8; 4] {
        let mut checksum = [0; CHECKSUM_LEN];
        checksum.copy_from_slice(&self.0[..CHECKSUM_LEN]);
        checksum
    }

    /// The 28-byte SHA-224 hash.
    pub fn hash(&self) -> &[u8] {
        &self.0[CHECKSUM_LEN..]
    }

    /// The full 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Contiguous lowercase hex, 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Every byte rendered as `\` followed by two lowercase hex digits, 96 characters.
    pub fn to_escaped(&self) -> String {
        let mut s = String::with_capacity(self.0.len() * 3);
        for byte in self.0 {
            // Writing to a String cannot fail.
            let _ = write!(s, "\\{:02x}", byte);
        }
        s
    }
}

impl TryFrom<&[u8]> for AccountIdentifier {
    type Error = AccountIdentifierError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| AccountIdentifierError::InvalidLength(bytes.len()))?;
        let expected = crc32_be(&bytes[CHECKSUM_LEN..]);
        let found = &bytes[..CHECKSUM_LEN];
        if found != expected.as_slice() {
            return Err(AccountIdentifierError::InvalidChecksum {
                expected: hex::encode(expected),
                found: hex::encode(found),
            });
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for AccountIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for AccountIdentifier {
    type Err = AccountIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for AccountIdentifier {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AccountIdentifier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

#[cfg(feature = "serde")]
struct AccountIdentifierVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for AccountIdentifierVisitor {
    type Value = AccountIdentifier;

    fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("32 bytes of checksummed account identifier")
    }

    fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        AccountIdentifier::try_from(value).map_err(E::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AccountIdentifier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_bytes(AccountIdentifierVisitor)
    }
}
