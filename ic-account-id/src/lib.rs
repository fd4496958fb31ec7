//! Types for turning Internet Computer principals into ledger account identifiers.
//!
//! A [`Principal`] is parsed from its checksummed base32 text form, and an
//! [`AccountIdentifier`] is derived from a principal and a [`Subaccount`]:
//!
//! ```
//! use ic_account_id::{AccountIdentifier, Principal, Subaccount};
//!
//! let owner = Principal::from_text("2vxsx-fae").unwrap();
//! let account = AccountIdentifier::new(&owner, &Subaccount::default());
//! assert_eq!(
//!     account.to_hex(),
//!     "1c7a48ba6a562aa9eaa2481a9049cdf0433b9738c992d698c31d8abf89cadc79",
//! );
//! ```
//!
//! If you need support for the serde library, you will need to use the `serde` feature
//! (available by default).

#![warn(missing_docs, missing_debug_implementations)]
#![deny(elided_lifetimes_in_paths)]

/// Account identifier related types.
pub mod account_identifier;
/// Principal related types and traits.
pub mod principal;

pub use account_identifier::{AccountIdentifier, AccountIdentifierError, Subaccount};
pub use principal::{Principal, PrincipalClass, PrincipalError};

/// Computes the CRC32 of `bytes` in the big-endian layout used by both principals and account
/// identifiers.
pub(crate) fn crc32_be(bytes: &[u8]) -> [u8; 4] {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(bytes);
    hasher.finalize().to_be_bytes()
}
