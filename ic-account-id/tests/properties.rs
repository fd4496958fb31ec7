use ic_account_id::{AccountIdentifier, Principal, PrincipalError, Subaccount};
use proptest::collection;
use proptest::prelude::*;

/// Textual form of `payload` with the checksum prepended, optionally corrupting one bit of the
/// checksummed bytes before encoding.
fn encode_text(payload: &[u8], flip_bit: Option<usize>) -> String {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(payload);
    let mut bytes = hasher.finalize().to_be_bytes().to_vec();
    bytes.extend_from_slice(payload);

    if let Some(bit) = flip_bit {
        let bit = bit % (bytes.len() * 8);
        bytes[bit / 8] ^= 1 << (bit % 8);
    }

    base32::encode(base32::Alphabet::Rfc4648 { padding: false }, &bytes).to_ascii_lowercase()
}

fn crc32(bytes: &[u8]) -> [u8; 4] {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(bytes);
    hasher.finalize().to_be_bytes()
}

#[test]
fn unformatted_text_is_accepted() {
    let text = encode_text(&[0xef, 0xcd, 0xab, 0, 0, 0, 0, 0, 1], None);
    assert_eq!(text, "2chl64hpzwvqaaaaaaaac");
    assert_eq!(
        Principal::from_text(&text).unwrap().to_text(),
        "2chl6-4hpzw-vqaaa-aaaaa-c"
    );
}

proptest! {
    #[test]
    fn decode_inverts_encode(payload in collection::vec(any::<u8>(), 0..64)) {
        let text = encode_text(&payload, None);
        let principal = Principal::from_text(&text).unwrap();
        prop_assert_eq!(principal.as_slice(), payload.as_slice());
        prop_assert_eq!(Principal::from_text(principal.to_text()).unwrap(), principal);
    }

    #[test]
    fn single_bit_flip_fails_checksum(
        payload in collection::vec(any::<u8>(), 0..64),
        bit in any::<usize>(),
    ) {
        let text = encode_text(&payload, Some(bit));
        let result = Principal::from_text(&text);
        prop_assert!(
            matches!(result, Err(PrincipalError::ChecksumMismatch { .. })),
            "unexpected result {:?}",
            result
        );
    }

    #[test]
    fn inner_padding_is_not_base32(
        payload in collection::vec(any::<u8>(), 0..64),
        position in any::<prop::sample::Index>(),
    ) {
        // Inserting before an existing character keeps data after the `=`.
        let mut text = Principal::from(payload).to_text();
        text.insert(position.index(text.len()), '=');
        prop_assert_eq!(
            Principal::from_text(&text),
            Err(PrincipalError::InvalidTextualFormatNotBase32())
        );
    }

    #[test]
    fn derivation_is_deterministic(
        owner in collection::vec(any::<u8>(), 0..30),
        subaccount in any::<[u8; 32]>(),
    ) {
        let owner = Principal::from(owner);
        let subaccount = Subaccount(subaccount);
        prop_assert_eq!(
            AccountIdentifier::new(&owner, &subaccount),
            AccountIdentifier::new(&owner, &subaccount)
        );
    }

    #[test]
    fn checksum_prefix_matches_hash(owner in collection::vec(any::<u8>(), 0..30)) {
        let account = AccountIdentifier::new(&Principal::from(owner), &Subaccount::default());
        let bytes = account.as_bytes();
        prop_assert_eq!(&bytes[..4], &crc32(&bytes[4..])[..]);
        prop_assert_eq!(AccountIdentifier::from_hex(&account.to_hex()).unwrap(), account);
    }

    #[test]
    fn rendered_lengths(owner in collection::vec(any::<u8>(), 0..30)) {
        let account = AccountIdentifier::new(&Principal::from(owner), &Subaccount::default());
        let hex = account.to_hex();
        prop_assert_eq!(hex.len(), 64);
        prop_assert_eq!(hex.to_lowercase(), hex.clone());
        let escaped = account.to_escaped();
        prop_assert_eq!(escaped.len(), 96);
        prop_assert_eq!(escaped.replace('\\', ""), hex);
    }
}
