use proptest::prelude::*;

use journal_types::{AccountAddress, IdeaId, Timestamp, TxHash};

proptest! {
    /// Canonical address text parses back to the same address.
    #[test]
    fn address_display_parse_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let addr = AccountAddress::new(bytes);
        let parsed: AccountAddress = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// Short-form addresses (leading zeros dropped) equal their padded form.
    #[test]
    fn short_address_matches_padded(value in 1u64..) {
        let short = format!("0x{value:x}");
        let padded = format!("0x{value:064x}");
        let a: AccountAddress = short.parse().unwrap();
        let b: AccountAddress = padded.parse().unwrap();
        prop_assert_eq!(a, b);
    }

    /// TxHash parsing refuses anything but 32 bytes.
    #[test]
    fn tx_hash_rejects_short_input(bytes in prop::collection::vec(any::<u8>(), 1..32)) {
        let text = format!("0x{}", hex::encode(&bytes));
        prop_assert!(text.parse::<TxHash>().is_err());
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// IdeaId ordering follows the numeric id.
    #[test]
    fn idea_id_ordering(a in 0u64.., b in 0u64..) {
        prop_assert_eq!(IdeaId::new(a) < IdeaId::new(b), a < b);
    }

    /// Any decimal u64 parses as an IdeaId.
    #[test]
    fn idea_id_parses_any_u64(value in 0u64..) {
        prop_assert_eq!(value.to_string().parse::<IdeaId>().unwrap(), IdeaId::new(value));
    }
}
