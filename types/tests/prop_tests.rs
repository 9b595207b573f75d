use proptest::prelude::*;

use agora_types::{truncate_display, AccountId, Timestamp, TokenAmount};

proptest! {
    /// Any 20-byte id parses, and its short form keeps the first 6 and last 4 chars.
    #[test]
    fn account_short_form(bytes in prop::array::uniform20(0u8..)) {
        let raw = format!("0x{}", hex::encode(bytes));
        let id = AccountId::parse(&raw).unwrap();
        let short = id.short();
        prop_assert_eq!(short.len(), 13);
        prop_assert_eq!(&short[..6], &raw[..6]);
        prop_assert_eq!(&short[9..], &raw[raw.len() - 4..]);
    }

    /// Parsing is case-insensitive.
    #[test]
    fn account_parse_case_insensitive(bytes in prop::array::uniform20(0u8..)) {
        let lower = format!("0x{}", hex::encode(bytes));
        let upper = format!("0x{}", hex::encode_upper(bytes));
        prop_assert_eq!(AccountId::parse(&lower).unwrap(), AccountId::parse(&upper).unwrap());
    }

    /// Truncation never lengthens a string.
    #[test]
    fn truncate_never_grows(s in ".{0,64}") {
        prop_assert!(truncate_display(&s).chars().count() <= s.chars().count());
    }

    /// remaining_from is the saturating difference, None once passed.
    #[test]
    fn timestamp_remaining(end in 0u64..1_000_000, now in 0u64..1_000_000) {
        let remaining = Timestamp::new(end).remaining_from(Timestamp::new(now));
        if now >= end {
            prop_assert_eq!(remaining, None);
        } else {
            prop_assert_eq!(remaining, Some(end - now));
        }
    }

    /// format_units keeps the integer part exact.
    #[test]
    fn format_units_integer_part(raw in 0u128..u128::MAX, decimals in 0u8..40) {
        let formatted = TokenAmount::new(raw, decimals).format_units();
        let int_part = formatted.split('.').next().unwrap().to_string();
        let expected = match 10u128.checked_pow(decimals as u32) {
            Some(scale) => (raw / scale).to_string(),
            None => "0".to_string(),
        };
        prop_assert_eq!(int_part, expected);
    }

    /// format_fixed always yields exactly the requested fractional digits.
    #[test]
    fn format_fixed_width(raw in 0u128..u128::MAX / 10, decimals in 0u8..30, places in 1u8..6) {
        let formatted = TokenAmount::new(raw, decimals).format_fixed(places);
        let frac = formatted.split('.').nth(1).unwrap();
        prop_assert_eq!(frac.len(), places as usize);
    }
}
