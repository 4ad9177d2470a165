use vesta_types::{Address, PubKey, ADDRESS_LEN};

#[test]
fn test_address_display_is_lowercase_hex() {
    let addr = Address::new([0xAB; ADDRESS_LEN]);
    assert_eq!(addr.to_string(), "ab".repeat(ADDRESS_LEN));
}

#[test]
fn test_derive_address_is_deterministic() {
    let key = PubKey::new(vec![7u8; 33]);
    assert_eq!(key.derive_address(), key.derive_address());
    assert_eq!(key.derive_address().as_bytes().len(), ADDRESS_LEN);
}

#[test]
fn test_distinct_keys_derive_distinct_addresses() {
    let a = PubKey::new(vec![1u8; 33]);
    let b = PubKey::new(vec![2u8; 33]);
    assert_ne!(a.derive_address(), b.derive_address());
}

#[test]
fn test_matches_address() {
    let key = PubKey::new(vec![9u8; 33]);
    let addr = key.derive_address();
    assert!(key.matches_address(&addr));

    let other = PubKey::new(vec![10u8; 33]);
    assert!(!other.matches_address(&addr));
}

#[test]
fn test_address_serde_round_trip() {
    let addr = Address::new([0x42; ADDRESS_LEN]);
    let json = serde_json::to_string(&addr).expect("serialize address");
    assert_eq!(json, format!("\"{}\"", "42".repeat(ADDRESS_LEN)));

    let back: Address = serde_json::from_str(&json).expect("deserialize address");
    assert_eq!(back, addr);
}

#[test]
fn test_pubkey_serde_round_trip() {
    let key = PubKey::new(vec![0x01, 0x02, 0xff]);
    let json = serde_json::to_string(&key).expect("serialize pubkey");
    assert_eq!(json, "\"0102ff\"");

    let back: PubKey = serde_json::from_str(&json).expect("deserialize pubkey");
    assert_eq!(back, key);
}
