//! Genesis account collection tests: validation, sanitation, and the
//! flattened record schema.

use vesta_ledger::{
    Account, AccountValidationError, BaseAccount, ContinuousVestingAccount, GenesisAccount,
    GenesisError, GenesisState, Period, PeriodicVestingAccount, VestingAccount,
};
use vesta_types::{Address, Coin, Coins, PubKey};

// ============================================================================
// Test helpers
// ============================================================================

fn coins(pairs: &[(&str, u128)]) -> Coins {
    Coins::new(pairs.iter().map(|(denom, amount)| Coin::new(*denom, *amount)))
}

fn test_address(idx: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = idx;
    Address::new(bytes)
}

fn base_record(idx: u8, held: Coins) -> GenesisAccount {
    let mut base = BaseAccount::with_address(test_address(idx));
    base.set_coins(held);
    GenesisAccount::new(&base)
}

// ============================================================================
// Sanitation
// ============================================================================

#[test]
fn test_sanitize_orders_accounts_and_denoms() {
    let mut first = base_record(1, Coins::default());
    first.coins = Coins::from_raw(vec![Coin::new("bcoin", 150), Coin::new("acoin", 150)]);
    first.account_number = 1;

    let mut second = base_record(2, coins(&[("acoin", 150), ("bcoin", 150)]));
    second.account_number = 0;

    let mut state = GenesisState::new(vec![first, second]);
    assert!(state.accounts[0].account_number > state.accounts[1].account_number);
    assert_eq!(state.accounts[0].coins.iter().next().unwrap().denom, "bcoin");
    assert_eq!(state.accounts[1].address, test_address(2));

    state.sanitize();

    assert!(state.accounts[0].account_number < state.accounts[1].account_number);
    assert_eq!(state.accounts[1].address, test_address(1));
    let denoms: Vec<&str> = state.accounts[1]
        .coins
        .iter()
        .map(|coin| coin.denom.as_str())
        .collect();
    assert_eq!(denoms, vec!["acoin", "bcoin"]);

    // no data lost
    assert_eq!(state.accounts[1].coins.amount_of("acoin"), 150);
    assert_eq!(state.accounts[1].coins.amount_of("bcoin"), 150);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_validate_accepts_well_formed_state() {
    let state = GenesisState::new(vec![
        base_record(1, coins(&[("stake", 150)])),
        base_record(2, coins(&[("stake", 150)])),
    ]);
    assert!(state.validate().is_ok());
}

#[test]
fn test_validate_rejects_duplicate_addresses() {
    let state = GenesisState::new(vec![
        base_record(1, coins(&[("stake", 150)])),
        base_record(1, coins(&[("stake", 50)])),
    ]);

    match state.validate() {
        Err(GenesisError::DuplicateAccount(address)) => {
            assert_eq!(address, test_address(1));
        }
        other => panic!("expected DuplicateAccount, got {:?}", other),
    }

    let message = state.validate().unwrap_err().to_string();
    assert!(message.starts_with("duplicate account found in genesis state; address:"));
}

#[test]
fn test_validate_rejects_vesting_amount_exceeding_balance() {
    let mut record = base_record(1, coins(&[("stake", 100)]));
    record.original_vesting = coins(&[("stake", 150)]);
    record.end_time = 1_548_775_410;

    let state = GenesisState::new(vec![record]);
    assert_eq!(
        state.validate(),
        Err(GenesisError::InvalidAccount(
            AccountValidationError::VestingAmountExceedsTotal
        ))
    );
}

#[test]
fn test_validate_rejects_inverted_vesting_times() {
    let mut record = base_record(1, coins(&[("stake", 150)]));
    record.original_vesting = coins(&[("stake", 150)]);
    record.start_time = 1_548_888_000;
    record.end_time = 1_548_775_410;

    let state = GenesisState::new(vec![record]);
    assert_eq!(
        state.validate(),
        Err(GenesisError::InvalidAccount(
            AccountValidationError::InvalidStartTime
        ))
    );
}

#[test]
fn test_validate_rejects_mismatched_pubkey() {
    let key = PubKey::new(vec![42u8; 33]);
    let mut record = base_record(1, Coins::default());
    record.pub_key = Some(key); // derives a different address than test_address(1)

    let state = GenesisState::new(vec![record]);
    assert_eq!(
        state.validate(),
        Err(GenesisError::InvalidAccount(
            AccountValidationError::PubKeyAddressMismatch
        ))
    );
}

// ============================================================================
// Kind recovery and round trips
// ============================================================================

#[test]
fn test_kind_recovery_from_records() {
    let base = base_record(1, coins(&[("stake", 100)]));
    assert!(matches!(base.to_account(), Account::Base(_)));

    let mut delayed = base_record(2, coins(&[("stake", 100)]));
    delayed.original_vesting = coins(&[("stake", 100)]);
    delayed.end_time = 2_000;
    assert!(matches!(delayed.to_account(), Account::DelayedVesting(_)));

    let mut continuous = delayed.clone();
    continuous.start_time = 1_000;
    assert!(matches!(
        continuous.to_account(),
        Account::ContinuousVesting(_)
    ));

    let mut periodic = continuous.clone();
    periodic.vesting_periods = vec![Period::new(1_000, coins(&[("stake", 100)]))];
    assert!(matches!(periodic.to_account(), Account::PeriodicVesting(_)));
}

#[test]
fn test_account_record_round_trip() {
    let mut base = BaseAccount::with_address(test_address(7));
    base.set_coins(coins(&[("fee", 1000), ("stake", 100)]));
    base.account_number = 9;
    base.sequence = 3;

    let continuous = Account::ContinuousVesting(ContinuousVestingAccount::new(
        base.clone(),
        1_000,
        2_000,
    ));
    let periodic = Account::PeriodicVesting(PeriodicVestingAccount::new(
        base.clone(),
        1_000,
        vec![
            Period::new(500, coins(&[("fee", 500), ("stake", 50)])),
            Period::new(500, coins(&[("fee", 500), ("stake", 50)])),
        ],
    ));

    for account in [Account::Base(base), continuous, periodic] {
        let record = GenesisAccount::from(&account);
        assert_eq!(record.to_account(), account, "record must round-trip");
    }
}

#[test]
fn test_round_trip_preserves_delegation_counters() {
    let mut base = BaseAccount::with_address(test_address(8));
    base.set_coins(coins(&[("stake", 100)]));
    let mut cva = ContinuousVestingAccount::new(base, 1_000, 2_000);
    cva.track_delegation(1_500, &coins(&[("stake", 80)]));

    let account = Account::ContinuousVesting(cva);
    let record = GenesisAccount::from(&account);
    assert_eq!(record.delegated_vesting, coins(&[("stake", 50)]));
    assert_eq!(record.delegated_free, coins(&[("stake", 30)]));
    assert_eq!(record.to_account(), account);
}

// ============================================================================
// Serde round trip
// ============================================================================

#[test]
fn test_genesis_state_json_round_trip() {
    let mut vesting = base_record(3, coins(&[("fee", 1000), ("stake", 100)]));
    vesting.original_vesting = coins(&[("fee", 1000), ("stake", 100)]);
    vesting.start_time = 1_000;
    vesting.end_time = 2_000;

    let state = GenesisState::new(vec![base_record(1, coins(&[("stake", 150)])), vesting]);

    let json = serde_json::to_string_pretty(&state).expect("serialize genesis state");
    let back: GenesisState = serde_json::from_str(&json).expect("deserialize genesis state");
    assert_eq!(back, state);
    assert!(back.validate().is_ok());
}

#[test]
fn test_base_record_omits_vesting_fields() {
    let record = base_record(1, coins(&[("stake", 150)]));
    let json = serde_json::to_string(&record).expect("serialize record");
    assert!(!json.contains("original_vesting"));
    assert!(!json.contains("vesting_periods"));
    assert!(!json.contains("pub_key"));
}
