//! Genesis account collection: schema, validation, and sanitation.
//!
//! The genesis file carries every account in a single flattened record so
//! the schema does not change when new schedule shapes are added: a plain
//! base account leaves the vesting fields empty, and the concrete account
//! kind is recovered from which fields are populated (see
//! [`GenesisAccount::to_account`]).
//!
//! # Validation rules
//!
//! - Every account passes its own structural validation (pubkey/address
//!   consistency, vesting amount bounds, schedule shape).
//! - No duplicate addresses across the collection.
//!
//! Sanitation (`sanitize`) is a deterministic canonicalization required for
//! reproducible state-root derivation: accounts sorted by account number,
//! coin lists sorted by denomination. It never drops data and is not itself
//! a consensus rule.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use vesta_types::{Address, Coins, PubKey, UnixSeconds};

use crate::account::{Account, BaseAccount};
use crate::error::GenesisError;
use crate::vesting::{
    BaseVestingAccount, ContinuousVestingAccount, DelayedVestingAccount, Period,
    PeriodicVestingAccount,
};

// ============================================================================
// GenesisAccount
// ============================================================================

/// Flattened on-disk form of any account kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub address: Address,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_key: Option<PubKey>,

    pub coins: Coins,

    pub account_number: u64,

    pub sequence: u64,

    /// Non-empty only for vesting accounts.
    #[serde(default, skip_serializing_if = "Coins::is_empty")]
    pub original_vesting: Coins,

    #[serde(default, skip_serializing_if = "Coins::is_empty")]
    pub delegated_free: Coins,

    #[serde(default, skip_serializing_if = "Coins::is_empty")]
    pub delegated_vesting: Coins,

    /// Schedule start for continuous and periodic accounts, zero otherwise.
    #[serde(default)]
    pub start_time: UnixSeconds,

    #[serde(default)]
    pub end_time: UnixSeconds,

    /// Non-empty only for periodic vesting accounts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vesting_periods: Vec<Period>,
}

impl GenesisAccount {
    /// A record for a plain base account.
    pub fn new(base: &BaseAccount) -> Self {
        GenesisAccount {
            address: base.address,
            pub_key: base.pub_key.clone(),
            coins: base.coins.clone(),
            account_number: base.account_number,
            sequence: base.sequence,
            original_vesting: Coins::default(),
            delegated_free: Coins::default(),
            delegated_vesting: Coins::default(),
            start_time: 0,
            end_time: 0,
            vesting_periods: Vec::new(),
        }
    }

    /// Recover the concrete account value this record describes.
    ///
    /// Kind recovery: empty `original_vesting` is a base account; with a
    /// period list it is periodic; with a non-zero `start_time` it is
    /// continuous; otherwise delayed.
    pub fn to_account(&self) -> Account {
        let base = BaseAccount::new(
            self.address,
            self.coins.clone(),
            self.pub_key.clone(),
            self.account_number,
            self.sequence,
        );
        if self.original_vesting.is_empty() {
            return Account::Base(base);
        }

        let mut base_vesting =
            BaseVestingAccount::new(base, self.original_vesting.clone(), self.end_time);
        base_vesting.delegated_free = self.delegated_free.clone();
        base_vesting.delegated_vesting = self.delegated_vesting.clone();

        if !self.vesting_periods.is_empty() {
            Account::PeriodicVesting(PeriodicVestingAccount::from_base_vesting(
                base_vesting,
                self.start_time,
                self.vesting_periods.clone(),
            ))
        } else if self.start_time != 0 {
            Account::ContinuousVesting(ContinuousVestingAccount::from_base_vesting(
                base_vesting,
                self.start_time,
            ))
        } else {
            Account::DelayedVesting(DelayedVestingAccount::from_base_vesting(base_vesting))
        }
    }

    pub fn validate(&self) -> Result<(), GenesisError> {
        self.to_account().validate()?;
        Ok(())
    }
}

impl From<&Account> for GenesisAccount {
    fn from(account: &Account) -> Self {
        let mut record = GenesisAccount::new(account.base_account());
        if let Some(vesting) = account.as_vesting() {
            record.original_vesting = vesting.original_vesting().clone();
            record.delegated_free = vesting.delegated_free().clone();
            record.delegated_vesting = vesting.delegated_vesting().clone();
            record.start_time = vesting.start_time();
            record.end_time = vesting.end_time();
        }
        if let Account::PeriodicVesting(periodic) = account {
            record.vesting_periods = periodic.vesting_periods.clone();
        }
        record
    }
}

// ============================================================================
// GenesisState
// ============================================================================

/// The account collection loaded at genesis import.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenesisState {
    pub accounts: Vec<GenesisAccount>,

    /// Reserved for future extensions; carried through untouched so new
    /// genesis features do not break the schema.
    #[serde(default)]
    pub extra: serde_json::Value,
}

impl GenesisState {
    pub fn new(accounts: Vec<GenesisAccount>) -> Self {
        GenesisState {
            accounts,
            extra: serde_json::Value::Null,
        }
    }

    /// Validate every account and reject duplicate addresses.
    pub fn validate(&self) -> Result<(), GenesisError> {
        let mut seen: HashSet<Address> = HashSet::new();
        for account in &self.accounts {
            if !seen.insert(account.address) {
                return Err(GenesisError::DuplicateAccount(account.address));
            }
            account.validate()?;
        }
        Ok(())
    }

    /// Canonicalize ordering: accounts ascending by account number, each
    /// account's held coins ascending by denomination. No data is dropped.
    pub fn sanitize(&mut self) {
        self.accounts
            .sort_by_key(|account| account.account_number);
        for account in &mut self.accounts {
            account.coins.sort();
        }
    }
}
