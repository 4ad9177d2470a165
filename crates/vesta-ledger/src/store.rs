//! Account storage seam between the ledger core and its host.
//!
//! The host owns account persistence; the core only requires enough surface
//! to import a genesis collection and to audit the global invariants that
//! vesting accounting must preserve. Every derived quantity is computed over
//! [`AccountStore::addresses`], which walks in ascending address order, so a
//! full-store sum is byte-identical on every replica.

use std::collections::BTreeMap;

use vesta_types::{Address, Coins, UnixSeconds};

use crate::account::Account;
use crate::error::GenesisError;
use crate::genesis::GenesisState;

/// Error type for account storage and genesis import.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("account not found: {0}")]
    AccountNotFound(Address),

    #[error("genesis account already exists: {0}")]
    AccountAlreadyExists(Address),

    #[error(transparent)]
    InvalidGenesis(#[from] GenesisError),
}

/// Account state held by the host between blocks.
///
/// Implementations supply lookup, upsert, removal, and an ordered address
/// walk; genesis import and the supply audits are provided on top of those.
pub trait AccountStore {
    /// The account at `address`, if any.
    fn account(&self, address: &Address) -> Option<&Account>;

    /// Insert or replace an account, keyed by its own address.
    fn upsert(&mut self, account: Account);

    /// Remove and return the account at `address`.
    fn remove(&mut self, address: &Address) -> Result<Account, StoreError>;

    /// Every stored address, in ascending order.
    fn addresses(&self) -> Vec<Address>;

    /// Validate a genesis collection and load every account into the store.
    ///
    /// All-or-nothing: fails without writing anything if the collection does
    /// not validate or if any of its addresses is already present.
    fn import_genesis(&mut self, state: &GenesisState) -> Result<(), StoreError> {
        state.validate()?;
        for record in &state.accounts {
            if self.account(&record.address).is_some() {
                return Err(StoreError::AccountAlreadyExists(record.address));
            }
        }
        for record in &state.accounts {
            self.upsert(record.to_account());
        }
        Ok(())
    }

    /// Sum of held balances across every account.
    ///
    /// Delegation tracking never mints or burns, so outside of host-driven
    /// transfers this total is constant; hosts compare it against minted
    /// supply after each block.
    fn total_held(&self) -> Coins {
        self.addresses()
            .iter()
            .fold(Coins::default(), |total, address| {
                match self.account(address) {
                    Some(account) => total.add(account.coins()),
                    None => total,
                }
            })
    }

    /// Sum of still-locked coins across every vesting account at
    /// `block_time`. Non-increasing as the block time advances.
    fn total_locked(&self, block_time: UnixSeconds) -> Coins {
        self.addresses()
            .iter()
            .fold(Coins::default(), |total, address| {
                match self.account(address).and_then(|account| account.as_vesting()) {
                    Some(vesting) => total.add(&vesting.vesting_coins(block_time)),
                    None => total,
                }
            })
    }
}

/// Ordered in-memory store for tests and local hosts.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: BTreeMap<Address, Account>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    fn upsert(&mut self, account: Account) {
        self.accounts.insert(account.address(), account);
    }

    fn remove(&mut self, address: &Address) -> Result<Account, StoreError> {
        self.accounts
            .remove(address)
            .ok_or(StoreError::AccountNotFound(*address))
    }

    fn addresses(&self) -> Vec<Address> {
        self.accounts.keys().copied().collect()
    }
}
