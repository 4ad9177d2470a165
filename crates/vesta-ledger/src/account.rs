//! Base account type and the tagged account union held by the store.

use serde::{Deserialize, Serialize};
use vesta_types::{Address, Coins, PubKey, UnixSeconds};

use crate::error::AccountValidationError;
use crate::vesting::{
    ContinuousVestingAccount, DelayedVestingAccount, PeriodicVestingAccount, VestingAccount,
};

// ============================================================================
// BaseAccount
// ============================================================================

/// A plain account: an address holding coins, with no schedule attached.
///
/// The core mutates only `coins`; `account_number` and `sequence` are
/// monotonic metadata owned by the host's transaction pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAccount {
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_key: Option<PubKey>,
    pub coins: Coins,
    pub account_number: u64,
    pub sequence: u64,
}

impl BaseAccount {
    pub fn new(
        address: Address,
        coins: Coins,
        pub_key: Option<PubKey>,
        account_number: u64,
        sequence: u64,
    ) -> Self {
        BaseAccount {
            address,
            pub_key,
            coins,
            account_number,
            sequence,
        }
    }

    /// An account known only by address, e.g. a genesis allocation whose
    /// owner has never signed.
    pub fn with_address(address: Address) -> Self {
        BaseAccount {
            address,
            pub_key: None,
            coins: Coins::default(),
            account_number: 0,
            sequence: 0,
        }
    }

    pub fn coins(&self) -> &Coins {
        &self.coins
    }

    pub fn set_coins(&mut self, coins: Coins) {
        self.coins = coins;
    }

    /// A plain account's whole balance is spendable at any time.
    pub fn spendable_coins(&self, _block_time: UnixSeconds) -> Coins {
        self.coins.clone()
    }

    pub fn validate(&self) -> Result<(), AccountValidationError> {
        match &self.pub_key {
            Some(key) if !key.matches_address(&self.address) => {
                Err(AccountValidationError::PubKeyAddressMismatch)
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Account union
// ============================================================================

/// The tagged union of account kinds persisted in the store.
///
/// Common operations dispatch on the kind; schedule and delegation
/// operations are reached through [`Account::as_vesting`] /
/// [`Account::as_vesting_mut`], which plain base accounts do not offer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Account {
    Base(BaseAccount),
    ContinuousVesting(ContinuousVestingAccount),
    DelayedVesting(DelayedVestingAccount),
    PeriodicVesting(PeriodicVestingAccount),
}

impl Account {
    pub fn base_account(&self) -> &BaseAccount {
        match self {
            Account::Base(acc) => acc,
            Account::ContinuousVesting(acc) => &acc.base_vesting.base_account,
            Account::DelayedVesting(acc) => &acc.base_vesting.base_account,
            Account::PeriodicVesting(acc) => &acc.base_vesting.base_account,
        }
    }

    fn base_account_mut(&mut self) -> &mut BaseAccount {
        match self {
            Account::Base(acc) => acc,
            Account::ContinuousVesting(acc) => &mut acc.base_vesting.base_account,
            Account::DelayedVesting(acc) => &mut acc.base_vesting.base_account,
            Account::PeriodicVesting(acc) => &mut acc.base_vesting.base_account,
        }
    }

    pub fn address(&self) -> Address {
        self.base_account().address
    }

    pub fn account_number(&self) -> u64 {
        self.base_account().account_number
    }

    pub fn sequence(&self) -> u64 {
        self.base_account().sequence
    }

    pub fn coins(&self) -> &Coins {
        &self.base_account().coins
    }

    pub fn set_coins(&mut self, coins: Coins) {
        self.base_account_mut().coins = coins;
    }

    pub fn spendable_coins(&self, block_time: UnixSeconds) -> Coins {
        match self.as_vesting() {
            Some(vesting) => vesting.spendable_coins(block_time),
            None => self.base_account().spendable_coins(block_time),
        }
    }

    /// The vesting seam, `None` for plain base accounts.
    pub fn as_vesting(&self) -> Option<&dyn VestingAccount> {
        match self {
            Account::Base(_) => None,
            Account::ContinuousVesting(acc) => Some(acc),
            Account::DelayedVesting(acc) => Some(acc),
            Account::PeriodicVesting(acc) => Some(acc),
        }
    }

    pub fn as_vesting_mut(&mut self) -> Option<&mut dyn VestingAccount> {
        match self {
            Account::Base(_) => None,
            Account::ContinuousVesting(acc) => Some(acc),
            Account::DelayedVesting(acc) => Some(acc),
            Account::PeriodicVesting(acc) => Some(acc),
        }
    }

    pub fn validate(&self) -> Result<(), AccountValidationError> {
        match self {
            Account::Base(acc) => acc.validate(),
            Account::ContinuousVesting(acc) => acc.validate(),
            Account::DelayedVesting(acc) => acc.validate(),
            Account::PeriodicVesting(acc) => acc.validate(),
        }
    }
}
