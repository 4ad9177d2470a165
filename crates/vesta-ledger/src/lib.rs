//! Account state for the vesta ledger: base and vesting account types,
//! delegation tracking, genesis validation, and the storage seam.

pub mod account;
pub mod error;
pub mod genesis;
pub mod store;
pub mod vesting;

pub use account::{Account, BaseAccount};
pub use error::{AccountValidationError, GenesisError};
pub use genesis::{GenesisAccount, GenesisState};
pub use store::{AccountStore, InMemoryAccountStore, StoreError};
pub use vesting::{
    BaseVestingAccount, ContinuousVestingAccount, DelayedVestingAccount, Period,
    PeriodicVestingAccount, VestingAccount,
};
