//! Validation error types returned to the host.
//!
//! The rendered messages are part of the host interface: genesis tooling and
//! transaction handlers match on them, so changing a string is a breaking
//! change. Invariant violations caused by host bugs (delegating more than the
//! held balance, undelegating more than was delegated) are not represented
//! here; those abort via panic with the account state unchanged.

use vesta_types::Address;

/// A structural problem with a single account instance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    /// The attached public key does not derive the account address.
    #[error("pubkey and address pair is invalid")]
    PubKeyAddressMismatch,

    /// `original_vesting` exceeds the held balance for some denom.
    #[error("vesting amount cannot be greater than total amount")]
    VestingAmountExceedsTotal,

    /// A continuous schedule whose start is not strictly before its end.
    #[error("vesting start-time cannot be before end-time")]
    InvalidStartTime,

    /// A periodic schedule with a zero or negative period length.
    #[error("vesting period lengths must be positive")]
    NonPositivePeriodLength,

    /// A periodic schedule with an empty period amount.
    #[error("vesting period amounts must be non-zero")]
    ZeroPeriodAmount,

    /// Period lengths do not add up to `end_time - start_time`.
    #[error("vesting end time does not match length of all vesting periods")]
    PeriodLengthMismatch,

    /// Period amounts do not add up to `original_vesting`.
    #[error("original vesting coins does not match the sum of all coins in vesting periods")]
    PeriodAmountMismatch,
}

/// A problem with the genesis account collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenesisError {
    /// The same address appears more than once.
    #[error("duplicate account found in genesis state; address: {0}")]
    DuplicateAccount(Address),

    /// An individual account failed validation.
    #[error(transparent)]
    InvalidAccount(#[from] AccountValidationError),
}
