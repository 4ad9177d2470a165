//! Vesting account variants and delegation tracking.
//!
//! A vesting account's balance is partitioned at any instant `t` into a
//! *vested* (free) and a *vesting* (locked) portion according to its
//! schedule. Three schedule shapes are supported:
//!
//! - [`DelayedVestingAccount`]: everything vests at once at `end_time`.
//! - [`ContinuousVestingAccount`]: linear ramp from `start_time` to
//!   `end_time`.
//! - [`PeriodicVestingAccount`]: an ordered list of `(length, amount)`
//!   periods, each vesting atomically at its boundary.
//!
//! All three share [`BaseVestingAccount`], which carries the delegation
//! attribution counters. The counters split everything currently delegated
//! between the vesting and free portions; undelegation returns to the free
//! pool first, so a slashed shortfall stays attributed to the vesting
//! counters and shrinks what the schedule still holds locked.
//!
//! # Invariants
//!
//! - `vested(t) + vesting(t) = original_vesting` for every `t`.
//! - `delegated_vesting <= original_vesting` per denom at all times.
//! - Operations either complete or panic with the account unchanged;
//!   every precondition is checked before the first counter mutates.

use serde::{Deserialize, Serialize};
use vesta_types::{Amount, Coin, Coins, UnixSeconds};

use crate::account::BaseAccount;
use crate::error::AccountValidationError;

// ============================================================================
// VestingAccount trait
// ============================================================================

/// Schedule and delegation operations exposed to the host.
///
/// The host passes the block time explicitly; the core never reads a clock.
pub trait VestingAccount {
    /// Coins placed under schedule at creation. Immutable.
    fn original_vesting(&self) -> &Coins;

    /// Outstanding delegations attributed to the free portion.
    fn delegated_free(&self) -> &Coins;

    /// Outstanding delegations attributed to the vesting portion.
    fn delegated_vesting(&self) -> &Coins;

    /// Schedule start, zero for schedules without one.
    fn start_time(&self) -> UnixSeconds;

    /// Instant at or after which the schedule is fully matured.
    fn end_time(&self) -> UnixSeconds;

    /// The held balance, independent of schedule.
    fn coins(&self) -> &Coins;

    /// Replace the held balance. Called by the host on receive and spend;
    /// the schedule counters are unaffected.
    fn set_coins(&mut self, coins: Coins);

    /// Portion of `original_vesting` released at `block_time`.
    fn vested_coins(&self, block_time: UnixSeconds) -> Coins;

    /// Portion of `original_vesting` still locked at `block_time`.
    fn vesting_coins(&self, block_time: UnixSeconds) -> Coins {
        self.original_vesting()
            .saturating_sub(&self.vested_coins(block_time))
    }

    /// Held balance minus the locked portion, clamped at zero per denom.
    fn spendable_coins(&self, block_time: UnixSeconds) -> Coins {
        self.coins().saturating_sub(&self.vesting_coins(block_time))
    }

    /// Attribute a delegation of `amount` between the vesting and free
    /// portions as of `block_time`. The host debits the held balance
    /// separately.
    ///
    /// Panics if `amount` is empty, contains a zero entry, or exceeds the
    /// held balance for any denom; the account is unchanged on panic.
    fn track_delegation(&mut self, block_time: UnixSeconds, amount: &Coins);

    /// Return `amount` from outstanding delegations, free portion first.
    /// Slashing makes the returned amount smaller than what was delegated;
    /// the shortfall then stays on the vesting counters.
    ///
    /// Panics if `amount` is empty, contains a zero entry, or exceeds the
    /// total delegated for any denom; the account is unchanged on panic.
    fn track_undelegation(&mut self, amount: &Coins);
}

// ============================================================================
// BaseVestingAccount
// ============================================================================

/// State shared by every vesting account variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseVestingAccount {
    #[serde(flatten)]
    pub base_account: BaseAccount,
    pub original_vesting: Coins,
    pub delegated_free: Coins,
    pub delegated_vesting: Coins,
    pub end_time: UnixSeconds,
}

impl BaseVestingAccount {
    pub fn new(base_account: BaseAccount, original_vesting: Coins, end_time: UnixSeconds) -> Self {
        BaseVestingAccount {
            base_account,
            original_vesting,
            delegated_free: Coins::default(),
            delegated_vesting: Coins::default(),
            end_time,
        }
    }

    /// Shared delegation attribution. `vesting_coins` is the variant's
    /// locked portion at the block time of the delegation.
    pub(crate) fn track_delegation(&mut self, vesting_coins: &Coins, amount: &Coins) {
        if amount.is_empty() || amount.iter().any(Coin::is_zero) {
            panic!("delegation attempt with zero coins");
        }
        for coin in amount {
            if self.base_account.coins.amount_of(&coin.denom) < coin.amount {
                panic!("delegation amount exceeds account balance: {}", coin);
            }
        }

        let mut delegated_vesting = self.delegated_vesting.clone();
        let mut delegated_free = self.delegated_free.clone();
        for coin in amount {
            let still_locked = vesting_coins
                .amount_of(&coin.denom)
                .saturating_sub(delegated_vesting.amount_of(&coin.denom));
            let from_vesting = still_locked.min(coin.amount);
            let from_free = coin.amount - from_vesting;

            delegated_vesting = delegated_vesting.add(&single(&coin.denom, from_vesting));
            delegated_free = delegated_free.add(&single(&coin.denom, from_free));
        }
        self.delegated_vesting = delegated_vesting;
        self.delegated_free = delegated_free;
    }

    /// Shared undelegation accounting, free portion first.
    pub(crate) fn track_undelegation(&mut self, amount: &Coins) {
        if amount.is_empty() || amount.iter().any(Coin::is_zero) {
            panic!("undelegation attempt with zero coins");
        }

        let mut delegated_free = self.delegated_free.clone();
        let mut delegated_vesting = self.delegated_vesting.clone();
        for coin in amount {
            let free = delegated_free.amount_of(&coin.denom);
            let vesting = delegated_vesting.amount_of(&coin.denom);
            if free.saturating_add(vesting) < coin.amount {
                panic!("undelegation amount exceeds delegated coins: {}", coin);
            }
            let to_free = free.min(coin.amount);
            let to_vesting = coin.amount - to_free;

            delegated_free = delegated_free.saturating_sub(&single(&coin.denom, to_free));
            delegated_vesting = delegated_vesting.saturating_sub(&single(&coin.denom, to_vesting));
        }
        self.delegated_free = delegated_free;
        self.delegated_vesting = delegated_vesting;
    }

    pub fn validate(&self) -> Result<(), AccountValidationError> {
        self.base_account.validate()?;
        if self.original_vesting.is_any_gt(&self.base_account.coins) {
            return Err(AccountValidationError::VestingAmountExceedsTotal);
        }
        Ok(())
    }
}

fn single(denom: &str, amount: Amount) -> Coins {
    Coins::new([Coin::new(denom, amount)])
}

// ============================================================================
// DelayedVestingAccount
// ============================================================================

/// All of `original_vesting` vests at once at `end_time`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedVestingAccount {
    #[serde(flatten)]
    pub base_vesting: BaseVestingAccount,
}

impl DelayedVestingAccount {
    /// The whole held balance goes under schedule.
    pub fn new(base_account: BaseAccount, end_time: UnixSeconds) -> Self {
        let original_vesting = base_account.coins.clone();
        DelayedVestingAccount {
            base_vesting: BaseVestingAccount::new(base_account, original_vesting, end_time),
        }
    }

    pub fn from_base_vesting(base_vesting: BaseVestingAccount) -> Self {
        DelayedVestingAccount { base_vesting }
    }

    pub fn validate(&self) -> Result<(), AccountValidationError> {
        self.base_vesting.validate()
    }
}

impl VestingAccount for DelayedVestingAccount {
    fn original_vesting(&self) -> &Coins {
        &self.base_vesting.original_vesting
    }

    fn delegated_free(&self) -> &Coins {
        &self.base_vesting.delegated_free
    }

    fn delegated_vesting(&self) -> &Coins {
        &self.base_vesting.delegated_vesting
    }

    fn start_time(&self) -> UnixSeconds {
        0
    }

    fn end_time(&self) -> UnixSeconds {
        self.base_vesting.end_time
    }

    fn coins(&self) -> &Coins {
        &self.base_vesting.base_account.coins
    }

    fn set_coins(&mut self, coins: Coins) {
        self.base_vesting.base_account.coins = coins;
    }

    fn vested_coins(&self, block_time: UnixSeconds) -> Coins {
        if block_time >= self.base_vesting.end_time {
            self.base_vesting.original_vesting.clone()
        } else {
            Coins::default()
        }
    }

    fn track_delegation(&mut self, block_time: UnixSeconds, amount: &Coins) {
        let vesting = self.vesting_coins(block_time);
        self.base_vesting.track_delegation(&vesting, amount);
    }

    fn track_undelegation(&mut self, amount: &Coins) {
        self.base_vesting.track_undelegation(amount);
    }
}

// ============================================================================
// ContinuousVestingAccount
// ============================================================================

/// `original_vesting` is released linearly between `start_time` and
/// `end_time`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuousVestingAccount {
    #[serde(flatten)]
    pub base_vesting: BaseVestingAccount,
    pub start_time: UnixSeconds,
}

impl ContinuousVestingAccount {
    /// The whole held balance goes under schedule.
    pub fn new(base_account: BaseAccount, start_time: UnixSeconds, end_time: UnixSeconds) -> Self {
        let original_vesting = base_account.coins.clone();
        ContinuousVestingAccount {
            base_vesting: BaseVestingAccount::new(base_account, original_vesting, end_time),
            start_time,
        }
    }

    pub fn from_base_vesting(base_vesting: BaseVestingAccount, start_time: UnixSeconds) -> Self {
        ContinuousVestingAccount {
            base_vesting,
            start_time,
        }
    }

    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.start_time >= self.base_vesting.end_time {
            return Err(AccountValidationError::InvalidStartTime);
        }
        self.base_vesting.validate()
    }
}

impl VestingAccount for ContinuousVestingAccount {
    fn original_vesting(&self) -> &Coins {
        &self.base_vesting.original_vesting
    }

    fn delegated_free(&self) -> &Coins {
        &self.base_vesting.delegated_free
    }

    fn delegated_vesting(&self) -> &Coins {
        &self.base_vesting.delegated_vesting
    }

    fn start_time(&self) -> UnixSeconds {
        self.start_time
    }

    fn end_time(&self) -> UnixSeconds {
        self.base_vesting.end_time
    }

    fn coins(&self) -> &Coins {
        &self.base_vesting.base_account.coins
    }

    fn set_coins(&mut self, coins: Coins) {
        self.base_vesting.base_account.coins = coins;
    }

    fn vested_coins(&self, block_time: UnixSeconds) -> Coins {
        if block_time <= self.start_time {
            return Coins::default();
        }
        if block_time >= self.base_vesting.end_time {
            return self.base_vesting.original_vesting.clone();
        }

        let elapsed = (block_time - self.start_time) as u128;
        let duration = (self.base_vesting.end_time - self.start_time) as u128;
        Coins::new(
            self.base_vesting
                .original_vesting
                .iter()
                .map(|coin| Coin::new(coin.denom.clone(), ratio_floor(coin.amount, elapsed, duration))),
        )
    }

    fn track_delegation(&mut self, block_time: UnixSeconds, amount: &Coins) {
        let vesting = self.vesting_coins(block_time);
        self.base_vesting.track_delegation(&vesting, amount);
    }

    fn track_undelegation(&mut self, amount: &Coins) {
        self.base_vesting.track_undelegation(amount);
    }
}

/// `floor(amount * elapsed / duration)` for `0 < elapsed < duration`.
///
/// Splitting the division keeps every intermediate product in `u128` range
/// for the full amount domain; the result is exactly the floored quotient.
fn ratio_floor(amount: Amount, elapsed: u128, duration: u128) -> Amount {
    (amount / duration) * elapsed + (amount % duration) * elapsed / duration
}

// ============================================================================
// PeriodicVestingAccount
// ============================================================================

/// One step of a periodic schedule: `amount` vests atomically `length`
/// seconds after the previous boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub length: i64,
    pub amount: Coins,
}

impl Period {
    pub fn new(length: i64, amount: Coins) -> Self {
        Period { length, amount }
    }
}

/// `original_vesting` is released in discrete steps at period boundaries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicVestingAccount {
    #[serde(flatten)]
    pub base_vesting: BaseVestingAccount,
    pub start_time: UnixSeconds,
    pub vesting_periods: Vec<Period>,
}

impl PeriodicVestingAccount {
    /// Derives `end_time` and `original_vesting` from the period list.
    pub fn new(base_account: BaseAccount, start_time: UnixSeconds, periods: Vec<Period>) -> Self {
        let mut end_time = start_time;
        let mut original_vesting = Coins::default();
        for period in &periods {
            end_time += period.length;
            original_vesting = original_vesting.add(&period.amount);
        }
        PeriodicVestingAccount {
            base_vesting: BaseVestingAccount::new(base_account, original_vesting, end_time),
            start_time,
            vesting_periods: periods,
        }
    }

    pub fn from_base_vesting(
        base_vesting: BaseVestingAccount,
        start_time: UnixSeconds,
        periods: Vec<Period>,
    ) -> Self {
        PeriodicVestingAccount {
            base_vesting,
            start_time,
            vesting_periods: periods,
        }
    }

    pub fn validate(&self) -> Result<(), AccountValidationError> {
        let mut total_length: i128 = 0;
        let mut total_amount = Coins::default();
        for period in &self.vesting_periods {
            if period.length <= 0 {
                return Err(AccountValidationError::NonPositivePeriodLength);
            }
            if period.amount.is_zero() {
                return Err(AccountValidationError::ZeroPeriodAmount);
            }
            total_length += period.length as i128;
            total_amount = total_amount.add(&period.amount);
        }

        let schedule_span =
            self.base_vesting.end_time as i128 - self.start_time as i128;
        if total_length != schedule_span {
            return Err(AccountValidationError::PeriodLengthMismatch);
        }
        // Value comparison: a genesis record may list original_vesting in any
        // entry order, which must not fail a schedule with matching amounts.
        if !total_amount.amounts_eq(&self.base_vesting.original_vesting) {
            return Err(AccountValidationError::PeriodAmountMismatch);
        }
        self.base_vesting.validate()
    }
}

impl VestingAccount for PeriodicVestingAccount {
    fn original_vesting(&self) -> &Coins {
        &self.base_vesting.original_vesting
    }

    fn delegated_free(&self) -> &Coins {
        &self.base_vesting.delegated_free
    }

    fn delegated_vesting(&self) -> &Coins {
        &self.base_vesting.delegated_vesting
    }

    fn start_time(&self) -> UnixSeconds {
        self.start_time
    }

    fn end_time(&self) -> UnixSeconds {
        self.base_vesting.end_time
    }

    fn coins(&self) -> &Coins {
        &self.base_vesting.base_account.coins
    }

    fn set_coins(&mut self, coins: Coins) {
        self.base_vesting.base_account.coins = coins;
    }

    fn vested_coins(&self, block_time: UnixSeconds) -> Coins {
        if block_time < self.start_time {
            return Coins::default();
        }
        if block_time >= self.base_vesting.end_time {
            return self.base_vesting.original_vesting.clone();
        }

        // A period counts as vested at exactly its boundary instant.
        let mut vested = Coins::default();
        let mut period_end = self.start_time;
        for period in &self.vesting_periods {
            period_end += period.length;
            if block_time < period_end {
                break;
            }
            vested = vested.add(&period.amount);
        }
        vested
    }

    fn track_delegation(&mut self, block_time: UnixSeconds, amount: &Coins) {
        let vesting = self.vesting_coins(block_time);
        self.base_vesting.track_delegation(&vesting, amount);
    }

    fn track_undelegation(&mut self, amount: &Coins) {
        self.base_vesting.track_undelegation(amount);
    }
}
