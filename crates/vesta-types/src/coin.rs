//! Multi-denomination coin arithmetic.
//!
//! A [`Coins`] value is a non-negative integer vector keyed by denomination.
//! The canonical form is sorted ascending by denom with no zero entries and
//! no duplicate denoms; every arithmetic operation returns canonical output
//! regardless of input form, so results are deterministic across replicas.
//!
//! Subtraction comes in two flavors: [`Coins::saturating_sub`] clamps each
//! denom at zero (the form used by spendable-balance derivation), and
//! [`Coins::checked_sub`] refuses to underflow (the form used by balance
//! debits).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A coin amount in base units.
pub type Amount = u128;

// ============================================================================
// Coin
// ============================================================================

/// A single denomination and amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Amount,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: Amount) -> Self {
        Coin {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

// ============================================================================
// Coins
// ============================================================================

/// An ordered collection of coins, one entry per denomination.
///
/// Deserialization preserves the stored order so that genesis sanitation can
/// observe and repair non-canonical input (see [`Coins::is_sorted`] and
/// [`Coins::sort`]); all constructors and arithmetic produce canonical form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Build a canonical collection: sorted by denom, duplicate denoms
    /// merged, zero amounts dropped.
    pub fn new(coins: impl IntoIterator<Item = Coin>) -> Self {
        let mut map: BTreeMap<String, Amount> = BTreeMap::new();
        for coin in coins {
            let entry = map.entry(coin.denom).or_insert(0);
            *entry = entry
                .checked_add(coin.amount)
                .expect("coin amount overflow");
        }
        Coins(
            map.into_iter()
                .filter(|(_, amount)| *amount > 0)
                .map(|(denom, amount)| Coin { denom, amount })
                .collect(),
        )
    }

    /// Wrap a raw coin list without canonicalizing.
    ///
    /// Used when loading externally produced state whose ordering must be
    /// observable (genesis sanitation). Arithmetic on the result is still
    /// well-defined; only iteration order reflects the input.
    pub fn from_raw(coins: Vec<Coin>) -> Self {
        Coins(coins)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every entry is zero (for canonical values this is the same
    /// as [`Coins::is_empty`]).
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Coin::is_zero)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    /// Total amount held for `denom`, zero if absent.
    pub fn amount_of(&self, denom: &str) -> Amount {
        self.0
            .iter()
            .filter(|coin| coin.denom == denom)
            .map(|coin| coin.amount)
            .sum()
    }

    /// Per-denom sum.
    pub fn add(&self, other: &Coins) -> Coins {
        Coins::new(self.0.iter().chain(other.0.iter()).cloned())
    }

    /// Per-denom subtraction clamped at zero; zero entries are dropped.
    pub fn saturating_sub(&self, other: &Coins) -> Coins {
        let mut map = self.to_map();
        for coin in other.iter() {
            if let Some(amount) = map.get_mut(&coin.denom) {
                *amount = amount.saturating_sub(coin.amount);
            }
        }
        Self::from_map(map)
    }

    /// Per-denom subtraction; `None` if any denom would underflow.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut map = self.to_map();
        for coin in other.iter() {
            let held = map.entry(coin.denom.clone()).or_insert(0);
            *held = held.checked_sub(coin.amount)?;
        }
        Some(Self::from_map(map))
    }

    /// True iff some denom in `self` strictly exceeds the same denom in
    /// `other`. An empty `self` is never greater.
    pub fn is_any_gt(&self, other: &Coins) -> bool {
        self.0
            .iter()
            .any(|coin| coin.amount > other.amount_of(&coin.denom))
    }

    /// True iff every denom in `other` is covered by at least as much in
    /// `self`.
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other
            .iter()
            .all(|coin| self.amount_of(&coin.denom) >= coin.amount)
    }

    /// Per-denom value equality, ignoring entry order and zero entries.
    ///
    /// Derived equality compares the stored entry sequence, which raw
    /// collections (see [`Coins::from_raw`]) may hold in any order; use this
    /// wherever equal amounts must count as equal.
    pub fn amounts_eq(&self, other: &Coins) -> bool {
        self.is_all_gte(other) && other.is_all_gte(self)
    }

    /// Whether the entries are in canonical denom order with no duplicates.
    pub fn is_sorted(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0].denom < pair[1].denom)
    }

    /// Restore canonical denom order in place without losing data.
    pub fn sort(&mut self) {
        self.0.sort_by(|a, b| a.denom.cmp(&b.denom));
    }

    fn to_map(&self) -> BTreeMap<String, Amount> {
        let mut map: BTreeMap<String, Amount> = BTreeMap::new();
        for coin in &self.0 {
            let entry = map.entry(coin.denom.clone()).or_insert(0);
            *entry = entry
                .checked_add(coin.amount)
                .expect("coin amount overflow");
        }
        map
    }

    fn from_map(map: BTreeMap<String, Amount>) -> Coins {
        Coins(
            map.into_iter()
                .filter(|(_, amount)| *amount > 0)
                .map(|(denom, amount)| Coin { denom, amount })
                .collect(),
        )
    }
}

impl FromIterator<Coin> for Coins {
    fn from_iter<I: IntoIterator<Item = Coin>>(iter: I) -> Self {
        Coins::new(iter)
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Add for Coins {
    type Output = Coins;

    fn add(self, rhs: Coins) -> Coins {
        Coins::add(&self, &rhs)
    }
}

impl std::fmt::Display for Coins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(Coin::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}
