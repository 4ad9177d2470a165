//! Core account primitives and the coin algebra for the vesta ledger.

pub mod coin;
pub mod primitives;

pub use coin::{Amount, Coin, Coins};
pub use primitives::*;
