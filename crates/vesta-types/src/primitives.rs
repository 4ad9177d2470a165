//! Account addresses, public keys, and time primitives for the vesta ledger.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

/// Unix time in seconds, as carried in block headers.
///
/// All schedule arithmetic in the ledger operates on this type. The core
/// never reads a system clock; the host passes the block time explicitly so
/// that every replica evaluates the same schedule state.
pub type UnixSeconds = i64;

/// Length of an account address in bytes.
pub const ADDRESS_LEN: usize = 20;

// ============================================================================
// Address
// ============================================================================

/// A 20-byte account address, unique per account.
///
/// Addresses are derived from public keys (see [`PubKey::derive_address`])
/// but may also exist without a known key, e.g. for genesis allocations
/// whose owners have never signed a transaction.
///
/// Serialized as a lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Address(#[serde(with = "hex::serde")] [u8; ADDRESS_LEN]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Address(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Address(bytes)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", hex::encode(self.0))
    }
}

// ============================================================================
// PubKey
// ============================================================================

/// An account public key, stored as opaque bytes.
///
/// The ledger core never verifies signatures; it only checks that a key, when
/// present, is consistent with the account address it is attached to.
///
/// Serialized as a lowercase hex string.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey(#[serde(with = "hex::serde")] Vec<u8>);

impl PubKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        PubKey(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Derive the account address for this key.
    ///
    /// The address is the first [`ADDRESS_LEN`] bytes of the SHA3-256 digest
    /// of the raw key bytes. Changing this mapping is a consensus-breaking
    /// change.
    pub fn derive_address(&self) -> Address {
        let digest = Sha3_256::digest(&self.0);
        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(&digest[..ADDRESS_LEN]);
        Address(out)
    }

    /// Check that this key derives the given address.
    pub fn matches_address(&self, address: &Address) -> bool {
        self.derive_address() == *address
    }
}

impl std::fmt::Debug for PubKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PubKey({})", hex::encode(&self.0))
    }
}
