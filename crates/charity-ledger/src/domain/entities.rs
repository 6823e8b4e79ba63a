//! # Domain Entities for the Charity Ledger
//!
//! Fixed-size data model shared by every transition.
//!
//! ## Type Decisions
//!
//! - `u128` amounts: wide enough for any practical donation total and cheap to
//!   encode. Amounts are unsigned, so a negative donation is unrepresentable.
//! - `CharityId` is a byte string, not a fixed array. Identifiers are derived
//!   from names that may be shorter than [`CHARITY_ID_LEN`], and lookups compare
//!   the full byte string.
//!
//! ## Slot Convention
//!
//! Donations and expenditure proofs are stored in arrays parallel to the
//! charity table. Slot `i` of every array belongs to charity slot `i`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-byte digest (hash256 output).
pub type Hash = [u8; 32];

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 100;

/// Number of leading name bytes that form a charity identifier.
pub const CHARITY_ID_LEN: usize = 32;

/// Identifier of a registered charity.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharityId(Vec<u8>);

impl CharityId {
    /// Wrap raw identifier bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Derive the identifier for a registry slot from its name entry.
    ///
    /// Takes the first [`CHARITY_ID_LEN`] bytes, or the whole name if shorter.
    pub fn from_name(name: &[u8]) -> Self {
        let len = name.len().min(CHARITY_ID_LEN);
        Self(name[..len].to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Debug for CharityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharityId(0x{})", hex::encode(&self.0))
    }
}

impl fmt::Display for CharityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl From<&[u8]> for CharityId {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for CharityId {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for CharityId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// One row of the charity table.
///
/// ## Fields
///
/// - `id`: derived once from the slot's name, never changed afterwards
/// - `amount_received`: sum of every donation credited to this slot
/// - `amount_spent`: sum of every donation matched to an expenditure proof
///
/// `amount_spent <= amount_received` is the intended relation but is not a
/// precondition of any transition. See `domain::invariants`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charity {
    pub id: CharityId,
    pub amount_received: u128,
    pub amount_spent: u128,
}

impl Charity {
    /// Fresh charity with zeroed totals.
    pub fn new(id: CharityId) -> Self {
        Self {
            id,
            amount_received: 0,
            amount_spent: 0,
        }
    }
}

/// Latest donation recorded in a charity's slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub amount: u128,
    pub charity_id: CharityId,
}

/// Latest expenditure proof recorded in a charity's slot.
///
/// `total_expenditure` is a snapshot of the charity's `amount_spent` at the
/// moment the proof was recorded. It does not include `expenditure_amount`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenditureProof {
    pub expenditure_amount: u128,
    pub proof: Vec<u8>,
    pub total_expenditure: u128,
}

/// How a charity identifier resolves to registry slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Mutate every slot whose identifier matches.
    #[default]
    AllMatches,
    /// Require exactly one matching slot; colliding identifiers are rejected.
    ExactlyOne,
}

/// Ledger configuration, fixed when the contract is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Number of charity slots (N). Every slot array has exactly this length.
    pub capacity: usize,
    /// Identifier resolution policy.
    pub match_policy: MatchPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            match_policy: MatchPolicy::AllMatches,
        }
    }
}

impl LedgerConfig {
    /// Configuration with the given capacity and default policy.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Builder method to set the match policy.
    pub fn with_match_policy(mut self, match_policy: MatchPolicy) -> Self {
        self.match_policy = match_policy;
        self
    }
}

/// What the spending transaction declares for the next state unit.
///
/// `carried_value` is the value held by the current state unit and carried
/// forward unchanged; `declared_commitment` is the hash of the next output as
/// assembled by the settlement layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementContext {
    pub carried_value: u64,
    pub declared_commitment: Hash,
}

impl SettlementContext {
    pub fn new(carried_value: u64, declared_commitment: Hash) -> Self {
        Self {
            carried_value,
            declared_commitment,
        }
    }
}
