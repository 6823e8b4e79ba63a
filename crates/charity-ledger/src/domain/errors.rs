use super::{CharityId, Hash};
use thiserror::Error;

/// Which slot array an index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    Charity,
    Donation,
    ExpenditureProof,
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Charity => write!(f, "charity"),
            Self::Donation => write!(f, "donation"),
            Self::ExpenditureProof => write!(f, "expenditure proof"),
        }
    }
}

/// Charity total touched by a failed credit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmountField {
    Received,
    Spent,
}

impl std::fmt::Display for AmountField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Received => write!(f, "amount_received"),
            Self::Spent => write!(f, "amount_spent"),
        }
    }
}

/// Every reason a transition (or construction) is rejected.
///
/// All variants are fatal to the attempted transition. Nothing is retried or
/// partially applied; the caller resubmits a corrected transition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Charity not found: {charity_id}")]
    CharityNotFound { charity_id: CharityId },

    #[error("Invalid {kind} index: {index} (capacity {capacity})")]
    InvalidIndex {
        kind: SlotKind,
        index: usize,
        capacity: usize,
    },

    #[error(
        "Charity not found or donation {donation_index} does not match expenditure proof {proof_index}"
    )]
    NoQualifyingMatch {
        donation_index: usize,
        proof_index: usize,
    },

    #[error("Commitment mismatch: declared {}, computed {}", hex::encode(.expected), hex::encode(.actual))]
    CommitmentMismatch { expected: Hash, actual: Hash },

    #[error("Arithmetic overflow on {field} of charity slot {slot}")]
    ArithmeticOverflow { slot: usize, field: AmountField },

    #[error("Charity id {charity_id} matches {matches} slots, exactly one required")]
    AmbiguousCharityId { charity_id: CharityId, matches: usize },

    #[error("Capacity mismatch: expected {expected} entries, got {actual}")]
    CapacityMismatch { expected: usize, actual: usize },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Settlement store error: {0}")]
    Store(String),
}

impl LedgerError {
    /// True when the operation's own precondition failed, as opposed to the
    /// commitment check or an infrastructure fault.
    pub fn is_precondition_failure(&self) -> bool {
        matches!(
            self,
            Self::CharityNotFound { .. }
                | Self::InvalidIndex { .. }
                | Self::NoQualifyingMatch { .. }
                | Self::ArithmeticOverflow { .. }
                | Self::AmbiguousCharityId { .. }
        )
    }

    /// True for a commitment disagreement.
    pub fn is_commitment_mismatch(&self) -> bool {
        matches!(self, Self::CommitmentMismatch { .. })
    }
}

/// Failures decoding a declared state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Malformed encoding: {0}")]
    Malformed(String),

    #[error("Non-canonical encoding")]
    NonCanonical,

    #[error("{kind} array has {actual} entries, capacity is {expected}")]
    LengthMismatch {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Charity slot {slot} id is not derived from its name")]
    IdNameMismatch { slot: usize },
}

impl From<rlp::DecoderError> for CodecError {
    fn from(err: rlp::DecoderError) -> Self {
        Self::Malformed(err.to_string())
    }
}
