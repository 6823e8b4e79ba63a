//! # Audit Invariants
//!
//! Relations an honest ledger is expected to keep but that no transition
//! enforces. They are reported, never used to accept or reject.
//!
//! - `amount_spent <= amount_received` per charity. Matching the same
//!   donation and proof twice, or matching a donation against a charity that
//!   already spent its receipts, breaks it without breaking any precondition.
//! - Every charity id is derived from the name in its slot.
//! - Every slot array has `capacity` entries.

use crate::domain::{CharityId, LedgerState};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Slots whose spent total exceeds their received total.
#[must_use]
pub fn check_spent_within_received(state: &LedgerState) -> Vec<InvariantViolation> {
    state
        .registry()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.amount_spent > c.amount_received)
        .map(|(slot, c)| InvariantViolation::SpentExceedsReceived {
            slot,
            received: c.amount_received,
            spent: c.amount_spent,
        })
        .collect()
}

/// Slots whose identifier is not the prefix of their name.
#[must_use]
pub fn check_ids_derived_from_names(state: &LedgerState) -> Vec<InvariantViolation> {
    state
        .registry()
        .iter()
        .zip(state.names())
        .enumerate()
        .filter(|(_, (charity, name))| charity.id != CharityId::from_name(name))
        .map(|(slot, _)| InvariantViolation::IdNotDerivedFromName { slot })
        .collect()
}

#[must_use]
pub fn check_slot_counts(state: &LedgerState) -> bool {
    let capacity = state.capacity();
    state.registry().len() == capacity
        && state.donations().len() == capacity
        && state.expenditure_proofs().len() == capacity
}

/// Run every audit check.
#[must_use]
pub fn check_all_invariants(state: &LedgerState) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_slot_counts(state) {
        violations.push(InvariantViolation::SlotCountMismatch {
            capacity: state.capacity(),
        });
    }
    violations.extend(check_ids_derived_from_names(state));
    violations.extend(check_spent_within_received(state));

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    Valid,
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub fn violations(&self) -> &[InvariantViolation] {
        match self {
            Self::Valid => &[],
            Self::Invalid(v) => v,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    SpentExceedsReceived {
        slot: usize,
        received: u128,
        spent: u128,
    },
    IdNotDerivedFromName {
        slot: usize,
    },
    SlotCountMismatch {
        capacity: usize,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SpentExceedsReceived {
                slot,
                received,
                spent,
            } => write!(
                f,
                "charity slot {slot} spent {spent} but received only {received}"
            ),
            Self::IdNotDerivedFromName { slot } => {
                write!(f, "charity slot {slot} id does not match its name")
            }
            Self::SlotCountMismatch { capacity } => {
                write!(f, "slot arrays do not all hold {capacity} entries")
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
