use crate::domain::{Hash, LedgerError, LedgerState, Transition, TransitionKind};

/// A transition together with the commitment its spending transaction
/// declares for the next state unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionRequest {
    pub transition: Transition,
    pub declared_commitment: Hash,
}

impl TransitionRequest {
    pub fn new(transition: Transition, declared_commitment: Hash) -> Self {
        Self {
            transition,
            declared_commitment,
        }
    }
}

/// Record of an accepted transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionReceipt {
    pub kind: TransitionKind,
    /// Commitment of the state unit that was spent.
    pub previous_commitment: Hash,
    /// Commitment of the state unit that is now current.
    pub commitment: Hash,
}

/// Primary API for ledger callers.
pub trait LedgerApi: Send + Sync {
    /// Validate a transition against the current state and, on acceptance,
    /// make its result current.
    fn submit(&self, request: TransitionRequest) -> Result<TransitionReceipt, LedgerError>;

    fn current_state(&self) -> Result<LedgerState, LedgerError>;

    fn current_commitment(&self) -> Result<Hash, LedgerError>;
}
