//! # Transition Engine
//!
//! The three ledger operations as pure functions from a current state to a
//! candidate next state.
//!
//! ## Atomicity
//!
//! Every operation runs against a clone of the current state. The clone is
//! returned only when the operation's preconditions hold and, for
//! [`TransitionEngine::execute`], the recomputed commitment equals the
//! declared one. The input state is never touched, so a rejected transition
//! has no effect.
//!
//! ## Slot Resolution
//!
//! Charity identifiers resolve through [`CharityRegistry::resolve`] under the
//! configured [`MatchPolicy`]. With `AllMatches` every matching slot is
//! mutated, which is observable only when two names share their leading
//! [`CHARITY_ID_LEN`](super::CHARITY_ID_LEN) bytes.
//!
//! [`CharityRegistry::resolve`]: super::CharityRegistry::resolve

use super::codec::{deserialize_state, state_commitment};
use super::{
    CharityId, CommitmentVerifier, Donation, ExpenditureProof, Hash, LedgerConfig, LedgerError,
    LedgerState, MatchPolicy, SettlementContext, SlotKind,
};
use std::fmt;
use tracing::{debug, instrument};

/// A requested state change and its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Record a donation and credit it to the charity's received total.
    AddDonation { charity_id: CharityId, amount: u128 },
    /// Record an expenditure proof, snapshotting the charity's spent total.
    AddExpenditureProof {
        charity_id: CharityId,
        expenditure_amount: u128,
        proof: Vec<u8>,
    },
    /// Bind a donation slot to an expenditure-proof slot when amounts agree.
    MatchDonationWithExpenditureProof {
        donation_index: usize,
        proof_index: usize,
    },
}

impl Transition {
    pub fn kind(&self) -> TransitionKind {
        match self {
            Self::AddDonation { .. } => TransitionKind::AddDonation,
            Self::AddExpenditureProof { .. } => TransitionKind::AddExpenditureProof,
            Self::MatchDonationWithExpenditureProof { .. } => {
                TransitionKind::MatchDonationWithExpenditureProof
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    AddDonation,
    AddExpenditureProof,
    MatchDonationWithExpenditureProof,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddDonation => write!(f, "add_donation"),
            Self::AddExpenditureProof => write!(f, "add_expenditure_proof"),
            Self::MatchDonationWithExpenditureProof => {
                write!(f, "match_donation_with_expenditure_proof")
            }
        }
    }
}

/// Applies transitions under a fixed [`LedgerConfig`].
#[derive(Clone, Debug, Default)]
pub struct TransitionEngine {
    config: LedgerConfig,
}

impl TransitionEngine {
    pub fn new(config: LedgerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Apply a transition to a working copy of `current`.
    ///
    /// Checks only the operation's own preconditions. Use
    /// [`execute`](Self::execute) to also enforce the commitment.
    pub fn apply(
        &self,
        current: &LedgerState,
        transition: &Transition,
    ) -> Result<LedgerState, LedgerError> {
        if current.capacity() != self.config.capacity {
            return Err(LedgerError::CapacityMismatch {
                expected: self.config.capacity,
                actual: current.capacity(),
            });
        }

        let mut next = current.clone();
        match transition {
            Transition::AddDonation { charity_id, amount } => {
                self.add_donation(&mut next, charity_id, *amount)?;
            }
            Transition::AddExpenditureProof {
                charity_id,
                expenditure_amount,
                proof,
            } => {
                self.add_expenditure_proof(&mut next, charity_id, *expenditure_amount, proof)?;
            }
            Transition::MatchDonationWithExpenditureProof {
                donation_index,
                proof_index,
            } => {
                self.match_donation_with_expenditure_proof(
                    &mut next,
                    *donation_index,
                    *proof_index,
                )?;
            }
        }
        Ok(next)
    }

    /// Apply a transition and require the resulting output to hash to the
    /// declared commitment.
    #[instrument(skip(self, current, transition, ctx), fields(kind = %transition.kind()))]
    pub fn execute(
        &self,
        current: &LedgerState,
        transition: &Transition,
        ctx: &SettlementContext,
    ) -> Result<LedgerState, LedgerError> {
        let next = self.apply(current, transition)?;
        let recomputed = state_commitment(&next, ctx.carried_value);
        CommitmentVerifier::ensure(&recomputed, &ctx.declared_commitment)?;

        debug!(
            commitment = %hex::encode(recomputed),
            carried_value = ctx.carried_value,
            "Transition accepted"
        );
        Ok(next)
    }

    /// Validator entry point: decode the declared state, then
    /// [`execute`](Self::execute) against it.
    ///
    /// A declared state that is not a canonical encoding is rejected before
    /// any operation runs.
    pub fn execute_encoded(
        &self,
        declared_state: &[u8],
        transition: &Transition,
        ctx: &SettlementContext,
    ) -> Result<LedgerState, LedgerError> {
        let current = deserialize_state(declared_state)?;
        self.execute(&current, transition, ctx)
    }

    /// Compute the next state and the commitment a spending transaction must
    /// declare for it.
    pub fn propose(
        &self,
        current: &LedgerState,
        transition: &Transition,
        carried_value: u64,
    ) -> Result<(LedgerState, Hash), LedgerError> {
        let next = self.apply(current, transition)?;
        let commitment = state_commitment(&next, carried_value);
        Ok((next, commitment))
    }

    fn add_donation(
        &self,
        state: &mut LedgerState,
        charity_id: &CharityId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let slots = state
            .registry()
            .resolve(charity_id, self.config.match_policy)?;

        for slot in slots {
            state.set_donation(
                slot,
                Donation {
                    amount,
                    charity_id: charity_id.clone(),
                },
            )?;
            state.registry_mut().credit_received(slot, amount)?;
        }
        Ok(())
    }

    fn add_expenditure_proof(
        &self,
        state: &mut LedgerState,
        charity_id: &CharityId,
        expenditure_amount: u128,
        proof: &[u8],
    ) -> Result<(), LedgerError> {
        let slots = state
            .registry()
            .resolve(charity_id, self.config.match_policy)?;

        for slot in slots {
            // Snapshot of the spent total before this proof; the proof's own
            // amount is only counted once a donation is matched to it.
            let total_expenditure = state
                .registry()
                .get(slot)
                .map_or(0, |charity| charity.amount_spent);
            state.set_expenditure_proof(
                slot,
                ExpenditureProof {
                    expenditure_amount,
                    proof: proof.to_vec(),
                    total_expenditure,
                },
            )?;
        }
        Ok(())
    }

    fn match_donation_with_expenditure_proof(
        &self,
        state: &mut LedgerState,
        donation_index: usize,
        proof_index: usize,
    ) -> Result<(), LedgerError> {
        let capacity = state.capacity();
        let donation = state
            .donation(donation_index)
            .cloned()
            .ok_or(LedgerError::InvalidIndex {
                kind: SlotKind::Donation,
                index: donation_index,
                capacity,
            })?;
        let expenditure_amount = state
            .expenditure_proof(proof_index)
            .map(|proof| proof.expenditure_amount)
            .ok_or(LedgerError::InvalidIndex {
                kind: SlotKind::ExpenditureProof,
                index: proof_index,
                capacity,
            })?;

        let slots = state.registry().matching_slots(&donation.charity_id);
        if self.config.match_policy == MatchPolicy::ExactlyOne && slots.len() > 1 {
            return Err(LedgerError::AmbiguousCharityId {
                charity_id: donation.charity_id,
                matches: slots.len(),
            });
        }
        if slots.is_empty() || donation.amount != expenditure_amount {
            return Err(LedgerError::NoQualifyingMatch {
                donation_index,
                proof_index,
            });
        }

        for slot in slots {
            state.registry_mut().credit_spent(slot, donation.amount)?;
        }
        Ok(())
    }
}
