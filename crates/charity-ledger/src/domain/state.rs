//! # Ledger State
//!
//! The aggregate every transition reads and replaces: charity table, donation
//! slots, expenditure-proof slots and the immutable name table.
//!
//! All four arrays have exactly `capacity` entries for the life of the
//! contract. Nothing outside this crate can resize them; transitions only
//! overwrite slots.

use super::{
    CharityId, CharityRegistry, CodecError, Donation, ExpenditureProof, LedgerConfig, LedgerError,
    SlotKind,
};
use serde::{Deserialize, Serialize};

/// Deserializing goes through [`LedgerState::from_parts`], so serde input is
/// held to the same checks as the binary decoder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateParts")]
pub struct LedgerState {
    registry: CharityRegistry,
    donations: Vec<Donation>,
    expenditure_proofs: Vec<ExpenditureProof>,
    names: Vec<Vec<u8>>,
}

#[derive(Deserialize)]
struct StateParts {
    registry: CharityRegistry,
    donations: Vec<Donation>,
    expenditure_proofs: Vec<ExpenditureProof>,
    names: Vec<Vec<u8>>,
}

impl TryFrom<StateParts> for LedgerState {
    type Error = CodecError;

    fn try_from(parts: StateParts) -> Result<Self, Self::Error> {
        let capacity = parts.names.len();
        Self::from_parts(
            parts.registry,
            parts.donations,
            parts.expenditure_proofs,
            parts.names,
            capacity,
        )
    }
}

impl LedgerState {
    /// Construct the initial state from the name table.
    ///
    /// `names.len()` must equal `capacity`. Each name's leading bytes become
    /// the identifier of the charity in the same slot.
    pub fn new(names: Vec<Vec<u8>>, capacity: usize) -> Result<Self, LedgerError> {
        if names.len() != capacity {
            return Err(LedgerError::CapacityMismatch {
                expected: capacity,
                actual: names.len(),
            });
        }

        Ok(Self {
            registry: CharityRegistry::from_names(&names),
            donations: vec![Donation::default(); capacity],
            expenditure_proofs: vec![ExpenditureProof::default(); capacity],
            names,
        })
    }

    /// Construct the initial state using the configured capacity.
    pub fn with_config(names: Vec<Vec<u8>>, config: &LedgerConfig) -> Result<Self, LedgerError> {
        Self::new(names, config.capacity)
    }

    /// Reassemble a decoded state, rejecting anything construction could not
    /// have produced.
    pub(crate) fn from_parts(
        registry: CharityRegistry,
        donations: Vec<Donation>,
        expenditure_proofs: Vec<ExpenditureProof>,
        names: Vec<Vec<u8>>,
        capacity: usize,
    ) -> Result<Self, CodecError> {
        let lengths = [
            ("charities", registry.len()),
            ("donations", donations.len()),
            ("expenditure proofs", expenditure_proofs.len()),
            ("names", names.len()),
        ];
        for (kind, actual) in lengths {
            if actual != capacity {
                return Err(CodecError::LengthMismatch {
                    kind,
                    expected: capacity,
                    actual,
                });
            }
        }

        for (slot, (charity, name)) in registry.iter().zip(&names).enumerate() {
            if charity.id != CharityId::from_name(name) {
                return Err(CodecError::IdNameMismatch { slot });
            }
        }

        Ok(Self {
            registry,
            donations,
            expenditure_proofs,
            names,
        })
    }

    /// Number of slots (N).
    pub fn capacity(&self) -> usize {
        self.names.len()
    }

    pub fn registry(&self) -> &CharityRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut CharityRegistry {
        &mut self.registry
    }

    pub fn donations(&self) -> &[Donation] {
        &self.donations
    }

    pub fn expenditure_proofs(&self) -> &[ExpenditureProof] {
        &self.expenditure_proofs
    }

    pub fn names(&self) -> &[Vec<u8>] {
        &self.names
    }

    pub fn donation(&self, index: usize) -> Option<&Donation> {
        self.donations.get(index)
    }

    pub fn expenditure_proof(&self, index: usize) -> Option<&ExpenditureProof> {
        self.expenditure_proofs.get(index)
    }

    /// Overwrite a donation slot.
    pub(crate) fn set_donation(
        &mut self,
        index: usize,
        donation: Donation,
    ) -> Result<(), LedgerError> {
        let capacity = self.capacity();
        let slot = self
            .donations
            .get_mut(index)
            .ok_or(LedgerError::InvalidIndex {
                kind: SlotKind::Donation,
                index,
                capacity,
            })?;
        *slot = donation;
        Ok(())
    }

    pub(crate) fn set_expenditure_proof(
        &mut self,
        index: usize,
        proof: ExpenditureProof,
    ) -> Result<(), LedgerError> {
        let capacity = self.capacity();
        let slot = self
            .expenditure_proofs
            .get_mut(index)
            .ok_or(LedgerError::InvalidIndex {
                kind: SlotKind::ExpenditureProof,
                index,
                capacity,
            })?;
        *slot = proof;
        Ok(())
    }
}
