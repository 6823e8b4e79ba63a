//! # Test Fixtures
//!
//! Deployment helpers and an honest proposer: given the current output, it
//! computes the commitment a well-formed spending transaction declares.

use charity_ledger::{
    create_in_memory_service, CharityId, InMemorySettlementStore, LedgerApi, LedgerConfig,
    LedgerError, LedgerService, LedgerState, SettlementStore, Transition, TransitionReceipt,
    TransitionRequest,
};

/// Value held by the state unit in every fixture.
pub const CARRIED_VALUE: u64 = 1;

pub fn names(list: &[&str]) -> Vec<Vec<u8>> {
    list.iter().map(|n| n.as_bytes().to_vec()).collect()
}

/// Identifier the ledger derives for `name`.
pub fn id_of(name: &str) -> CharityId {
    CharityId::from_name(name.as_bytes())
}

pub fn donate(id: &CharityId, amount: u128) -> Transition {
    Transition::AddDonation {
        charity_id: id.clone(),
        amount,
    }
}

pub fn prove(id: &CharityId, expenditure_amount: u128, proof: &[u8]) -> Transition {
    Transition::AddExpenditureProof {
        charity_id: id.clone(),
        expenditure_amount,
        proof: proof.to_vec(),
    }
}

pub fn match_pair(donation_index: usize, proof_index: usize) -> Transition {
    Transition::MatchDonationWithExpenditureProof {
        donation_index,
        proof_index,
    }
}

/// A deployed ledger over the in-memory settlement store.
pub struct Ledger {
    pub service: LedgerService<InMemorySettlementStore>,
}

impl Ledger {
    pub fn deploy(list: &[&str]) -> Self {
        Self::deploy_with(list, LedgerConfig::with_capacity(list.len()))
    }

    pub fn deploy_with(list: &[&str], config: LedgerConfig) -> Self {
        ledger_telemetry::init_test_logging();
        let service = create_in_memory_service(names(list), CARRIED_VALUE, config)
            .expect("fixture names match capacity");
        Self { service }
    }

    pub fn state(&self) -> LedgerState {
        self.service.current_state().expect("in-memory store")
    }

    /// Request carrying the commitment an honest proposer would declare.
    pub fn honest(&self, transition: Transition) -> Result<TransitionRequest, LedgerError> {
        let current = self.service.store().load()?;
        let (_, commitment) =
            self.service
                .engine()
                .propose(&current.state, &transition, current.value)?;
        Ok(TransitionRequest::new(transition, commitment))
    }

    /// Propose honestly and submit.
    pub fn submit(&self, transition: Transition) -> Result<TransitionReceipt, LedgerError> {
        let request = self.honest(transition)?;
        self.service.submit(request)
    }
}
