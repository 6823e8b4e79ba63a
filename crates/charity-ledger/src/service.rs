//! # Ledger Service
//!
//! Drives one transition at a time against the settlement layer's current
//! state unit:
//!
//! 1. Load the current output (state + carried value)
//! 2. Run the transition engine with the declared commitment
//! 3. Publish the new output, only on acceptance
//! 4. Record statistics and audit the accepted state
//!
//! A rejection at any step leaves the current output untouched.

use crate::adapters::InMemorySettlementStore;
use crate::domain::invariants::check_all_invariants;
use crate::domain::{
    Hash, LedgerConfig, LedgerError, LedgerState, SettlementContext, StateOutput,
    TransitionEngine,
};
use crate::ports::{LedgerApi, SettlementStore, TransitionReceipt, TransitionRequest};

use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

/// Statistics for the ledger service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Requests received.
    pub submitted: u64,
    /// Transitions accepted and published.
    pub accepted: u64,
    /// Rejected because an operation precondition failed.
    pub rejected_precondition: u64,
    /// Rejected because the declared commitment disagreed.
    pub rejected_commitment: u64,
    /// Rejected for any other reason (decoding, store).
    pub rejected_other: u64,
    /// Accepted states that failed an audit invariant.
    pub audit_violations: u64,
}

/// The main ledger service.
pub struct LedgerService<S: SettlementStore> {
    engine: TransitionEngine,
    store: S,
    stats: Mutex<ServiceStats>,
}

impl<S: SettlementStore> LedgerService<S> {
    pub fn new(store: S, config: LedgerConfig) -> Self {
        Self {
            engine: TransitionEngine::new(config),
            store,
            stats: Mutex::new(ServiceStats::default()),
        }
    }

    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get current service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.lock().clone()
    }

    fn submit_internal(
        &self,
        request: &TransitionRequest,
    ) -> Result<(TransitionReceipt, LedgerState), LedgerError> {
        let current = self.store.load()?;
        let previous_commitment = current.commitment();
        let ctx = SettlementContext::new(current.value, request.declared_commitment);

        let next = self
            .engine
            .execute(&current.state, &request.transition, &ctx)?;

        self.store.publish(
            &previous_commitment,
            StateOutput::new(current.value, next.clone()),
        )?;

        let receipt = TransitionReceipt {
            kind: request.transition.kind(),
            previous_commitment,
            commitment: request.declared_commitment,
        };
        Ok((receipt, next))
    }

    fn record_rejection(&self, err: &LedgerError) {
        let mut stats = self.stats.lock();
        if err.is_precondition_failure() {
            stats.rejected_precondition += 1;
        } else if err.is_commitment_mismatch() {
            stats.rejected_commitment += 1;
        } else {
            stats.rejected_other += 1;
        }
    }

    fn audit(&self, state: &LedgerState) {
        let check = check_all_invariants(state);
        if check.is_valid() {
            return;
        }
        for violation in check.violations() {
            warn!(violation = %violation, "Accepted state breaks audit invariant");
        }
        self.stats.lock().audit_violations += 1;
    }
}

impl<S: SettlementStore> LedgerApi for LedgerService<S> {
    #[instrument(skip(self, request), fields(kind = %request.transition.kind()))]
    fn submit(&self, request: TransitionRequest) -> Result<TransitionReceipt, LedgerError> {
        self.stats.lock().submitted += 1;

        match self.submit_internal(&request) {
            Ok((receipt, next)) => {
                self.stats.lock().accepted += 1;
                info!(
                    previous = %hex::encode(receipt.previous_commitment),
                    commitment = %hex::encode(receipt.commitment),
                    "Transition accepted"
                );
                self.audit(&next);
                Ok(receipt)
            }
            Err(err) => {
                self.record_rejection(&err);
                warn!(error = %err, "Transition rejected");
                Err(err)
            }
        }
    }

    fn current_state(&self) -> Result<LedgerState, LedgerError> {
        Ok(self.store.load()?.state)
    }

    fn current_commitment(&self) -> Result<Hash, LedgerError> {
        let commitment = self.store.load()?.commitment();
        debug!(commitment = %hex::encode(commitment), "Current commitment");
        Ok(commitment)
    }
}

/// Deploy a ledger over an in-memory store: build the genesis state from
/// `names` and hold `value` in it.
pub fn create_in_memory_service(
    names: Vec<Vec<u8>>,
    value: u64,
    config: LedgerConfig,
) -> Result<LedgerService<InMemorySettlementStore>, LedgerError> {
    let genesis = LedgerState::with_config(names, &config)?;
    let store = InMemorySettlementStore::new(StateOutput::new(value, genesis));
    Ok(LedgerService::new(store, config))
}
