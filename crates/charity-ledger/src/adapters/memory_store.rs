use crate::domain::{Hash, LedgerError, StateOutput};
use crate::ports::SettlementStore;
use std::sync::RwLock;

struct Inner {
    current: StateOutput,
    commitment: Hash,
    history: Vec<Hash>,
}

/// In-memory implementation of SettlementStore for testing
pub struct InMemorySettlementStore {
    inner: RwLock<Inner>,
}

impl InMemorySettlementStore {
    /// Start from the genesis output created at contract deployment.
    pub fn new(genesis: StateOutput) -> Self {
        let commitment = genesis.commitment();
        Self {
            inner: RwLock::new(Inner {
                current: genesis,
                commitment,
                history: vec![commitment],
            }),
        }
    }

    /// Commitments of every output that has been current, oldest first.
    pub fn history(&self) -> Result<Vec<Hash>, LedgerError> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner.history.clone())
    }
}

impl SettlementStore for InMemorySettlementStore {
    fn load(&self) -> Result<StateOutput, LedgerError> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner.current.clone())
    }

    fn publish(&self, spent: &Hash, next: StateOutput) -> Result<(), LedgerError> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        if &inner.commitment != spent {
            return Err(LedgerError::Store(format!(
                "output {} already spent",
                hex::encode(spent)
            )));
        }

        let commitment = next.commitment();
        inner.current = next;
        inner.commitment = commitment;
        inner.history.push(commitment);
        Ok(())
    }
}

fn lock_poisoned() -> LedgerError {
    LedgerError::Store("lock poisoned".to_string())
}
