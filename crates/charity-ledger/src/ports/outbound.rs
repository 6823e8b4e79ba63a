use crate::domain::{Hash, LedgerError, StateOutput};

/// The settlement layer's view of the single current state unit.
///
/// Only one spend of a given unit may succeed. `publish` replaces the current
/// output only if its commitment still equals `spent`; implementations must
/// make that check and the replacement one atomic step.
pub trait SettlementStore: Send + Sync {
    fn load(&self) -> Result<StateOutput, LedgerError>;

    fn publish(&self, spent: &Hash, next: StateOutput) -> Result<(), LedgerError>;
}
