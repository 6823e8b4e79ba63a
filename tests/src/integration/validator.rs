//! # Independent Validators
//!
//! Every observer holds only the encoded declared state, the transition and
//! the settlement context. Two validators must reach the same decision and,
//! on acceptance, the same next state.

use charity_ledger::{
    serialize_state, LedgerConfig, LedgerError, LedgerState, SettlementContext, Transition,
    TransitionEngine,
};

/// Result of one validator pass, reduced to what consensus compares.
pub fn validate(
    config: &LedgerConfig,
    declared_state: &[u8],
    transition: &Transition,
    ctx: &SettlementContext,
) -> Result<Vec<u8>, LedgerError> {
    let engine = TransitionEngine::new(config.clone());
    let next: LedgerState = engine.execute_encoded(declared_state, transition, ctx)?;
    Ok(serialize_state(&next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn test_validators_agree_on_chain() {
        let config = LedgerConfig::with_capacity(3);
        let proposer = TransitionEngine::new(config.clone());
        let mut state = LedgerState::new(names(&["a", "b", "c"]), 3).unwrap();

        let steps = vec![
            donate(&id_of("b"), 40),
            donate(&id_of("c"), 9),
            prove(&id_of("b"), 40, b"bank-statement"),
            match_pair(1, 1),
            donate(&id_of("b"), 1),
        ];

        for step in steps {
            let (next, commitment) = proposer.propose(&state, &step, CARRIED_VALUE).unwrap();
            let declared = serialize_state(&state);
            let ctx = SettlementContext::new(CARRIED_VALUE, commitment);

            let first = validate(&config, &declared, &step, &ctx).unwrap();
            let second = validate(&config, &declared, &step, &ctx).unwrap();

            assert_eq!(first, second);
            assert_eq!(first, serialize_state(&next));
            state = next;
        }

        assert_eq!(state.registry().get(1).unwrap().amount_received, 41);
        assert_eq!(state.registry().get(1).unwrap().amount_spent, 40);
    }

    #[test]
    fn test_validators_agree_on_rejection() {
        let config = LedgerConfig::with_capacity(2);
        let state = LedgerState::new(names(&["a", "b"]), 2).unwrap();
        let declared = serialize_state(&state);
        let ctx = SettlementContext::new(CARRIED_VALUE, [0x42; 32]);
        let step = donate(&id_of("a"), 1);

        let first = validate(&config, &declared, &step, &ctx).unwrap_err();
        let second = validate(&config, &declared, &step, &ctx).unwrap_err();
        assert_eq!(first, second);
        assert!(first.is_commitment_mismatch());
    }

    #[test]
    fn test_validator_rejects_mismatched_capacity() {
        let state = LedgerState::new(names(&["a", "b"]), 2).unwrap();
        let declared = serialize_state(&state);
        let ctx = SettlementContext::new(CARRIED_VALUE, [0; 32]);

        let err = validate(
            &LedgerConfig::with_capacity(100),
            &declared,
            &donate(&id_of("a"), 1),
            &ctx,
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::CapacityMismatch { .. }));
    }
}
