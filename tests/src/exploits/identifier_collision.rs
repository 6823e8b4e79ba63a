//! # Identifier Collision
//!
//! Identifiers are the first 32 bytes of a name. Two names sharing that
//! prefix share an identifier, and a donation to one reaches both slots under
//! the default policy. `MatchPolicy::ExactlyOne` rejects such transitions.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use charity_ledger::{LedgerConfig, LedgerError, MatchPolicy};

    const PREFIX: &str = "shared_prefix_exactly_32_bytes__";
    const TWIN_A: &str = "shared_prefix_exactly_32_bytes__A";
    const TWIN_B: &str = "shared_prefix_exactly_32_bytes__B";

    #[test]
    fn test_prefix_is_identifier() {
        assert_eq!(PREFIX.len(), 32);
        assert_eq!(id_of(TWIN_A), id_of(TWIN_B));
        assert_eq!(id_of(TWIN_A), id_of(PREFIX));
    }

    #[test]
    fn test_all_matches_credits_both_twins() {
        let ledger = Ledger::deploy(&[TWIN_A, "honest", TWIN_B]);
        ledger.submit(donate(&id_of(TWIN_A), 50)).unwrap();

        let state = ledger.state();
        assert_eq!(state.registry().get(0).unwrap().amount_received, 50);
        assert_eq!(state.registry().get(2).unwrap().amount_received, 50);
        assert_eq!(state.donation(2).unwrap().amount, 50);
    }

    #[test]
    fn test_all_matches_match_spends_both_twins() {
        let ledger = Ledger::deploy(&[TWIN_A, TWIN_B]);
        ledger.submit(donate(&id_of(TWIN_A), 4)).unwrap();
        ledger.submit(prove(&id_of(TWIN_A), 4, b"p")).unwrap();
        ledger.submit(match_pair(0, 1)).unwrap();

        let state = ledger.state();
        assert_eq!(state.registry().get(0).unwrap().amount_spent, 4);
        assert_eq!(state.registry().get(1).unwrap().amount_spent, 4);
    }

    #[test]
    fn test_exactly_one_rejects_twins() {
        let config = LedgerConfig::with_capacity(3).with_match_policy(MatchPolicy::ExactlyOne);
        let ledger = Ledger::deploy_with(&[TWIN_A, "honest", TWIN_B], config);
        let before = ledger.state();

        let err = ledger.submit(donate(&id_of(TWIN_B), 50)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::AmbiguousCharityId { matches: 2, .. }
        ));
        assert_eq!(ledger.state(), before);

        ledger.submit(donate(&id_of("honest"), 50)).unwrap();
        assert_eq!(ledger.state().registry().get(1).unwrap().amount_received, 50);
    }
}
