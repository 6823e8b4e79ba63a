//! # Double Match
//!
//! Nothing marks a donation or an expenditure proof as consumed. Matching the
//! same pair again credits `amount_spent` again. The ledger keeps this
//! behavior; the audit layer reports the resulting overspend.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use charity_ledger::invariants::{check_all_invariants, InvariantViolation};

    #[test]
    fn test_repeated_match_double_counts() {
        let ledger = Ledger::deploy(&["alice", "bob"]);
        ledger.submit(donate(&id_of("alice"), 100)).unwrap();
        ledger.submit(prove(&id_of("alice"), 100, b"proof1")).unwrap();

        ledger.submit(match_pair(0, 0)).unwrap();
        assert_eq!(ledger.state().registry().get(0).unwrap().amount_spent, 100);

        ledger.submit(match_pair(0, 0)).unwrap();
        let state = ledger.state();
        let charity = state.registry().get(0).unwrap();
        assert_eq!(charity.amount_spent, 200);
        assert_eq!(charity.amount_received, 100);

        assert_eq!(
            check_all_invariants(&state).violations(),
            &[InvariantViolation::SpentExceedsReceived {
                slot: 0,
                received: 100,
                spent: 200,
            }]
        );
        assert_eq!(ledger.service.stats().audit_violations, 1);
    }

    #[test]
    fn test_one_proof_matches_many_donations() {
        let ledger = Ledger::deploy(&["alice", "bob"]);
        ledger.submit(prove(&id_of("bob"), 5, b"one-invoice")).unwrap();

        for _ in 0..3 {
            ledger.submit(donate(&id_of("alice"), 5)).unwrap();
            ledger.submit(match_pair(0, 1)).unwrap();
        }

        let state = ledger.state();
        let alice = state.registry().get(0).unwrap();
        assert_eq!(alice.amount_received, 15);
        assert_eq!(alice.amount_spent, 15);
    }

    #[test]
    fn test_spent_can_exceed_received_via_matches() {
        let ledger = Ledger::deploy(&["alice"]);
        ledger.submit(donate(&id_of("alice"), 1)).unwrap();
        ledger.submit(prove(&id_of("alice"), 1, b"p")).unwrap();

        for _ in 0..10 {
            ledger.submit(match_pair(0, 0)).unwrap();
        }

        let charity = ledger.state().registry().get(0).unwrap().clone();
        assert_eq!(charity.amount_spent, 10);
        assert!(charity.amount_spent > charity.amount_received);
    }
}
