//! # Commitment Verifier
//!
//! Final gate of every transition: the digest recomputed from the candidate
//! state must equal the digest the spending transaction declares.

use super::{Hash, LedgerError};

pub struct CommitmentVerifier;

impl CommitmentVerifier {
    /// Digest equality.
    pub fn verify(recomputed: &Hash, declared: &Hash) -> bool {
        recomputed == declared
    }

    /// Same check as [`verify`](Self::verify), as a rejection.
    pub fn ensure(recomputed: &Hash, declared: &Hash) -> Result<(), LedgerError> {
        if Self::verify(recomputed, declared) {
            Ok(())
        } else {
            Err(LedgerError::CommitmentMismatch {
                expected: *declared,
                actual: *recomputed,
            })
        }
    }
}
