//! # charity-ledger
//!
//! Fixed-capacity charity donation ledger whose every state transition is
//! bound to a hash commitment declared by the spending transaction.
//!
//! ## Role in System
//!
//! - **Consensus logic**: any observer re-runs a transition and must reach the
//!   same accept/reject decision and the same next-state commitment
//! - **Single state unit**: the settlement layer holds exactly one current
//!   output; a transition spends it and creates the next one
//! - **Record keeping only**: expenditure proofs are stored, not verified
//!
//! ## Transition Flow
//!
//! ```text
//! TransitionRequest ──→ [LedgerService] ──load──→ [SettlementStore]
//!                             │
//!                             ↓
//!                    [TransitionEngine]
//!                     apply on a copy  ──→ [CharityRegistry]
//!                             │
//!                             ↓
//!                     [StateCodec] serialize + hash256
//!                             │
//!                             ↓
//!                  [CommitmentVerifier] ──mismatch──→ reject
//!                             │
//!                             ↓ match
//!                     publish next output
//! ```
//!
//! ## Operations
//!
//! | Operation | Precondition | Effect |
//! |-----------|--------------|--------|
//! | `AddDonation` | id matches a slot | record donation, `amount_received += amount` |
//! | `AddExpenditureProof` | id matches a slot | record proof, snapshot `amount_spent` |
//! | `MatchDonationWithExpenditureProof` | indices in range, amounts equal | `amount_spent += amount` |
//!
//! Every operation additionally requires the recomputed commitment to equal
//! the declared one.
//!
//! ## Arithmetic
//!
//! Totals are `u128` and use checked addition. An overflowing credit rejects
//! the transition with `ArithmeticOverflow`.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
pub use service::{create_in_memory_service, LedgerService, ServiceStats};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
