//! # Charity Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Deployment and honest-proposer helpers
//! ├── integration/      # Full flows through LedgerService and validators
//! ├── exploits/         # Forged commitments, replays, identifier collisions
//! └── properties.rs     # proptest properties of the three operations
//!
//! tests/benches/
//! └── transition_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ledger-tests
//!
//! # By category
//! cargo test -p ledger-tests integration::
//! cargo test -p ledger-tests exploits::
//! cargo test -p ledger-tests properties::
//!
//! # Benchmarks
//! cargo bench -p ledger-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
