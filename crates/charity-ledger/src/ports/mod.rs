//! # Ports
//!
//! - `inbound`: what callers submit and observe (`LedgerApi`)
//! - `outbound`: where the current state unit lives (`SettlementStore`)

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
