pub mod codec;
pub mod commitment;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod registry;
pub mod state;
pub mod transition;

pub use codec::{
    commit, deserialize_state, encode_output, hash256, serialize_state, state_commitment,
    StateOutput,
};
pub use commitment::*;
pub use entities::*;
pub use errors::*;
pub use registry::*;
pub use state::*;
pub use transition::*;
