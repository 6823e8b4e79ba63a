//! # State Codec
//!
//! Canonical serialization of [`LedgerState`] and the hash commitment over
//! the output that carries it.
//!
//! ## State Encoding
//!
//! RLP list, fields in declaration order:
//!
//! ```text
//! [capacity, [charity; N], [donation; N], [proof; N], [name; N]]
//! charity  = [id, amount_received, amount_spent]
//! donation = [amount, charity_id]
//! proof    = [expenditure_amount, proof, total_expenditure]
//! ```
//!
//! Decoding accepts only the canonical form: the decoded state is re-encoded
//! and must reproduce the input byte for byte.
//!
//! ## Commitment Carrier
//!
//! ```text
//! value (u64 LE) || compact_size(len(state)) || state
//! ```
//!
//! The commitment is `hash256` (double SHA-256) over the carrier bytes. The
//! settlement layer hashes the same bytes when it assembles the spending
//! transaction, so both sides agree on one digest per (state, value).

use super::{
    Charity, CharityId, CharityRegistry, CodecError, Donation, ExpenditureProof, Hash,
    LedgerState,
};
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use sha2::{Digest, Sha256};

// =============================================================================
// RLP IMPLEMENTATIONS
// =============================================================================

impl Encodable for Charity {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        s.append(&self.id.as_bytes().to_vec());
        s.append(&self.amount_received);
        s.append(&self.amount_spent);
    }
}

impl Decodable for Charity {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        expect_list_len(rlp, 3)?;
        Ok(Self {
            id: CharityId::new(rlp.val_at::<Vec<u8>>(0)?),
            amount_received: rlp.val_at(1)?,
            amount_spent: rlp.val_at(2)?,
        })
    }
}

impl Encodable for Donation {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(2);
        s.append(&self.amount);
        s.append(&self.charity_id.as_bytes().to_vec());
    }
}

impl Decodable for Donation {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        expect_list_len(rlp, 2)?;
        Ok(Self {
            amount: rlp.val_at(0)?,
            charity_id: CharityId::new(rlp.val_at::<Vec<u8>>(1)?),
        })
    }
}

impl Encodable for ExpenditureProof {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        s.append(&self.expenditure_amount);
        s.append(&self.proof);
        s.append(&self.total_expenditure);
    }
}

impl Decodable for ExpenditureProof {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        expect_list_len(rlp, 3)?;
        Ok(Self {
            expenditure_amount: rlp.val_at(0)?,
            proof: rlp.val_at(1)?,
            total_expenditure: rlp.val_at(2)?,
        })
    }
}

fn expect_list_len(rlp: &Rlp, len: usize) -> Result<(), DecoderError> {
    if rlp.item_count()? != len {
        return Err(DecoderError::RlpIncorrectListLen);
    }
    Ok(())
}

// =============================================================================
// STATE ENCODING
// =============================================================================

/// Serialize a state into its canonical byte form.
pub fn serialize_state(state: &LedgerState) -> Vec<u8> {
    let capacity = state.capacity();
    let mut s = RlpStream::new_list(5);
    s.append(&(capacity as u64));

    s.begin_list(capacity);
    for charity in state.registry().iter() {
        s.append(charity);
    }

    s.begin_list(capacity);
    for donation in state.donations() {
        s.append(donation);
    }

    s.begin_list(capacity);
    for proof in state.expenditure_proofs() {
        s.append(proof);
    }

    s.begin_list(capacity);
    for name in state.names() {
        s.append(name);
    }

    s.out().to_vec()
}

/// Decode a declared state, accepting only canonical encodings of states
/// that construction and transitions could have produced.
pub fn deserialize_state(bytes: &[u8]) -> Result<LedgerState, CodecError> {
    let rlp = Rlp::new(bytes);
    expect_list_len(&rlp, 5)?;

    let capacity: u64 = rlp.val_at(0)?;
    let capacity = usize::try_from(capacity)
        .map_err(|_| CodecError::Malformed(format!("capacity {capacity} out of range")))?;

    let charities: Vec<Charity> = rlp.list_at(1)?;
    let donations: Vec<Donation> = rlp.list_at(2)?;
    let proofs: Vec<ExpenditureProof> = rlp.list_at(3)?;
    let names: Vec<Vec<u8>> = rlp.list_at(4)?;

    let state = LedgerState::from_parts(
        CharityRegistry::from_charities(charities),
        donations,
        proofs,
        names,
        capacity,
    )?;

    if serialize_state(&state) != bytes {
        return Err(CodecError::NonCanonical);
    }

    Ok(state)
}

// =============================================================================
// COMMITMENT
// =============================================================================

/// A state unit as the settlement layer sees it: held value plus state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateOutput {
    pub value: u64,
    pub state: LedgerState,
}

impl StateOutput {
    pub fn new(value: u64, state: LedgerState) -> Self {
        Self { value, state }
    }

    /// Carrier bytes hashed into the commitment.
    pub fn encode(&self) -> Vec<u8> {
        encode_output(self.value, &self.state)
    }

    /// Commitment a spending transaction must declare for this output.
    pub fn commitment(&self) -> Hash {
        commit(&self.encode())
    }
}

/// Assemble the commitment carrier for `state` holding `value`.
pub fn encode_output(value: u64, state: &LedgerState) -> Vec<u8> {
    let payload = serialize_state(state);
    let mut out = Vec::with_capacity(payload.len() + 17);
    out.extend_from_slice(&value.to_le_bytes());
    write_compact_size(&mut out, payload.len() as u64);
    out.extend(payload);
    out
}

/// Commitment over already-assembled carrier bytes.
pub fn commit(carrier: &[u8]) -> Hash {
    hash256(carrier)
}

/// Commitment of `state` carried with `value`.
pub fn state_commitment(state: &LedgerState, value: u64) -> Hash {
    commit(&encode_output(value, state))
}

/// Double SHA-256.
pub fn hash256(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// Bitcoin-style variable length integer.
fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    if n < 0xfd {
        out.push(n as u8);
    } else if n <= 0xffff {
        out.push(0xfd);
        out.extend_from_slice(&(n as u16).to_le_bytes());
    } else if n <= 0xffff_ffff {
        out.push(0xfe);
        out.extend_from_slice(&(n as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&n.to_le_bytes());
    }
}
