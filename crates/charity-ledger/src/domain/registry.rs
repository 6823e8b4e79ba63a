//! # Charity Registry
//!
//! Fixed-size charity table with linear lookup by identifier.
//!
//! N is small and fixed, so an O(N) scan is the access pattern; there is no
//! secondary index. A scan visits every slot, which keeps the cost of a lookup
//! independent of where (or whether) the identifier is found.

use super::{AmountField, Charity, CharityId, LedgerError, MatchPolicy, SlotKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharityRegistry {
    charities: Vec<Charity>,
}

impl CharityRegistry {
    /// Build the table from names, deriving one identifier per slot.
    pub fn from_names(names: &[Vec<u8>]) -> Self {
        Self {
            charities: names
                .iter()
                .map(|name| Charity::new(CharityId::from_name(name)))
                .collect(),
        }
    }

    /// Wrap already-populated rows (used by the decoder).
    pub(crate) fn from_charities(charities: Vec<Charity>) -> Self {
        Self { charities }
    }

    pub fn len(&self) -> usize {
        self.charities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Charity> {
        self.charities.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Charity> {
        self.charities.iter()
    }

    /// First slot whose identifier equals `id`.
    pub fn find(&self, id: &CharityId) -> Option<usize> {
        self.charities.iter().position(|c| &c.id == id)
    }

    /// Every slot whose identifier equals `id`, in slot order.
    pub fn matching_slots(&self, id: &CharityId) -> Vec<usize> {
        self.charities
            .iter()
            .enumerate()
            .filter(|(_, c)| &c.id == id)
            .map(|(i, _)| i)
            .collect()
    }

    /// Resolve `id` to the slots a transition must mutate.
    ///
    /// No match is always `CharityNotFound`. Under `ExactlyOne`, more than one
    /// match is `AmbiguousCharityId`.
    pub fn resolve(&self, id: &CharityId, policy: MatchPolicy) -> Result<Vec<usize>, LedgerError> {
        let slots = self.matching_slots(id);
        match (slots.len(), policy) {
            (0, _) => Err(LedgerError::CharityNotFound {
                charity_id: id.clone(),
            }),
            (1, _) | (_, MatchPolicy::AllMatches) => Ok(slots),
            (matches, MatchPolicy::ExactlyOne) => Err(LedgerError::AmbiguousCharityId {
                charity_id: id.clone(),
                matches,
            }),
        }
    }

    /// `amount_received += amount`, trapping on overflow.
    pub fn credit_received(&mut self, index: usize, amount: u128) -> Result<(), LedgerError> {
        let charity = self.slot_mut(index)?;
        charity.amount_received = charity
            .amount_received
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow {
                slot: index,
                field: AmountField::Received,
            })?;
        Ok(())
    }

    /// `amount_spent += amount`, trapping on overflow.
    pub fn credit_spent(&mut self, index: usize, amount: u128) -> Result<(), LedgerError> {
        let charity = self.slot_mut(index)?;
        charity.amount_spent = charity
            .amount_spent
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow {
                slot: index,
                field: AmountField::Spent,
            })?;
        Ok(())
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Charity, LedgerError> {
        let capacity = self.charities.len();
        self.charities
            .get_mut(index)
            .ok_or(LedgerError::InvalidIndex {
                kind: SlotKind::Charity,
                index,
                capacity,
            })
    }
}
