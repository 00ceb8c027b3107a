//! Deck aggregate: card dictionary, display order and partner roster.
//!
//! # Responsibility
//! - Hold the persisted card-store payload as one serializable value.
//! - Provide order-aware iteration shared by store operations and selectors.
//!
//! # Invariants
//! - `order` defines display and deal sequence independent of card content.
//! - A validated deck lists every card in `order` exactly once.
//! - Iteration still skips order entries without a matching card.

use crate::model::card::{Card, CardId, CardValidationError};
use crate::model::partner::{PartnerId, PartnerRoster};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub cards: BTreeMap<CardId, Card>,
    pub order: Vec<CardId>,
    pub partners: PartnerRoster,
}

/// Per-partner running totals of estimated minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartnerMinutes {
    pub partner_a: u64,
    pub partner_b: u64,
}

impl PartnerMinutes {
    pub fn get(&self, id: PartnerId) -> u64 {
        match id {
            PartnerId::PartnerA => self.partner_a,
            PartnerId::PartnerB => self.partner_b,
        }
    }

    pub fn add(&mut self, id: PartnerId, minutes: u32) {
        let slot = match id {
            PartnerId::PartnerA => &mut self.partner_a,
            PartnerId::PartnerB => &mut self.partner_b,
        };
        *slot += u64::from(minutes);
    }

    /// Slot with the lower total; ties go to the first slot.
    pub fn lighter(&self) -> PartnerId {
        if self.partner_a <= self.partner_b {
            PartnerId::PartnerA
        } else {
            PartnerId::PartnerB
        }
    }
}

impl Deck {
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Cards in deck order, skipping dangling order entries.
    pub fn ordered_cards(&self) -> impl Iterator<Item = &Card> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    /// Minutes currently held by each partner, whatever the card status.
    pub fn held_minutes(&self) -> PartnerMinutes {
        let mut load = PartnerMinutes::default();
        for card in self.ordered_cards() {
            if let Some(holder) = card.holder {
                load.add(holder, card.time_estimate());
            }
        }
        load
    }

    /// Validates every card, the key/id pairing of the dictionary, and that
    /// `order` is a permutation of the dictionary keys.
    pub fn validate(&self) -> Result<(), CardValidationError> {
        for (key, card) in &self.cards {
            if key != &card.id {
                return Err(CardValidationError::KeyMismatch {
                    key: key.clone(),
                    card_id: card.id.clone(),
                });
            }
            card.validate()?;
        }

        let mut seen = BTreeSet::new();
        for card_id in &self.order {
            if !self.cards.contains_key(card_id) {
                return Err(CardValidationError::UnknownInOrder {
                    card_id: card_id.clone(),
                });
            }
            if !seen.insert(card_id.as_str()) {
                return Err(CardValidationError::DuplicateInOrder {
                    card_id: card_id.clone(),
                });
            }
        }
        if let Some(card_id) = self.cards.keys().find(|id| !seen.contains(id.as_str())) {
            return Err(CardValidationError::MissingFromOrder {
                card_id: card_id.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::card::CardValidationError;
    use crate::model::seed::seed_deck;
    use chrono::Utc;

    #[test]
    fn order_must_list_each_card_once() {
        let deck = seed_deck(Utc::now());
        assert_eq!(deck.validate(), Ok(()));

        let mut repeated = deck.clone();
        repeated.order.push("card-morning-routine".to_string());
        assert!(matches!(
            repeated.validate(),
            Err(CardValidationError::DuplicateInOrder { card_id }) if card_id == "card-morning-routine"
        ));

        let mut dropped = deck.clone();
        dropped.order.retain(|id| id != "card-house-systems");
        assert!(matches!(
            dropped.validate(),
            Err(CardValidationError::MissingFromOrder { card_id }) if card_id == "card-house-systems"
        ));

        let mut dangling = deck;
        dangling.order.push("card-ghost".to_string());
        assert!(matches!(
            dangling.validate(),
            Err(CardValidationError::UnknownInOrder { .. })
        ));
    }
}
