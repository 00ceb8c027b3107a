//! Pure derived views over deck state.
//!
//! All selectors iterate in deck order and skip order entries whose card is
//! missing from the dictionary.

use crate::model::card::{Card, CardStatus};
use crate::model::deck::Deck;
use crate::model::partner::{PartnerId, PartnerProfile};

/// Aggregate counters for the whole deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeckStats {
    pub total: usize,
    /// No holder and status `unassigned`.
    pub unassigned: usize,
    pub paused: usize,
    /// Has a holder and status `held`.
    pub assigned: usize,
    /// Sum of estimated minutes over every card.
    pub time_estimate: u64,
}

/// One partner's share of the deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartnerLoad {
    pub total_minutes: u64,
    pub paused: usize,
    /// Held cards that are not paused.
    pub active: usize,
}

/// Cards held by `holder`, or unassigned cards when `holder` is `None`.
pub fn cards_by_holder(deck: &Deck, holder: Option<PartnerId>) -> Vec<&Card> {
    deck.ordered_cards()
        .filter(|card| card.holder == holder)
        .collect()
}

pub fn deck_stats(deck: &Deck) -> DeckStats {
    deck.ordered_cards()
        .fold(DeckStats::default(), |mut stats, card| {
            stats.total += 1;
            if card.holder.is_none() && card.status == CardStatus::Unassigned {
                stats.unassigned += 1;
            }
            if card.status == CardStatus::Paused {
                stats.paused += 1;
            }
            if card.holder.is_some() && card.status == CardStatus::Held {
                stats.assigned += 1;
            }
            stats.time_estimate += u64::from(card.time_estimate());
            stats
        })
}

pub fn partner_profile(deck: &Deck, partner: PartnerId) -> &PartnerProfile {
    deck.partners.get(partner)
}

pub fn partner_load(deck: &Deck, partner: PartnerId) -> PartnerLoad {
    let cards = cards_by_holder(deck, Some(partner));
    let paused = cards
        .iter()
        .filter(|card| card.status == CardStatus::Paused)
        .count();
    PartnerLoad {
        total_minutes: cards.iter().map(|card| u64::from(card.time_estimate())).sum(),
        paused,
        active: cards.len() - paused,
    }
}

/// Estimated minutes still waiting in the shared deck.
pub fn unassigned_minutes(deck: &Deck) -> u64 {
    cards_by_holder(deck, None)
        .into_iter()
        .map(|card| u64::from(card.time_estimate()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::{cards_by_holder, deck_stats, partner_load, unassigned_minutes};
    use crate::model::card::CardStatus;
    use crate::model::partner::PartnerId;
    use crate::model::seed::seed_deck;
    use chrono::Utc;

    #[test]
    fn dangling_order_entries_are_skipped() {
        let mut deck = seed_deck(Utc::now());
        deck.order.insert(2, "card-does-not-exist".to_string());

        let stats = deck_stats(&deck);
        assert_eq!(stats.total, 6);
        assert_eq!(cards_by_holder(&deck, None).len(), 6);
    }

    #[test]
    fn partner_load_counts_paused_separately() {
        let now = Utc::now();
        let mut deck = seed_deck(now);
        for id in ["card-morning-routine", "card-bedtime-ritual"] {
            deck.cards
                .get_mut(id)
                .unwrap()
                .assign_to(PartnerId::PartnerB, now);
        }
        deck.cards
            .get_mut("card-bedtime-ritual")
            .unwrap()
            .change_status(CardStatus::Paused, now);

        let load = partner_load(&deck, PartnerId::PartnerB);
        assert_eq!(load.total_minutes, 150);
        assert_eq!(load.paused, 1);
        assert_eq!(load.active, 1);
        assert_eq!(unassigned_minutes(&deck), 120 + 150 + 45 + 110);
    }
}
