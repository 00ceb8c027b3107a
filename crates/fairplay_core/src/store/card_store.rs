//! Card deck store.
//!
//! # Responsibility
//! - Single source of truth for cards, holders, deck order and partners.
//! - Persist `{cards, order, partners}` after every successful mutation and
//!   rehydrate it on construction.
//!
//! # Invariants
//! - Every card mutation appends exactly one history event per touched card
//!   and refreshes `metadata.modified_at`.
//! - `shuffle_deck` only permutes `order`; card content is untouched.
//! - `deal_evenly` only touches cards that are unassigned and active.
//! - `reset` restores the seed captured at construction, bit for bit.

use crate::model::card::{Card, CardStatus};
use crate::model::deck::Deck;
use crate::model::partner::PartnerId;
use crate::model::seed::seed_deck;
use crate::repo::kv_repo::KeyValueStorage;
use crate::store::observe::{ListenerId, Listeners};
use crate::store::persist::{clear_state, load_state, save_state, PersistOptions};
use crate::store::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::Rng;

pub const CARD_STORE_KEY: &str = "fair-play/card-store";
pub const CARD_STORE_VERSION: u32 = 1;

/// Controls what `CardStore::reset` does with the persisted copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetOptions {
    /// Remove the persisted key instead of overwriting it with the seed.
    pub clear_storage: bool,
}

impl Default for ResetOptions {
    fn default() -> Self {
        Self {
            clear_storage: true,
        }
    }
}

pub struct CardStore<S: KeyValueStorage> {
    storage: S,
    persist: PersistOptions<Deck>,
    initial: Deck,
    state: Deck,
    listeners: Listeners<Deck>,
}

impl<S: KeyValueStorage> CardStore<S> {
    /// Builds the store over `storage` using the current persisted format.
    pub fn new(storage: S) -> Self {
        Self::with_options(
            storage,
            PersistOptions::new(CARD_STORE_KEY, CARD_STORE_VERSION),
        )
    }

    /// Builds the store with explicit persistence options (key, version,
    /// migration).
    pub fn with_options(storage: S, persist: PersistOptions<Deck>) -> Self {
        let initial = seed_deck(Utc::now());
        let state = match load_state(&storage, &persist) {
            Some(deck) => match deck.validate() {
                Ok(()) => {
                    info!(
                        "event=store_rehydrate module=card_store status=ok cards={} order_len={}",
                        deck.cards.len(),
                        deck.order.len()
                    );
                    deck
                }
                Err(err) => {
                    warn!(
                        "event=store_rehydrate module=card_store status=discarded error={err}"
                    );
                    initial.clone()
                }
            },
            None => initial.clone(),
        };

        Self {
            storage,
            persist,
            initial,
            state,
            listeners: Listeners::default(),
        }
    }

    pub fn state(&self) -> &Deck {
        &self.state
    }

    /// Seed captured at construction; the target of `reset`.
    pub fn initial_state(&self) -> &Deck {
        &self.initial
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.state.card(card_id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Gives `card_id` to `partner`: status becomes `held` and an `assigned`
    /// event records the previous and new holder.
    ///
    /// Repeated calls with the same partner still append one event each.
    pub fn assign_card(&mut self, card_id: &str, partner: PartnerId) -> StoreResult<()> {
        self.update_card(card_id, "card_assign", |card, now| {
            card.assign_to(partner, now)
        })
    }

    /// Returns `card_id` to the shared deck.
    pub fn release_card(&mut self, card_id: &str) -> StoreResult<()> {
        self.update_card(card_id, "card_release", |card, now| card.release(now))
    }

    /// Sets `status` without touching the holder. A held card can become
    /// paused and stay in its holder's stack.
    pub fn set_card_status(&mut self, card_id: &str, status: CardStatus) -> StoreResult<()> {
        self.update_card(card_id, "card_set_status", |card, now| {
            card.change_status(status, now)
        })
    }

    /// Pauses the card, or resumes it as `held` when already paused.
    ///
    /// Returns the status that was applied.
    pub fn toggle_pause(&mut self, card_id: &str) -> StoreResult<CardStatus> {
        let current = self.require_card(card_id, "card_toggle_pause")?.status;
        let next = if current == CardStatus::Paused {
            CardStatus::Held
        } else {
            CardStatus::Paused
        };
        self.set_card_status(card_id, next)?;
        Ok(next)
    }

    /// Randomly permutes the deck order using the thread-local RNG.
    pub fn shuffle_deck(&mut self) {
        self.shuffle_deck_with(&mut rand::rng());
    }

    /// Randomly permutes the deck order using `rng`.
    pub fn shuffle_deck_with<R: Rng>(&mut self, rng: &mut R) {
        fisher_yates(&mut self.state.order, rng);
        info!(
            "event=deck_shuffle module=card_store status=ok order_len={}",
            self.state.order.len()
        );
        self.commit();
    }

    /// Greedy load balancing of unassigned active cards.
    ///
    /// Running totals start from minutes already held by each partner. Cards
    /// are visited in deck order and each goes to the partner with the lower
    /// total (first slot on ties). Returns the number of cards dealt.
    pub fn deal_evenly(&mut self) -> usize {
        let now = Utc::now();
        let mut load = self.state.held_minutes();
        let mut dealt = 0;

        for card_id in &self.state.order {
            let Some(card) = self.state.cards.get_mut(card_id) else {
                continue;
            };
            if !card.is_dealable() {
                continue;
            }
            let target = load.lighter();
            load.add(target, card.time_estimate());
            card.assign_to(target, now);
            dealt += 1;
            debug!(
                "event=deck_deal_card module=card_store card_id={card_id} partner={target} running_total={}",
                load.get(target)
            );
        }

        info!(
            "event=deck_deal module=card_store status=ok dealt={dealt} partner_a_minutes={} partner_b_minutes={}",
            load.partner_a, load.partner_b
        );
        self.commit();
        dealt
    }

    /// Restores cards, order and partners to the construction-time seed.
    pub fn reset(&mut self, options: ResetOptions) {
        self.state = self.initial.clone();
        if options.clear_storage {
            clear_state(&self.storage, &self.persist);
        } else {
            save_state(&self.storage, &self.persist, &self.state);
        }
        info!(
            "event=store_reset module=card_store status=ok clear_storage={}",
            options.clear_storage
        );
        self.listeners.notify(&self.state);
    }

    /// Registers `listener` to receive the deck after every change.
    pub fn subscribe(&mut self, listener: impl Fn(&Deck) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn require_card(&self, card_id: &str, event: &str) -> StoreResult<&Card> {
        self.state.card(card_id).ok_or_else(|| {
            warn!("event={event} module=card_store status=not_found card_id={card_id}");
            StoreError::CardNotFound(card_id.to_string())
        })
    }

    fn update_card(
        &mut self,
        card_id: &str,
        event: &str,
        apply: impl FnOnce(&mut Card, DateTime<Utc>),
    ) -> StoreResult<()> {
        self.require_card(card_id, event)?;
        if let Some(card) = self.state.cards.get_mut(card_id) {
            apply(card, Utc::now());
            info!(
                "event={event} module=card_store status=ok card_id={card_id} partner={} card_status={}",
                card.holder.map_or("none", PartnerId::as_str),
                card.status
            );
        }
        self.commit();
        Ok(())
    }

    fn commit(&self) {
        save_state(&self.storage, &self.persist, &self.state);
        self.listeners.notify(&self.state);
    }
}

/// In-place Fisher–Yates: for `i` from the last index down to 1, swap `i`
/// with a uniformly chosen `j` in `[0, i]`.
pub fn fisher_yates<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::fisher_yates;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fisher_yates_preserves_members() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut items: Vec<u32> = (0..32).collect();
        fisher_yates(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn fisher_yates_is_deterministic_for_a_seed() {
        let mut first: Vec<u32> = (0..10).collect();
        let mut second = first.clone();
        fisher_yates(&mut first, &mut StdRng::seed_from_u64(42));
        fisher_yates(&mut second, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn fisher_yates_handles_short_slices() {
        let mut empty: Vec<u32> = Vec::new();
        let mut single = vec![1];
        let mut rng = StdRng::seed_from_u64(1);
        fisher_yates(&mut empty, &mut rng);
        fisher_yates(&mut single, &mut rng);
        assert!(empty.is_empty());
        assert_eq!(single, vec![1]);
    }
}
