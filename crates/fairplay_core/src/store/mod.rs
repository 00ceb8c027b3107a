//! Observable, persisted state stores.
//!
//! # Responsibility
//! - Own in-memory state for the card deck, the game counter and settings.
//! - Write each store's persisted subset after every successful mutation.
//! - Notify subscribers with the new state.
//!
//! # Invariants
//! - Store instances are injected by the composition root; there are no
//!   process-wide singletons.
//! - A mutation either fully applies (state, persistence, notification) or
//!   leaves state untouched. Persistence failures never undo the mutation.
//! - Addressing an unknown card returns `StoreError::CardNotFound` and
//!   changes nothing.

use crate::model::card::CardId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod card_store;
pub mod game_store;
pub mod observe;
pub mod persist;
pub mod selectors;
pub mod settings_store;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Operation addressed a card id absent from the dictionary.
    CardNotFound(CardId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CardNotFound(card_id) => write!(f, "card not found: {card_id}"),
        }
    }
}

impl Error for StoreError {}
