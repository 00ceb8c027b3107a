//! Domain model for the card deck, partners and locales.
//!
//! # Responsibility
//! - Define canonical data structures used by the stores.
//! - Own the built-in starter dataset.
//!
//! # Invariants
//! - Cards are never deleted; they are mutated in place or reordered.
//! - Wire names (camelCase fields, kebab-case enums) are part of the
//!   persisted format and must stay stable.

pub mod card;
pub mod deck;
pub mod locale;
pub mod partner;
pub mod seed;
