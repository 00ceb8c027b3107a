//! Partner identity and profile model.
//!
//! # Responsibility
//! - Define the two fixed partner slots that can hold cards.
//! - Carry static profile data (avatar, preferences, theme tokens).
//!
//! # Invariants
//! - Exactly two partner slots exist; `PartnerId::ALL` lists them in
//!   tie-break order (first slot wins ties).
//! - Profiles are reference data and are not mutated by card operations.

use crate::model::card::Category;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the two fixed partner slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartnerId {
    #[serde(rename = "partnerA")]
    PartnerA,
    #[serde(rename = "partnerB")]
    PartnerB,
}

impl PartnerId {
    /// Both slots, first slot first.
    pub const ALL: [PartnerId; 2] = [PartnerId::PartnerA, PartnerId::PartnerB];

    /// Wire name used in persisted state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PartnerA => "partnerA",
            Self::PartnerB => "partnerB",
        }
    }

    /// The other slot.
    pub fn other(self) -> Self {
        match self {
            Self::PartnerA => Self::PartnerB,
            Self::PartnerB => Self::PartnerA,
        }
    }
}

impl Display for PartnerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePartnerIdError(pub String);

impl Display for ParsePartnerIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown partner `{}`; expected partnerA|partnerB",
            self.0
        )
    }
}

impl Error for ParsePartnerIdError {}

impl FromStr for PartnerId {
    type Err = ParsePartnerIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "partnera" | "a" => Ok(Self::PartnerA),
            "partnerb" | "b" => Ok(Self::PartnerB),
            _ => Err(ParsePartnerIdError(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub emoji: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerPreferences {
    /// Card ids this partner likes to hold.
    pub favorite_cards: Vec<String>,
    /// Card ids this partner would rather not hold.
    pub avoid_cards: Vec<String>,
    pub strong_suits: Vec<Category>,
    /// Free-form availability text.
    pub availability: String,
}

/// Visual tokens consumed by the presentation layer. Opaque to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerTheme {
    pub color: String,
    pub accent: String,
    pub gradient: String,
    pub pattern: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerProfile {
    pub id: PartnerId,
    pub name: String,
    pub avatar: Avatar,
    pub preferences: PartnerPreferences,
    pub theme: PartnerTheme,
}

/// Both partner profiles, keyed by slot on the wire.
///
/// A struct rather than a map so that lookup by `PartnerId` is total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerRoster {
    #[serde(rename = "partnerA")]
    pub partner_a: PartnerProfile,
    #[serde(rename = "partnerB")]
    pub partner_b: PartnerProfile,
}

impl PartnerRoster {
    pub fn get(&self, id: PartnerId) -> &PartnerProfile {
        match id {
            PartnerId::PartnerA => &self.partner_a,
            PartnerId::PartnerB => &self.partner_b,
        }
    }
}
