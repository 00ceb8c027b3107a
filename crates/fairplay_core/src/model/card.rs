//! Card domain model.
//!
//! # Responsibility
//! - Define the household task card and its append-only history.
//! - Provide the field-level mutation helpers used by the card store.
//!
//! # Invariants
//! - `history` is append-only; events are never edited or removed.
//! - `metadata.difficulty` is always within `1..=3`.
//! - `status == Unassigned` iff `holder == None`, except for states reached
//!   through explicit status changes (paused-but-held is legal).

use crate::model::locale::Locale;
use crate::model::partner::PartnerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable card identifier, e.g. `card-morning-routine`.
pub type CardId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    DailyGrind,
    Kids,
    Home,
    Magic,
    Wild,
    Custom,
}

/// Card lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardStatus {
    /// In the shared deck, nobody holds it.
    Unassigned,
    /// Owned by one partner.
    Held,
    /// Partners are discussing a hand-off.
    InNegotiation,
    /// Both partners carry it together.
    Shared,
    /// Temporarily on hold; keeps its holder.
    Paused,
}

impl CardStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unassigned => "unassigned",
            Self::Held => "held",
            Self::InNegotiation => "in-negotiation",
            Self::Shared => "shared",
            Self::Paused => "paused",
        }
    }
}

impl Display for CardStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCardStatusError(pub String);

impl Display for ParseCardStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid card status `{}`; expected unassigned|held|in-negotiation|shared|paused",
            self.0
        )
    }
}

impl Error for ParseCardStatusError {}

impl FromStr for CardStatus {
    type Err = ParseCardStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "unassigned" => Ok(Self::Unassigned),
            "held" => Ok(Self::Held),
            "in-negotiation" => Ok(Self::InNegotiation),
            "shared" => Ok(Self::Shared),
            "paused" => Ok(Self::Paused),
            _ => Err(ParseCardStatusError(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Occasional,
}

/// Effort rating, restricted to `1..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const EASY: Difficulty = Difficulty(1);
    pub const MEDIUM: Difficulty = Difficulty(2);
    pub const HARD: Difficulty = Difficulty(3);

    pub fn new(value: u8) -> Result<Self, CardValidationError> {
        if (1..=3).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CardValidationError::DifficultyOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = CardValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}

/// Text keyed by locale code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub he: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, he: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            he: he.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::He => &self.he,
        }
    }
}

/// User-defined label/value pair attached to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMetadata {
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub is_custom: bool,
    /// Inactive cards are never dealt.
    pub is_active: bool,
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    pub frequency: Frequency,
    /// Estimated effort in minutes per occurrence.
    pub time_estimate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryAction {
    Created,
    Assigned,
    Unassigned,
    StatusChanged,
}

/// Immutable record of one state change on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardHistoryEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub action: HistoryAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<PartnerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<PartnerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CardStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CardHistoryEvent {
    fn new(action: HistoryAction, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            action,
            from: None,
            to: None,
            status: None,
            note: None,
        }
    }

    pub fn created(timestamp: DateTime<Utc>) -> Self {
        Self::new(HistoryAction::Created, timestamp)
    }

    pub fn assigned(from: Option<PartnerId>, to: PartnerId, timestamp: DateTime<Utc>) -> Self {
        Self {
            from,
            to: Some(to),
            ..Self::new(HistoryAction::Assigned, timestamp)
        }
    }

    pub fn unassigned(from: Option<PartnerId>, timestamp: DateTime<Utc>) -> Self {
        Self {
            from,
            ..Self::new(HistoryAction::Unassigned, timestamp)
        }
    }

    pub fn status_changed(status: CardStatus, timestamp: DateTime<Utc>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(HistoryAction::StatusChanged, timestamp)
        }
    }
}

/// One household task unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub category: Category,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub details: LocalizedText,
    pub holder: Option<PartnerId>,
    pub status: CardStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
    pub metadata: CardMetadata,
    pub history: Vec<CardHistoryEvent>,
}

impl Card {
    /// Hands the card to `partner` and records the transfer.
    pub fn assign_to(&mut self, partner: PartnerId, now: DateTime<Utc>) {
        let event = CardHistoryEvent::assigned(self.holder, partner, now);
        self.holder = Some(partner);
        self.status = CardStatus::Held;
        self.record(event);
    }

    /// Returns the card to the shared deck.
    pub fn release(&mut self, now: DateTime<Utc>) {
        let event = CardHistoryEvent::unassigned(self.holder, now);
        self.holder = None;
        self.status = CardStatus::Unassigned;
        self.record(event);
    }

    /// Changes status only; the holder is left untouched.
    pub fn change_status(&mut self, status: CardStatus, now: DateTime<Utc>) {
        self.status = status;
        self.record(CardHistoryEvent::status_changed(status, now));
    }

    /// Eligible for `deal_evenly`: unassigned and active.
    pub fn is_dealable(&self) -> bool {
        self.status == CardStatus::Unassigned && self.metadata.is_active
    }

    pub fn last_event(&self) -> Option<&CardHistoryEvent> {
        self.history.last()
    }

    pub fn time_estimate(&self) -> u32 {
        self.metadata.time_estimate
    }

    /// Validates invariants that serde alone cannot express.
    pub fn validate(&self) -> Result<(), CardValidationError> {
        if self.id.trim().is_empty() {
            return Err(CardValidationError::EmptyId);
        }
        if self.metadata.modified_at < self.metadata.created_at {
            return Err(CardValidationError::ModifiedBeforeCreated {
                card_id: self.id.clone(),
            });
        }
        Ok(())
    }

    fn record(&mut self, event: CardHistoryEvent) {
        self.metadata.modified_at = event.timestamp;
        self.history.push(event);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    EmptyId,
    DifficultyOutOfRange(u8),
    ModifiedBeforeCreated { card_id: CardId },
    KeyMismatch { key: CardId, card_id: CardId },
    DuplicateInOrder { card_id: CardId },
    MissingFromOrder { card_id: CardId },
    UnknownInOrder { card_id: CardId },
}

impl Display for CardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "card id must not be empty"),
            Self::DifficultyOutOfRange(value) => {
                write!(f, "difficulty must be within 1..=3, got {value}")
            }
            Self::ModifiedBeforeCreated { card_id } => {
                write!(f, "card `{card_id}` has modifiedAt earlier than createdAt")
            }
            Self::KeyMismatch { key, card_id } => {
                write!(f, "card stored under `{key}` carries id `{card_id}`")
            }
            Self::DuplicateInOrder { card_id } => {
                write!(f, "deck order lists `{card_id}` more than once")
            }
            Self::MissingFromOrder { card_id } => {
                write!(f, "card `{card_id}` is absent from deck order")
            }
            Self::UnknownInOrder { card_id } => {
                write!(f, "deck order references unknown card `{card_id}`")
            }
        }
    }
}

impl Error for CardValidationError {}
