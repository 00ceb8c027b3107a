//! Built-in starter deck and partner profiles.
//!
//! # Invariants
//! - Every seeded card is unassigned, active and carries exactly one
//!   `created` history event stamped with its creation time.
//! - Seed order is the declaration order below.

use crate::model::card::{
    Card, CardHistoryEvent, CardMetadata, CardStatus, Category, Difficulty, Frequency,
    LocalizedText,
};
use crate::model::deck::Deck;
use crate::model::partner::{
    Avatar, PartnerId, PartnerPreferences, PartnerProfile, PartnerRoster, PartnerTheme,
};
use chrono::{DateTime, Utc};

struct SeedCard {
    id: &'static str,
    category: Category,
    title: (&'static str, &'static str),
    description: (&'static str, &'static str),
    details: (&'static str, &'static str),
    is_custom: bool,
    tags: &'static [&'static str],
    difficulty: Difficulty,
    frequency: Frequency,
    time_estimate: u32,
}

const SEED_CARDS: &[SeedCard] = &[
    SeedCard {
        id: "card-morning-routine",
        category: Category::DailyGrind,
        title: ("Morning reset", "התארגנות בוקר"),
        description: (
            "Prepare kids and home for the day with calm structure.",
            "ארגון הבוקר בבית ובילדים בשלווה.",
        ),
        details: (
            "Includes wake-up calls, breakfast prep, bags, and quick tidy. Track energy to avoid burnout.",
            "כולל השכמה, הכנת ארוחות בוקר, תיקי בית ספר וסידור מהיר של הבית.",
        ),
        is_custom: false,
        tags: &["routine", "morning"],
        difficulty: Difficulty::MEDIUM,
        frequency: Frequency::Daily,
        time_estimate: 90,
    },
    SeedCard {
        id: "card-weekly-meal-plan",
        category: Category::Home,
        title: ("Weekly meal planning", "תכנון ארוחות שבועי"),
        description: (
            "Plan meals, order groceries, and prep the pantry.",
            "תכנון ארוחות, הזמנות מצרכים וסידור המצרכים.",
        ),
        details: (
            "Review schedules, coordinate preferences, and document recipes for quick hand-off.",
            "בדיקת לוחות זמנים, התאמת טעמים ורישום מתכונים להחלפה קלה.",
        ),
        is_custom: false,
        tags: &["planning", "food"],
        difficulty: Difficulty::HARD,
        frequency: Frequency::Weekly,
        time_estimate: 120,
    },
    SeedCard {
        id: "card-bedtime-ritual",
        category: Category::Kids,
        title: ("Bedtime ritual", "טקס שינה"),
        description: (
            "Guide the evening slowdown and tuck-ins.",
            "הובלת הירגעות הערב והשכבת הילדים.",
        ),
        details: (
            "Bath, pajamas, story, and lights-out with connection moments captured in notes.",
            "אמבטיה, פיג׳מה, סיפור ולילה טוב עם רגעי חיבור שנרשמים.",
        ),
        is_custom: false,
        tags: &["kids", "evening"],
        difficulty: Difficulty::MEDIUM,
        frequency: Frequency::Daily,
        time_estimate: 60,
    },
    SeedCard {
        id: "card-house-systems",
        category: Category::Magic,
        title: ("House systems audit", "בדיקת מערכות הבית"),
        description: (
            "Review subscriptions, warranties, and maintenance cadence.",
            "בדיקת מנויים, אחריות ולוח זמנים לתחזוקה.",
        ),
        details: (
            "Track renewals, capture follow-ups, and document upcoming needs for a quarterly sync.",
            "מעקב אחרי חידושים, משימות מעקב ותיעוד צרכים עתידיים לפגישה רבעונית.",
        ),
        is_custom: false,
        tags: &["systems", "finance"],
        difficulty: Difficulty::HARD,
        frequency: Frequency::Monthly,
        time_estimate: 150,
    },
    SeedCard {
        id: "card-surprise-magic",
        category: Category::Wild,
        title: ("Surprise magic moment", "מחווה קסומה"),
        description: (
            "Craft an unexpected delight for the household.",
            "יצירת הפתעה משמחת לבית.",
        ),
        details: (
            "Could be handwritten notes, playlist drops, or spontaneous picnic. Document what resonated.",
            "יכול להיות פתק אישי, פלייליסט חדש או פיקניק ספונטני – תעדו מה עבד.",
        ),
        is_custom: false,
        tags: &["connection"],
        difficulty: Difficulty::EASY,
        frequency: Frequency::Monthly,
        time_estimate: 45,
    },
    SeedCard {
        id: "card-community-care",
        category: Category::Custom,
        title: ("Community care run", "סיוע קהילתי"),
        description: (
            "Coordinate support drop-offs for friends or family.",
            "תיאום עזרה ומשלוחים לחברים או למשפחה.",
        ),
        details: (
            "Check community boards, align calendars, and organise transport logistics.",
            "בדיקת קבוצות קהילה, התאמת לוחות זמנים וארגון לוגיסטיקה.",
        ),
        is_custom: true,
        tags: &["community", "care"],
        difficulty: Difficulty::MEDIUM,
        frequency: Frequency::Occasional,
        time_estimate: 110,
    },
];

/// Builds the starter deck with all timestamps set to `now`.
pub fn seed_deck(now: DateTime<Utc>) -> Deck {
    let cards: Vec<Card> = SEED_CARDS.iter().map(|seed| seed_card(seed, now)).collect();
    let order = cards.iter().map(|card| card.id.clone()).collect();
    Deck {
        cards: cards.into_iter().map(|card| (card.id.clone(), card)).collect(),
        order,
        partners: seed_partners(),
    }
}

/// Ids of the starter cards in seed order.
pub fn seed_card_ids() -> Vec<&'static str> {
    SEED_CARDS.iter().map(|seed| seed.id).collect()
}

fn seed_card(seed: &SeedCard, now: DateTime<Utc>) -> Card {
    let text = |(en, he): (&str, &str)| LocalizedText::new(en, he);
    Card {
        id: seed.id.to_string(),
        category: seed.category,
        title: text(seed.title),
        description: text(seed.description),
        details: text(seed.details),
        holder: None,
        status: CardStatus::Unassigned,
        custom_fields: Vec::new(),
        metadata: CardMetadata {
            created_at: now,
            modified_at: now,
            is_custom: seed.is_custom,
            is_active: true,
            tags: seed.tags.iter().map(|tag| tag.to_string()).collect(),
            difficulty: seed.difficulty,
            frequency: seed.frequency,
            time_estimate: seed.time_estimate,
        },
        history: vec![CardHistoryEvent::created(now)],
    }
}

fn seed_partners() -> PartnerRoster {
    PartnerRoster {
        partner_a: PartnerProfile {
            id: PartnerId::PartnerA,
            name: "Noa".to_string(),
            avatar: Avatar {
                emoji: "🌿".to_string(),
                description: "Noa smiling with a cup of tea".to_string(),
            },
            preferences: PartnerPreferences {
                favorite_cards: vec![
                    "card-surprise-magic".to_string(),
                    "card-community-care".to_string(),
                ],
                avoid_cards: vec!["card-house-systems".to_string()],
                strong_suits: vec![Category::Magic, Category::Wild],
                availability: "Early mornings, late evenings".to_string(),
            },
            theme: PartnerTheme {
                color: "#E63946".to_string(),
                accent: "#F1C453".to_string(),
                gradient: "linear-gradient(135deg, rgba(230,57,70,0.95), rgba(241,196,83,0.65))"
                    .to_string(),
                pattern: "radial-gradient(circle at 20% 20%, rgba(251,245,243,0.9) 0, rgba(251,245,243,0.2) 45%, transparent 70%), radial-gradient(circle at 80% 0%, rgba(6,174,213,0.2), transparent 55%)"
                    .to_string(),
                icon: "🛠️".to_string(),
            },
        },
        partner_b: PartnerProfile {
            id: PartnerId::PartnerB,
            name: "Adi".to_string(),
            avatar: Avatar {
                emoji: "🪴".to_string(),
                description: "Adi watering plants".to_string(),
            },
            preferences: PartnerPreferences {
                favorite_cards: vec![
                    "card-house-systems".to_string(),
                    "card-weekly-meal-plan".to_string(),
                ],
                avoid_cards: vec!["card-surprise-magic".to_string()],
                strong_suits: vec![Category::DailyGrind, Category::Home],
                availability: "Midday focus blocks, weekends".to_string(),
            },
            theme: PartnerTheme {
                color: "#06AED5".to_string(),
                accent: "#0A0908".to_string(),
                gradient: "linear-gradient(160deg, rgba(6,174,213,0.95), rgba(10,9,8,0.75))"
                    .to_string(),
                pattern: "radial-gradient(circle at 10% 90%, rgba(230,57,70,0.18), transparent 60%), radial-gradient(circle at 80% 40%, rgba(241,196,83,0.22), transparent 65%)"
                    .to_string(),
                icon: "⚡".to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{seed_card_ids, seed_deck};
    use crate::model::card::{CardStatus, HistoryAction};
    use chrono::Utc;

    #[test]
    fn seed_deck_is_unassigned_with_created_event() {
        let now = Utc::now();
        let deck = seed_deck(now);

        assert_eq!(deck.order, seed_card_ids());
        assert_eq!(deck.cards.len(), deck.order.len());
        for card in deck.ordered_cards() {
            assert_eq!(card.holder, None);
            assert_eq!(card.status, CardStatus::Unassigned);
            assert!(card.metadata.is_active);
            assert_eq!(card.history.len(), 1);
            assert_eq!(card.history[0].action, HistoryAction::Created);
            assert_eq!(card.history[0].timestamp, now);
        }
        deck.validate().expect("seed deck must validate");
    }

    #[test]
    fn seed_time_estimates_follow_declaration_order() {
        let deck = seed_deck(Utc::now());
        let minutes: Vec<u32> = deck.ordered_cards().map(|card| card.time_estimate()).collect();
        assert_eq!(minutes, vec![90, 120, 60, 150, 45, 110]);
    }
}
