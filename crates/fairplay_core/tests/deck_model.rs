use chrono::Utc;
use fairplay_core::model::card::{Card, CardStatus, Difficulty};
use fairplay_core::model::seed::seed_deck;
use fairplay_core::store::card_store::{CARD_STORE_KEY, CARD_STORE_VERSION};
use fairplay_core::store::persist::encode_state;
use fairplay_core::{CardStore, KeyValueStorage, Locale, MemoryKeyValueStorage, PartnerId};
use serde_json::{json, Value};

#[test]
fn card_wire_shape_uses_camel_case_and_kebab_case() {
    let now = Utc::now();
    let mut deck = seed_deck(now);
    let card = deck.cards.get_mut("card-surprise-magic").unwrap();
    card.assign_to(PartnerId::PartnerA, now);
    card.change_status(CardStatus::InNegotiation, now);

    let value = serde_json::to_value(&*card).unwrap();
    assert_eq!(value["category"], "wild");
    assert_eq!(value["holder"], "partnerA");
    assert_eq!(value["status"], "in-negotiation");
    assert_eq!(value["metadata"]["timeEstimate"], 45);
    assert_eq!(value["metadata"]["isActive"], true);
    assert!(value["metadata"]["modifiedAt"].is_string());
    assert_eq!(value["history"][2]["action"], "status-changed");
    assert_eq!(value["history"][2]["status"], "in-negotiation");
    assert!(value.get("customFields").is_none());
}

#[test]
fn daily_grind_category_and_partner_roster_keys() {
    let deck = seed_deck(Utc::now());
    let value = serde_json::to_value(&deck).unwrap();

    assert_eq!(value["cards"]["card-morning-routine"]["category"], "daily-grind");
    assert_eq!(value["partners"]["partnerB"]["id"], "partnerB");
    assert_eq!(value["order"].as_array().unwrap().len(), 6);
}

#[test]
fn difficulty_outside_range_is_rejected() {
    assert!(Difficulty::new(0).is_err());
    assert_eq!(Difficulty::new(3).unwrap(), Difficulty::HARD);

    let deck = seed_deck(Utc::now());
    let mut value = serde_json::to_value(deck.card("card-house-systems").unwrap()).unwrap();
    value["metadata"]["difficulty"] = json!(4);
    assert!(serde_json::from_value::<Card>(value).is_err());
}

#[test]
fn localized_text_follows_locale() {
    let deck = seed_deck(Utc::now());
    let card = deck.card("card-bedtime-ritual").unwrap();
    assert_ne!(card.title.get(Locale::En), card.title.get(Locale::He));
    assert!(!card.title.get(Locale::He).is_empty());
}

#[test]
fn inactive_cards_are_never_dealt() {
    let storage = MemoryKeyValueStorage::new();
    let mut deck = seed_deck(Utc::now());
    deck.cards
        .get_mut("card-community-care")
        .unwrap()
        .metadata
        .is_active = false;
    storage
        .set_item(
            CARD_STORE_KEY,
            &encode_state(&deck, CARD_STORE_VERSION).unwrap(),
        )
        .unwrap();

    let mut store = CardStore::new(&storage);
    assert_eq!(store.deal_evenly(), 5);

    let skipped = store.card("card-community-care").unwrap();
    assert_eq!(skipped.holder, None);
    assert_eq!(skipped.status, CardStatus::Unassigned);
    assert_eq!(skipped.history.len(), 1);
}

#[test]
fn persisted_envelope_parses_as_plain_json() {
    let deck = seed_deck(Utc::now());
    let raw = encode_state(&deck, CARD_STORE_VERSION).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 1);
    assert!(value["state"]["cards"].is_object());
}
