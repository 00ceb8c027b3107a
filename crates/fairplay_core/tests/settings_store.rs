use fairplay_core::store::settings_store::SETTINGS_STORE_KEY;
use fairplay_core::{
    open_db_in_memory, KeyValueStorage, Locale, MemoryKeyValueStorage, SettingsStore,
    SqliteKeyValueStorage,
};

#[test]
fn defaults_to_english() {
    let storage = MemoryKeyValueStorage::new();
    let settings = SettingsStore::new(&storage);
    assert_eq!(settings.locale(), Locale::En);
    assert!(storage.is_empty());
}

#[test]
fn toggle_switches_between_supported_locales() {
    let storage = MemoryKeyValueStorage::new();
    let mut settings = SettingsStore::new(&storage);

    assert_eq!(settings.toggle_locale(), Locale::He);
    assert!(settings.locale().is_rtl());
    assert_eq!(settings.toggle_locale(), Locale::En);
}

#[test]
fn locale_persists_across_store_instances() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKeyValueStorage::try_new(&conn).unwrap();
    let mut settings = SettingsStore::new(&storage);
    settings.set_locale(Locale::He);

    let raw = storage.get_item(SETTINGS_STORE_KEY).unwrap().unwrap();
    assert_eq!(raw, r#"{"state":{"locale":"he"},"version":1}"#);

    let reloaded = SettingsStore::new(&storage);
    assert_eq!(reloaded.locale(), Locale::He);
}

#[test]
fn unknown_persisted_locale_falls_back_to_default() {
    let storage = MemoryKeyValueStorage::new();
    storage
        .set_item(SETTINGS_STORE_KEY, r#"{"state":{"locale":"fr"},"version":1}"#)
        .unwrap();

    let settings = SettingsStore::new(&storage);
    assert_eq!(settings.locale(), Locale::En);
}
