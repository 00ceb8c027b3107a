//! User settings store.
//!
//! Holds the active UI locale, persisted under `fair-play/settings`.

use crate::model::locale::Locale;
use crate::repo::kv_repo::KeyValueStorage;
use crate::store::observe::{ListenerId, Listeners};
use crate::store::persist::{load_state, save_state, PersistOptions};
use log::{debug, info};
use serde::{Deserialize, Serialize};

pub const SETTINGS_STORE_KEY: &str = "fair-play/settings";
pub const SETTINGS_STORE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsState {
    pub locale: Locale,
}

/// Translation runtime that follows the stored locale.
pub trait LanguageSwitcher {
    /// Currently active language code.
    fn language(&self) -> &str;
    fn change_language(&mut self, locale: Locale);
}

pub struct SettingsStore<S: KeyValueStorage> {
    storage: S,
    persist: PersistOptions<SettingsState>,
    state: SettingsState,
    listeners: Listeners<SettingsState>,
}

impl<S: KeyValueStorage> SettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_options(
            storage,
            PersistOptions::new(SETTINGS_STORE_KEY, SETTINGS_STORE_VERSION),
        )
    }

    pub fn with_options(storage: S, persist: PersistOptions<SettingsState>) -> Self {
        let state = load_state(&storage, &persist).unwrap_or_default();
        Self {
            storage,
            persist,
            state,
            listeners: Listeners::default(),
        }
    }

    pub fn state(&self) -> SettingsState {
        self.state
    }

    pub fn locale(&self) -> Locale {
        self.state.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.state.locale = locale;
        info!("event=settings_locale module=settings_store status=ok locale={locale}");
        self.save_and_notify();
    }

    /// Switches between the two supported locales and returns the new one.
    pub fn toggle_locale(&mut self) -> Locale {
        let next = self.state.locale.toggled();
        self.set_locale(next);
        next
    }

    /// Asks `switcher` to follow the stored locale when it differs.
    ///
    /// Returns whether a change was requested.
    pub fn sync_language(&self, switcher: &mut dyn LanguageSwitcher) -> bool {
        let locale = self.state.locale;
        if switcher.language() == locale.code() {
            return false;
        }
        debug!(
            "event=settings_sync_language module=settings_store from={} to={locale}",
            switcher.language()
        );
        switcher.change_language(locale);
        true
    }

    pub fn subscribe(&mut self, listener: impl Fn(&SettingsState) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn save_and_notify(&self) {
        save_state(&self.storage, &self.persist, &self.state);
        self.listeners.notify(&self.state);
    }
}
