//! Settings store - singleton record of display preferences.
//!
//! Unlike the user profile, a settings record always exists in memory: an
//! absent or corrupted document falls back to [`Settings::default`], which is
//! persisted right away so storage and snapshot agree from the start.

use crate::notify::{Notification, NotificationSink};
use crate::storage::Storage;
use crate::store::{commit, load_document, LoadOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage key for the settings document.
pub const SETTINGS_KEY: &str = "settings";

/// Default accent color for primary buttons.
pub const DEFAULT_BUTTON_COLOR: &str = "#6D28D9";

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Base font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// The full settings record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    pub font_size: FontSize,
    /// CSS hex color string.
    pub primary_button_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            font_size: FontSize::Medium,
            primary_button_color: DEFAULT_BUTTON_COLOR.to_string(),
        }
    }
}

/// Partial settings update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub font_size: Option<FontSize>,
    pub primary_button_color: Option<String>,
}

/// The settings store.
pub struct SettingsStore {
    value: Settings,
    storage: Arc<dyn Storage>,
    sink: Arc<dyn NotificationSink>,
    outcome: LoadOutcome,
}

impl SettingsStore {
    /// Open the store, restoring any persisted settings.
    pub fn open(storage: Arc<dyn Storage>, sink: Arc<dyn NotificationSink>) -> Self {
        let (value, outcome) = load_document(storage.as_ref(), SETTINGS_KEY);
        let store = Self {
            value: value.unwrap_or_default(),
            storage,
            sink,
            outcome,
        };
        if outcome != LoadOutcome::Restored {
            // Materialize the defaults so the stored document exists.
            commit(store.storage.as_ref(), SETTINGS_KEY, &store.value);
        }
        store
    }

    /// What opening found under the settings storage key.
    pub fn load_outcome(&self) -> LoadOutcome {
        self.outcome
    }

    /// The current settings record.
    pub fn settings(&self) -> &Settings {
        &self.value
    }

    /// Shallow-merge the given fields into the settings and persist.
    pub fn update(&mut self, patch: SettingsPatch) {
        if let Some(theme) = patch.theme {
            self.value.theme = theme;
        }
        if let Some(font_size) = patch.font_size {
            self.value.font_size = font_size;
        }
        if let Some(color) = patch.primary_button_color {
            self.value.primary_button_color = color;
        }
        commit(self.storage.as_ref(), SETTINGS_KEY, &self.value);
        self.sink.notify(Notification::new(
            "Settings updated",
            "Your preferences have been saved.",
        ));
    }

    /// Replace the record with the defaults and persist.
    pub fn reset_to_default(&mut self) {
        self.value = Settings::default();
        commit(self.storage.as_ref(), SETTINGS_KEY, &self.value);
        self.sink.notify(Notification::new(
            "Settings reset",
            "Your preferences have been reset to default values.",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;
    use crate::storage::MemoryStorage;

    fn open_store(storage: &MemoryStorage, sink: &RecordingSink) -> SettingsStore {
        SettingsStore::open(Arc::new(storage.clone()), Arc::new(sink.clone()))
    }

    #[test]
    fn fresh_open_materializes_defaults() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        let store = open_store(&storage, &sink);

        assert_eq!(store.load_outcome(), LoadOutcome::Fresh);
        assert_eq!(store.settings(), &Settings::default());
        // Defaults are written through immediately.
        let raw = storage.read(SETTINGS_KEY).unwrap();
        assert!(raw.contains("light"));
        assert!(raw.contains(DEFAULT_BUTTON_COLOR));
    }

    #[test]
    fn update_merges_only_given_fields() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        let mut store = open_store(&storage, &sink);

        store.update(SettingsPatch {
            theme: Some(Theme::Dark),
            ..SettingsPatch::default()
        });

        assert_eq!(store.settings().theme, Theme::Dark);
        assert_eq!(store.settings().font_size, FontSize::Medium);
        assert_eq!(store.settings().primary_button_color, DEFAULT_BUTTON_COLOR);
        assert_eq!(sink.notifications()[0].title, "Settings updated");
    }

    #[test]
    fn reset_restores_the_default_record() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        let mut store = open_store(&storage, &sink);

        store.update(SettingsPatch {
            theme: Some(Theme::Dark),
            font_size: Some(FontSize::Large),
            primary_button_color: Some("#000000".to_string()),
        });
        store.reset_to_default();

        assert_eq!(
            store.settings(),
            &Settings {
                theme: Theme::Light,
                font_size: FontSize::Medium,
                primary_button_color: DEFAULT_BUTTON_COLOR.to_string(),
            }
        );
        assert_eq!(sink.notifications().last().unwrap().title, "Settings reset");
    }

    #[test]
    fn settings_survive_reopen() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        {
            let mut store = open_store(&storage, &sink);
            store.update(SettingsPatch {
                font_size: Some(FontSize::Small),
                ..SettingsPatch::default()
            });
        }

        let reopened = open_store(&storage, &sink);
        assert_eq!(reopened.load_outcome(), LoadOutcome::Restored);
        assert_eq!(reopened.settings().font_size, FontSize::Small);
    }

    #[test]
    fn corrupted_document_falls_back_to_defaults() {
        let storage = MemoryStorage::new();
        storage.write(SETTINGS_KEY, "not even close").unwrap();
        let sink = RecordingSink::new();

        let store = open_store(&storage, &sink);
        assert_eq!(store.load_outcome(), LoadOutcome::Corrupted);
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn wire_shape_uses_camel_case_and_lowercase_variants() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("fontSize"));
        assert!(json.contains("primaryButtonColor"));
        assert!(json.contains("\"light\""));
        assert!(json.contains("\"medium\""));
    }
}
