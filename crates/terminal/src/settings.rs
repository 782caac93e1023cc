use proto::{Settings, SettingsPatch, StorageError};
use store::PortfolioStore;
use tracing::warn;

/// Smallest font size offered by the settings dialog.
pub const MIN_FONT_SIZE: u16 = 10;
/// Largest font size offered by the settings dialog.
pub const MAX_FONT_SIZE: u16 = 24;

/// Appearance settings plus whether the persisted record has been read.
///
/// Nothing is saved until a load has been attempted, so a slow or failed read
/// can never overwrite the stored record with defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsManager {
    settings: Settings,
    loaded: bool,
}

impl SettingsManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Merges a stored record over the defaults and marks the manager loaded.
    pub fn apply_loaded(&mut self, stored: Option<SettingsPatch>) {
        if let Some(patch) = stored {
            self.settings = Settings::default().merged(&patch);
        }
        self.loaded = true;
    }

    /// Reads the stored record; a failed read keeps the defaults.
    pub async fn load(&mut self, store: &PortfolioStore) {
        let stored = match store.load_settings().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to load settings: {e}");
                None
            }
        };
        self.apply_loaded(stored);
    }

    /// Applies the given fields only. Returns whether anything changed.
    pub fn update(&mut self, patch: &SettingsPatch) -> bool {
        let mut next = self.settings.merged(patch);
        next.font_size = next.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        if next == self.settings {
            return false;
        }
        self.settings = next;
        true
    }

    /// Restores the compiled-in defaults.
    pub fn reset(&mut self) -> bool {
        self.update(&SettingsPatch::from(Settings::default()))
    }

    /// Steps the font size by `delta`, clamped to the dialog's range.
    pub fn adjust_font_size(&mut self, delta: i32) -> bool {
        let size = (i32::from(self.settings.font_size) + delta)
            .clamp(i32::from(MIN_FONT_SIZE), i32::from(MAX_FONT_SIZE));
        self.update(&SettingsPatch::font_size(size as u16))
    }

    /// Settings worth persisting, or `None` before the first load.
    pub fn persistable(&self) -> Option<&Settings> {
        self.loaded.then_some(&self.settings)
    }

    /// Writes the full record, skipped until loaded.
    pub async fn save(&self, store: &PortfolioStore) -> Result<(), StorageError> {
        match self.persistable() {
            Some(settings) => store.save_settings(settings).await,
            None => Ok(()),
        }
    }
}
