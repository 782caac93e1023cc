use serde::{Deserialize, Serialize};

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: u16 = 14;
/// Default terminal background.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#0d1117";
/// Default terminal foreground.
pub const DEFAULT_FONT_COLOR: &str = "#c9d1d9";

/// Terminal appearance settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Font size in pixels.
    pub font_size: u16,
    /// Background color (`#rrggbb`).
    pub background_color: String,
    /// Foreground color (`#rrggbb`).
    pub font_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            font_color: DEFAULT_FONT_COLOR.to_string(),
        }
    }
}

impl Settings {
    /// Returns a copy with every field present in `patch` replaced.
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            font_size: patch.font_size.unwrap_or(self.font_size),
            background_color: patch
                .background_color
                .clone()
                .unwrap_or_else(|| self.background_color.clone()),
            font_color: patch
                .font_color
                .clone()
                .unwrap_or_else(|| self.font_color.clone()),
        }
    }
}

/// Partial settings: stored records read back with missing fields, and
/// user edits that touch a subset of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
}

impl SettingsPatch {
    /// Patch that only changes the font size.
    pub fn font_size(size: u16) -> Self {
        Self {
            font_size: Some(size),
            ..Self::default()
        }
    }

    /// Patch that changes both colors.
    pub fn colors(background: impl Into<String>, font: impl Into<String>) -> Self {
        Self {
            font_size: None,
            background_color: Some(background.into()),
            font_color: Some(font.into()),
        }
    }

    /// Returns `true` when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.font_size.is_none() && self.background_color.is_none() && self.font_color.is_none()
    }
}

impl From<Settings> for SettingsPatch {
    fn from(settings: Settings) -> Self {
        Self {
            font_size: Some(settings.font_size),
            background_color: Some(settings.background_color),
            font_color: Some(settings.font_color),
        }
    }
}
