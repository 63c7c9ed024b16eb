use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SettingsError};

/// A named border-radius style: a short identifier paired with the CSS class
/// that applies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDef {
    /// Short identifier ("none", "xs", "sm", ... "4xl")
    pub name: String,

    /// CSS class that rounds the corners by this style's amount
    pub css: String,
}

impl StyleDef {
    fn new(name: &str, css: &str) -> Self {
        Self {
            name: name.to_string(),
            css: css.to_string(),
        }
    }
}

/// Persisted plugin settings
///
/// Stored in the host's key-value store as a JSON object:
/// `{ "borderRadius": "sm", "styles": [{ "name": ..., "css": ... }, ...] }`.
/// Every field carries a default so a partial or older settings object merges
/// cleanly over the compiled-in table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageStyleSettings {
    /// Identifier of the currently selected style
    pub border_radius: String,

    /// The full enumerated style table
    pub styles: Vec<StyleDef>,
}

/// Default selection when nothing is persisted or the persisted value is stale
pub const DEFAULT_SELECTION: &str = "sm";

impl Default for ImageStyleSettings {
    fn default() -> Self {
        Self {
            border_radius: DEFAULT_SELECTION.to_string(),
            styles: vec![
                StyleDef::new("none", "image-style-rounded-none"),
                StyleDef::new("xs", "image-style-rounded-xs"),
                StyleDef::new("sm", "image-style-rounded-sm"),
                StyleDef::new("md", "image-style-rounded-md"),
                StyleDef::new("lg", "image-style-rounded-lg"),
                StyleDef::new("xl", "image-style-rounded-xl"),
                StyleDef::new("2xl", "image-style-rounded-2xl"),
                StyleDef::new("3xl", "image-style-rounded-3xl"),
                StyleDef::new("4xl", "image-style-rounded-4xl"),
            ],
        }
    }
}

impl ImageStyleSettings {
    /// Build settings from raw persisted JSON, if any.
    ///
    /// Missing data, malformed JSON, and absent fields all fall back to the
    /// defaults. This never fails: settings corruption is recovered silently
    /// so plugin activation cannot be blocked by a bad settings file.
    pub fn from_persisted(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        match serde_json::from_str::<Self>(raw) {
            Ok(mut settings) => {
                // The style table is fixed at nine entries; a persisted object
                // that lost it gets the built-in table back (per-field default)
                if settings.styles.is_empty() {
                    warn!("Persisted style table is empty, restoring the built-in table");
                    settings.styles = Self::default().styles;
                }
                settings
            }
            Err(e) => {
                warn!("Malformed persisted settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Human-readable dropdown options for the host settings panel, in table
    /// order: `(identifier, label)` pairs.
    pub fn dropdown_options(&self) -> Vec<(&str, &str)> {
        self.styles
            .iter()
            .map(|s| (s.name.as_str(), label_for(&s.name)))
            .collect()
    }
}

fn label_for(name: &str) -> &'static str {
    match name {
        "none" => "No border",
        "xs" => "Extra Small",
        "sm" => "Small",
        "md" => "Medium",
        "lg" => "Large",
        "xl" => "Extra Large",
        "2xl" => "2XL",
        "3xl" => "3XL",
        "4xl" => "4XL",
        _ => "Custom",
    }
}

/// Host-managed settings storage
///
/// The host application owns where settings live; the plugin only sees
/// load/save. Loading yields the raw JSON string (or `None` when nothing has
/// been persisted yet); saving is fire-and-forget from the caller's
/// perspective and only the settings-panel and unload paths invoke it.
pub trait SettingsStore {
    /// Read the raw persisted settings, if present
    fn load(&self) -> Result<Option<String>>;

    /// Persist the given settings
    fn save(&self, settings: &ImageStyleSettings) -> Result<()>;
}

/// File-backed settings store holding a single JSON object
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(content))
    }

    fn save(&self, settings: &ImageStyleSettings) -> Result<()> {
        let content =
            serde_json::to_string_pretty(settings).map_err(|e| SettingsError::SerializeFailed {
                reason: e.to_string(),
            })?;

        std::fs::write(&self.path, content).map_err(|_| SettingsError::WriteFailed {
            path: self.path.display().to_string(),
        })?;
        Ok(())
    }
}
