use tracing::warn;

use crate::{
    error::{Result, StyleError},
    settings::{ImageStyleSettings, StyleDef, DEFAULT_SELECTION},
};

/// Registry for the enumerated border-radius styles and the active selection
///
/// The registry provides a central place to look up styles by identifier and
/// to answer "which class should images carry right now". The style table is
/// fixed at construction; only the selection changes, and only through
/// [`set_selected`](StyleRegistry::set_selected).
///
/// Invariant: the table is never empty and `selected` always indexes into it,
/// so the active selection is always one of the table's identifiers.
pub struct StyleRegistry {
    styles: Vec<StyleDef>,
    selected: usize,
}

impl StyleRegistry {
    /// Build a registry from loaded settings.
    ///
    /// Never fails: an empty persisted style table is replaced by the
    /// built-in table, and a persisted selection that does not match any
    /// entry falls back to the default identifier (or the table's first
    /// entry if the default is absent too).
    pub fn from_settings(settings: &ImageStyleSettings) -> Self {
        let styles = if settings.styles.is_empty() {
            warn!("Persisted style table is empty, using the built-in table");
            ImageStyleSettings::default().styles
        } else {
            settings.styles.clone()
        };

        let selected = match styles.iter().position(|s| s.name == settings.border_radius) {
            Some(index) => index,
            None => {
                warn!(
                    "Persisted selection '{}' is not a known style, falling back to '{}'",
                    settings.border_radius, DEFAULT_SELECTION
                );
                styles
                    .iter()
                    .position(|s| s.name == DEFAULT_SELECTION)
                    .unwrap_or(0)
            }
        };

        Self { styles, selected }
    }

    /// Identifier of the currently selected style
    pub fn selected(&self) -> &str {
        &self.styles[self.selected].name
    }

    /// CSS class of the currently selected style
    pub fn selected_class(&self) -> &str {
        &self.styles[self.selected].css
    }

    /// Change the active selection
    ///
    /// Fails with [`StyleError::UnknownStyle`] for identifiers outside the
    /// table, leaving the current selection unchanged. Already-decorated
    /// images keep their old class until the next decoration pass touches
    /// them.
    pub fn set_selected(&mut self, name: &str) -> Result<()> {
        match self.styles.iter().position(|s| s.name == name) {
            Some(index) => {
                self.selected = index;
                Ok(())
            }
            None => Err(StyleError::UnknownStyle {
                name: name.to_string(),
            }
            .into()),
        }
    }

    /// Get the CSS class for a style by identifier
    pub fn css_class_for(&self, name: &str) -> Result<&str> {
        self.styles
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.css.as_str())
            .ok_or_else(|| {
                StyleError::UnknownStyle {
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// All CSS classes in the table, in table order
    ///
    /// Decoration passes use this as the full set of classes to reconcile.
    pub fn all_classes(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|s| s.css.as_str())
    }

    /// Get all available style identifiers
    pub fn available_styles(&self) -> Vec<&str> {
        self.styles.iter().map(|s| s.name.as_str()).collect()
    }

    /// Check if a style identifier is in the table
    pub fn has_style(&self, name: &str) -> bool {
        self.styles.iter().any(|s| s.name == name)
    }

    /// Get the number of registered styles
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Snapshot the registry back into a persistable settings object
    pub fn to_settings(&self) -> ImageStyleSettings {
        ImageStyleSettings {
            border_radius: self.styles[self.selected].name.clone(),
            styles: self.styles.clone(),
        }
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::from_settings(&ImageStyleSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_styles_available() {
        let registry = StyleRegistry::default();

        assert!(registry.has_style("none"));
        assert!(registry.has_style("sm"));
        assert!(registry.has_style("4xl"));

        assert_eq!(registry.len(), 9);
        assert_eq!(registry.selected(), "sm");
    }

    #[test]
    fn test_css_class_for() {
        let registry = StyleRegistry::default();

        assert_eq!(registry.css_class_for("md").unwrap(), "image-style-rounded-md");
        assert!(registry.css_class_for("huge").is_err());
    }

    #[test]
    fn test_set_selected() {
        let mut registry = StyleRegistry::default();

        registry.set_selected("xl").unwrap();
        assert_eq!(registry.selected(), "xl");
        assert_eq!(registry.selected_class(), "image-style-rounded-xl");
    }

    #[test]
    fn test_invalid_selection_leaves_registry_unchanged() {
        let mut registry = StyleRegistry::default();

        let result = registry.set_selected("mega");
        assert!(result.is_err());
        assert_eq!(registry.selected(), "sm");
    }

    #[test]
    fn test_unknown_persisted_selection_falls_back_to_default() {
        let mut settings = ImageStyleSettings::default();
        settings.border_radius = "bogus".to_string();

        let registry = StyleRegistry::from_settings(&settings);
        assert_eq!(registry.selected(), "sm");
    }

    #[test]
    fn test_empty_persisted_table_uses_builtin_table() {
        let mut settings = ImageStyleSettings::default();
        settings.styles.clear();

        let registry = StyleRegistry::from_settings(&settings);

        assert_eq!(registry.len(), 9);
        assert_eq!(registry.selected(), "sm");
        assert!(registry.has_style(registry.selected()));
        assert_eq!(registry.selected_class(), "image-style-rounded-sm");
    }

    #[test]
    fn test_table_without_default_entry_selects_first_entry() {
        let settings = ImageStyleSettings {
            border_radius: "sm".to_string(),
            styles: vec![StyleDef {
                name: "pill".to_string(),
                css: "image-style-rounded-pill".to_string(),
            }],
        };

        let registry = StyleRegistry::from_settings(&settings);

        assert_eq!(registry.selected(), "pill");
        assert_eq!(registry.selected_class(), "image-style-rounded-pill");
    }

    #[test]
    fn test_settings_snapshot_roundtrip() {
        let mut registry = StyleRegistry::default();
        registry.set_selected("3xl").unwrap();

        let reloaded = StyleRegistry::from_settings(&registry.to_settings());
        assert_eq!(reloaded.selected(), "3xl");
    }
}
