use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::error::{Result, StyleError};
use crate::styles::{
    GlassStyle, GlitchStyle, HoloStyle, NeonStyle, OverrideBundle, RetroStyle, Style, StyleInfo,
};

/// Registry for managing available overlay style families
///
/// The registry is the explicit static mapping from family name to factory:
/// all built-in families are registered at construction, and custom families
/// can be added by callers. It also backs the preset catalog and the
/// discovery surface.
pub struct StyleRegistry {
    styles: HashMap<String, Box<dyn Fn() -> Box<dyn Style>>>,
}

impl StyleRegistry {
    /// Create a new style registry with all built-in families
    pub fn new() -> Self {
        let mut registry = Self {
            styles: HashMap::new(),
        };

        registry.register_builtin_styles();
        registry
    }

    fn register_builtin_styles(&mut self) {
        self.styles
            .insert("neon".to_string(), Box::new(|| Box::new(NeonStyle::new())));
        self.styles
            .insert("glass".to_string(), Box::new(|| Box::new(GlassStyle::new())));
        self.styles
            .insert("glitch".to_string(), Box::new(|| Box::new(GlitchStyle::new())));
        self.styles
            .insert("holo".to_string(), Box::new(|| Box::new(HoloStyle::new())));
        self.styles
            .insert("retro".to_string(), Box::new(|| Box::new(RetroStyle::new())));
    }

    /// Register a custom style family
    ///
    /// # Arguments
    ///
    /// * `name` - Unique name for the family
    /// * `factory` - Function that creates new instances of the style
    pub fn register<F>(&mut self, name: String, factory: F)
    where
        F: Fn() -> Box<dyn Style> + 'static,
    {
        self.styles.insert(name, Box::new(factory));
    }

    /// Get a style by family name
    ///
    /// Returns a new instance of the requested style, or None if the family
    /// is not registered.
    pub fn get_style(&self, name: &str) -> Option<Box<dyn Style>> {
        self.styles.get(name).map(|factory| factory())
    }

    /// Get all available family names
    pub fn available_styles(&self) -> Vec<String> {
        let mut names: Vec<String> = self.styles.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a family is available
    pub fn has_style(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Get the number of registered families
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    // ==========================================
    // PRESET CATALOG
    // ==========================================

    fn style(&self, family: &str) -> Result<Box<dyn Style>> {
        self.get_style(family)
            .ok_or_else(|| StyleError::NotFound { name: family.to_string() }.into())
    }

    /// Preset names for one family; unknown family is an error, not a
    /// silent miss
    pub fn preset_names(&self, family: &str) -> Result<Vec<String>> {
        let style = self.style(family)?;
        Ok(style.presets().iter().map(|p| p.name.to_string()).collect())
    }

    /// Look up one preset bundle
    pub fn preset(&self, family: &str, name: &str) -> Result<OverrideBundle> {
        let style = self.style(family)?;
        style
            .presets()
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.overrides)
            .ok_or_else(|| {
                StyleError::PresetNotFound {
                    family: family.to_string(),
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// Discovery surface: every family with its preset names
    pub fn style_catalog(&self) -> Vec<StyleInfo> {
        self.available_styles()
            .into_iter()
            .filter_map(|family| self.get_style(&family))
            .map(|style| StyleInfo {
                family: style.name().to_string(),
                description: style.description().to_string(),
                presets: style.presets().iter().map(|p| p.name.to_string()).collect(),
            })
            .collect()
    }

    /// Flat preset mapping keyed "family_preset", for external enumeration
    pub fn preset_styles(&self) -> BTreeMap<String, OverrideBundle> {
        let mut map = BTreeMap::new();
        for family in self.available_styles() {
            if let Some(style) = self.get_style(&family) {
                for preset in style.presets() {
                    map.insert(format!("{}_{}", family, preset.name), preset.overrides);
                }
            }
        }
        map
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OverlayError;

    #[test]
    fn test_builtin_styles_available() {
        let registry = StyleRegistry::new();

        assert!(registry.has_style("neon"));
        assert!(registry.has_style("glass"));
        assert!(registry.has_style("glitch"));
        assert!(registry.has_style("holo"));
        assert!(registry.has_style("retro"));

        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_get_style() {
        let registry = StyleRegistry::new();

        let neon = registry.get_style("neon");
        assert!(neon.is_some());
        assert_eq!(neon.unwrap().name(), "neon");

        let unknown = registry.get_style("unknown");
        assert!(unknown.is_none());
    }

    #[test]
    fn test_custom_style_registration() {
        let mut registry = StyleRegistry::new();

        registry.register("custom".to_string(), || {
            Box::new(NeonStyle::new()) // Using neon as a placeholder
        });

        assert!(registry.has_style("custom"));
        assert_eq!(registry.len(), 6); // 5 built-in + 1 custom
    }

    #[test]
    fn test_preset_lookup() {
        let registry = StyleRegistry::new();

        let breathing = registry.preset("neon", "breathing").unwrap();
        assert_eq!(breathing.get("pulse").and_then(|v| v.as_bool()), Some(true));
    }

    #[test]
    fn test_unknown_preset_is_error() {
        let registry = StyleRegistry::new();

        let err = registry.preset("neon", "nonexistent").unwrap_err();
        assert!(matches!(
            err,
            OverlayError::Style(StyleError::PresetNotFound { .. })
        ));

        let err = registry.preset_names("vaporwave").unwrap_err();
        assert!(matches!(err, OverlayError::Style(StyleError::NotFound { .. })));
    }

    #[test]
    fn test_style_catalog_covers_all_families() {
        let registry = StyleRegistry::new();
        let catalog = registry.style_catalog();
        assert_eq!(catalog.len(), 5);
        let neon = catalog.iter().find(|i| i.family == "neon").unwrap();
        assert!(neon.presets.contains(&"breathing".to_string()));
    }

    #[test]
    fn test_preset_styles_keyed_by_family_and_name() {
        let registry = StyleRegistry::new();
        let map = registry.preset_styles();
        assert!(map.contains_key("neon_breathing"));
        assert!(map.contains_key("retro_stamp"));
        assert!(map.contains_key("glitch_matrix"));
    }
}
