use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    error::{Result, StyleError},
    pipeline::Pipeline,
    position::Anchor,
};

/// A caller- or preset-supplied set of overrides, merged over family defaults
pub type OverrideBundle = HashMap<String, ConfigValue>;

/// Core trait implemented by every effect family
pub trait Style: Send + Sync {
    /// Returns the unique family name of this style
    fn name(&self) -> &str;

    /// Returns a human-readable description of this style
    fn description(&self) -> &str;

    /// The family's immutable default configuration
    ///
    /// Returned fresh per call and merged with overrides through
    /// [`StyleConfig::resolve`]; nothing is shared or mutated across calls.
    fn default_config(&self) -> StyleConfig;

    /// Documented fallback anchor for unrecognized anchor names
    fn default_anchor(&self) -> Anchor {
        Anchor::BottomCenter
    }

    /// Named preset bundles for this family, defined at build time
    fn presets(&self) -> Vec<Preset> {
        Vec::new()
    }

    /// Assemble the ordered draw pipeline for a resolved configuration
    ///
    /// Pure: no renderer interaction, no shared state, deterministic output
    /// for a given config.
    fn build_pipeline(&self, config: &StyleConfig) -> Result<Pipeline>;
}

/// A named, family-scoped override bundle
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub overrides: OverrideBundle,
}

impl Preset {
    pub fn new(name: &'static str, overrides: OverrideBundle) -> Self {
        Self { name, overrides }
    }
}

/// Build an override bundle from key/value pairs; keeps preset tables and
/// tests readable
pub fn bundle(pairs: &[(&str, ConfigValue)]) -> OverrideBundle {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

/// Discovery record for one family
#[derive(Debug, Clone, Serialize)]
pub struct StyleInfo {
    pub family: String,
    pub description: String,
    pub presets: Vec<String>,
}

/// Resolved, immutable per-call style configuration
///
/// Well-known fields are typed; everything else rides in `params` under the
/// family's parameter names. Constructed by [`StyleConfig::resolve`] and
/// discarded once the pipeline is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Display text
    pub text: String,

    /// Font family name (or a font file path the renderer understands)
    pub font: String,

    /// Base font size in points
    pub font_size: u32,

    /// Main text color token
    pub primary_color: String,

    /// Secondary color (panel fill, patina tint, second cycle color)
    pub secondary_color: Option<String>,

    /// Tertiary cycle color
    pub tertiary_color: Option<String>,

    /// Accent color (glitch layer, border, highlight)
    pub accent_color: Option<String>,

    /// Base opacity, 0.0-1.0 before animation modulation
    pub opacity: f32,

    /// Rotation in degrees, applied as a whole-frame pass when nonzero
    pub rotation: f32,

    /// Anchor position within the frame
    pub anchor: Anchor,

    /// Horizontal pixel offset from the anchor
    pub offset_x: u32,

    /// Vertical pixel offset from the anchor
    pub offset_y: u32,

    /// Family-specific effect toggles and tuning values
    pub parameters: HashMap<String, ConfigValue>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: "Sans".to_string(),
            font_size: 48,
            primary_color: "white".to_string(),
            secondary_color: None,
            tertiary_color: None,
            accent_color: None,
            opacity: 1.0,
            rotation: 0.0,
            anchor: Anchor::BottomCenter,
            offset_x: 0,
            offset_y: 60,
            parameters: HashMap::new(),
        }
    }
}

impl StyleConfig {
    /// Shallow-merge caller overrides over family defaults
    ///
    /// Every recognized key replaces the corresponding typed field; unknown
    /// keys are carried into `parameters` untouched. Fails with
    /// `InvalidConfig` only on a semantic type mismatch - values are not
    /// range-clamped. Anchor typos fall back to the default anchor rather
    /// than erroring.
    pub fn resolve(defaults: &StyleConfig, overrides: &OverrideBundle) -> Result<StyleConfig> {
        let mut resolved = defaults.clone();

        for (key, value) in overrides {
            match key.as_str() {
                "text" => resolved.text = require_string(key, value)?,
                "font" => resolved.font = require_string(key, value)?,
                "font_size" => resolved.font_size = require_pixels(key, value)?,
                "color" | "primary_color" => resolved.primary_color = require_string(key, value)?,
                "secondary_color" => resolved.secondary_color = Some(require_string(key, value)?),
                "tertiary_color" => resolved.tertiary_color = Some(require_string(key, value)?),
                "accent_color" => resolved.accent_color = Some(require_string(key, value)?),
                "opacity" => resolved.opacity = require_f32(key, value)?,
                "rotation" => resolved.rotation = require_f32(key, value)?,
                "anchor" | "position" => {
                    let name = require_string(key, value)?;
                    resolved.anchor = Anchor::parse_or(&name, defaults.anchor);
                }
                "offset_x" => resolved.offset_x = require_pixels(key, value)?,
                "offset_y" => resolved.offset_y = require_pixels(key, value)?,
                _ => {
                    resolved.parameters.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(resolved)
    }

    /// Set a parameter value (builder-style, mostly for tests and presets)
    pub fn set<K: Into<String>, V: Into<ConfigValue>>(mut self, key: K, value: V) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Get a parameter value as a specific type
    pub fn get_f32(&self, key: &str) -> Option<f32> {
        self.parameters.get(key).and_then(|v| v.as_f32())
    }

    /// Get a parameter value as a boolean
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.parameters.get(key).and_then(|v| v.as_bool())
    }

    /// Get a parameter value as a string
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(|v| v.as_string())
    }

    /// Get a parameter value with a default
    pub fn get_f32_or(&self, key: &str, default: f32) -> f32 {
        self.get_f32(key).unwrap_or(default)
    }

    /// Get a parameter value with a default
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }
}

fn require_string(key: &str, value: &ConfigValue) -> Result<String> {
    value
        .as_string()
        .map(String::from)
        .ok_or_else(|| type_error(key, value, "string"))
}

fn require_f32(key: &str, value: &ConfigValue) -> Result<f32> {
    value.as_f32().ok_or_else(|| type_error(key, value, "number"))
}

fn require_pixels(key: &str, value: &ConfigValue) -> Result<u32> {
    let n = value.as_f32().ok_or_else(|| type_error(key, value, "pixel count"))?;
    if n < 0.0 {
        return Err(type_error(key, value, "non-negative pixel count"));
    }
    Ok(n as u32)
}

fn type_error(key: &str, value: &ConfigValue, expected: &str) -> crate::error::OverlayError {
    StyleError::InvalidConfig {
        details: format!("'{}' must be a {}, got {:?}", key, expected, value),
    }
    .into()
}

/// Flexible configuration value that can hold different types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Float(f32),
    Bool(bool),
    String(String),
    Integer(i32),
}

impl ConfigValue {
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            ConfigValue::Integer(i) => Some(*i as f32),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            ConfigValue::Float(f) => Some(*f as i32),
            _ => None,
        }
    }
}

impl From<f32> for ConfigValue {
    fn from(value: f32) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Integer(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> StyleConfig {
        StyleConfig {
            text: "DEFAULT".into(),
            font_size: 48,
            opacity: 0.9,
            ..StyleConfig::default()
        }
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let overrides = bundle(&[
            ("text", "HELLO".into()),
            ("font_size", 52.into()),
            ("opacity", 0.5f32.into()),
            ("anchor", "top-left".into()),
        ]);
        let resolved = StyleConfig::resolve(&defaults(), &overrides).unwrap();
        assert_eq!(resolved.text, "HELLO");
        assert_eq!(resolved.font_size, 52);
        assert_eq!(resolved.opacity, 0.5);
        assert_eq!(resolved.anchor, Anchor::TopLeft);
    }

    #[test]
    fn test_absent_keys_keep_defaults() {
        let overrides = bundle(&[("text", "HELLO".into())]);
        let resolved = StyleConfig::resolve(&defaults(), &overrides).unwrap();
        assert_eq!(resolved.font_size, 48);
        assert_eq!(resolved.opacity, 0.9);
        assert_eq!(resolved.anchor, Anchor::BottomCenter);
    }

    #[test]
    fn test_unknown_keys_land_in_parameters() {
        let overrides = bundle(&[("glow_intensity", 8.into())]);
        let resolved = StyleConfig::resolve(&defaults(), &overrides).unwrap();
        assert_eq!(resolved.get_f32("glow_intensity"), Some(8.0));
    }

    #[test]
    fn test_wrong_type_is_invalid_config() {
        let overrides = bundle(&[("opacity", "very".into())]);
        let err = StyleConfig::resolve(&defaults(), &overrides).unwrap_err();
        assert!(matches!(
            err,
            crate::error::OverlayError::Style(StyleError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_negative_offset_rejected() {
        let overrides = bundle(&[("offset_x", (-4).into())]);
        assert!(StyleConfig::resolve(&defaults(), &overrides).is_err());
    }

    #[test]
    fn test_anchor_typo_falls_back_not_error() {
        let overrides = bundle(&[("anchor", "botom-right".into())]);
        let resolved = StyleConfig::resolve(&defaults(), &overrides).unwrap();
        assert_eq!(resolved.anchor, Anchor::BottomCenter);
    }

    #[test]
    fn test_defaults_never_mutated() {
        let base = defaults();
        let overrides = bundle(&[("text", "CHANGED".into()), ("custom", 1.into())]);
        let _ = StyleConfig::resolve(&base, &overrides).unwrap();
        assert_eq!(base.text, "DEFAULT");
        assert!(base.parameters.is_empty());
    }

    #[test]
    fn test_config_value_conversions() {
        assert_eq!(ConfigValue::from(0.8f32).as_f32(), Some(0.8));
        assert_eq!(ConfigValue::from(8).as_f32(), Some(8.0));
        assert_eq!(ConfigValue::from(true).as_bool(), Some(true));
        assert_eq!(ConfigValue::from("x").as_string(), Some("x"));
        assert_eq!(ConfigValue::from(3.9f32).as_i32(), Some(3));
    }
}
