//! Configuration loading from TOML (and JSON entity records)

mod constants;

pub use constants::CombatConstants;

use crate::bypass::BypassRegistry;
use crate::defense::constants::{DEFAULT_MAX_PCT, DEFAULT_MIN_PCT};
use crate::defense::ReductionPolicy;
use crate::distribution::ColorDistribution;
use crate::toughness::OverrideRegistry;
use crate::types::ActorTypeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load and validate a toughness config file
pub fn load_config(path: &Path) -> Result<ToughnessConfig, ConfigError> {
    let config: ToughnessConfig = load_toml(path)?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate a toughness config from a TOML string
pub fn parse_config(content: &str) -> Result<ToughnessConfig, ConfigError> {
    let config: ToughnessConfig = parse_toml(content)?;
    config.validate()?;
    Ok(config)
}

/// Parse a JSON array of entity records
pub fn parse_entity_records_json(content: &str) -> Result<Vec<EntityRecord>, ConfigError> {
    let records: Vec<EntityRecord> = serde_json::from_str(content)?;
    Ok(records)
}

/// The bundled default config
pub fn default_config() -> ToughnessConfig {
    let toml = include_str!("../../config/default.toml");
    parse_config(toml).unwrap_or_else(|e| {
        warn!(error = %e, "bundled config is invalid, using built-in defaults");
        ToughnessConfig::default()
    })
}

/// Whole toughness configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToughnessConfig {
    #[serde(default)]
    pub reduction: ReductionConfig,
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub bypass: BypassConfig,
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
}

impl ToughnessConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reduction_policy()?;
        self.combat.validate().map_err(ConfigError::ValidationError)?;
        for record in &self.entities {
            if record.type_id.as_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "entity record with empty type".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn reduction_policy(&self) -> Result<ReductionPolicy, ConfigError> {
        ReductionPolicy::new(self.reduction.min_pct, self.reduction.max_pct)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Push exemptions and entity overrides into the registries
    ///
    /// Adds on top of whatever the registries already hold; clear them first
    /// for a full reload.
    pub fn apply(&self, overrides: &OverrideRegistry, bypass: &BypassRegistry) {
        for id in &self.bypass.damage_types {
            bypass.add_damage_type(id);
        }
        for namespace in &self.bypass.mod_ids {
            bypass.add_mod_id(namespace);
        }
        for prefix in &self.bypass.item_prefixes {
            bypass.add_item_prefix(prefix);
        }

        for record in &self.entities {
            record.apply(overrides);
        }

        info!(
            entities = self.entities.len(),
            damage_types = self.bypass.damage_types.len(),
            mod_ids = self.bypass.mod_ids.len(),
            item_prefixes = self.bypass.item_prefixes.len(),
            "applied toughness config"
        );
    }
}

/// `[reduction]` table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReductionConfig {
    #[serde(default = "default_min_pct")]
    pub min_pct: f32,
    #[serde(default = "default_max_pct")]
    pub max_pct: f32,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        ReductionConfig {
            min_pct: default_min_pct(),
            max_pct: default_max_pct(),
        }
    }
}

fn default_min_pct() -> f32 {
    DEFAULT_MIN_PCT
}
fn default_max_pct() -> f32 {
    DEFAULT_MAX_PCT
}

/// `[bypass]` table, in config order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BypassConfig {
    #[serde(default)]
    pub damage_types: Vec<String>,
    #[serde(default)]
    pub mod_ids: Vec<String>,
    #[serde(default)]
    pub item_prefixes: Vec<String>,
}

/// Colors of an entity record: weighted map or a plain list of names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Weights(BTreeMap<String, f32>),
    Names(Vec<String>),
}

/// Per-actor-type record (`[[entities]]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    #[serde(rename = "type")]
    pub type_id: ActorTypeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_health: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_toughness: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness_colors: Option<ColorSpec>,
}

impl EntityRecord {
    pub fn new(type_id: impl Into<ActorTypeId>) -> Self {
        EntityRecord {
            type_id: type_id.into(),
            max_health: None,
            max_toughness: None,
            toughness_color: None,
            toughness_colors: None,
        }
    }

    /// Configured distribution; `toughnessColors` wins over `toughnessColor`
    pub fn distribution(&self) -> Option<ColorDistribution> {
        match &self.toughness_colors {
            Some(ColorSpec::Weights(weights)) if !weights.is_empty() => {
                return Some(ColorDistribution::from_named(
                    weights.iter().map(|(name, weight)| (name.as_str(), *weight)),
                ));
            }
            Some(ColorSpec::Names(names)) if !names.is_empty() => {
                return Some(ColorDistribution::from_named(
                    names.iter().map(|name| (name.as_str(), 1.0)),
                ));
            }
            _ => {}
        }
        self.toughness_color
            .as_deref()
            .map(ColorDistribution::single_named)
    }

    /// Write this record into the override registry
    pub fn apply(&self, overrides: &OverrideRegistry) {
        if let Some(max_health) = self.max_health {
            overrides.set_max_health(self.type_id.clone(), max_health);
        }
        if let Some(max_toughness) = self.max_toughness {
            overrides.set_max_toughness(self.type_id.clone(), max_toughness);
        }
        if let Some(distribution) = self.distribution() {
            overrides.set_distribution(self.type_id.clone(), distribution);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ToughnessColor;

    const SAMPLE: &str = r#"
[reduction]
min_pct = 0.2
max_pct = 0.5

[combat]
chip_max = 0.1

[bypass]
damage_types = ["mymod:bullet"]
mod_ids = ["guns"]
item_prefixes = ["guns:"]

[[entities]]
type = "minecraft:zombie"
maxHealth = 40.0
maxToughness = 120.0
toughnessColor = "red"

[[entities]]
type = "minecraft:husk"
toughnessColor = "red"
toughnessColors = { blue = 1.0, green = 3.0 }
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert!((config.reduction.min_pct - 0.2).abs() < f32::EPSILON);
        assert!((config.combat.chip_max - 0.1).abs() < f32::EPSILON);
        // Unset tunables keep their defaults
        assert!((config.combat.crit_multiplier - 1.5).abs() < f32::EPSILON);
        assert_eq!(config.bypass.mod_ids, vec!["guns".to_string()]);
        assert_eq!(config.entities.len(), 2);
        assert_eq!(config.entities[0].max_toughness, Some(120.0));
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ToughnessConfig::default());
    }

    #[test]
    fn test_colors_take_precedence() {
        let config = parse_config(SAMPLE).unwrap();
        let husk = config.entities[1].distribution().unwrap();
        assert!(!husk.contains(ToughnessColor::Red));
        assert!((husk.fraction_of(ToughnessColor::Green) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_colors_fall_back_to_white() {
        let mut record = EntityRecord::new("a:b");
        record.toughness_color = Some("ultraviolet".to_string());
        assert_eq!(
            record.distribution(),
            Some(ColorDistribution::single(ToughnessColor::White))
        );

        record.toughness_colors = Some(ColorSpec::Names(vec!["mauve".to_string(), "teal".to_string()]));
        assert_eq!(
            record.distribution(),
            Some(ColorDistribution::single(ToughnessColor::White))
        );
    }

    #[test]
    fn test_no_colors_no_distribution() {
        assert_eq!(EntityRecord::new("a:b").distribution(), None);
    }

    #[test]
    fn test_validation_rejects_bad_reduction() {
        let result = parse_config("[reduction]\nmin_pct = 0.5\nmax_pct = 0.2\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let result = parse_config("[reduction]\nmax_pct = 1.5\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validation_rejects_bad_chip_range() {
        let result = parse_config("[combat]\nchip_min = 0.5\nchip_max = 0.1\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(parse_config("[reduction"), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_json_records() {
        let json = r#"[
            {"type": "minecraft:skeleton", "maxToughness": 80, "toughnessColors": ["red", "blue"]},
            {"type": "minecraft:spider", "maxHealth": 30.5}
        ]"#;
        let records = parse_entity_records_json(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].max_toughness, Some(80.0));
        let dist = records[0].distribution().unwrap();
        assert!((dist.fraction_of(ToughnessColor::Red) - 0.5).abs() < 1e-6);
        assert_eq!(records[1].distribution(), None);

        assert!(matches!(
            parse_entity_records_json("{not json"),
            Err(ConfigError::JsonError(_))
        ));
    }

    #[test]
    fn test_apply_populates_registries() {
        let config = parse_config(SAMPLE).unwrap();
        let overrides = OverrideRegistry::new();
        let bypass = BypassRegistry::new();
        config.apply(&overrides, &bypass);

        let zombie = ActorTypeId::new("minecraft:zombie");
        assert_eq!(overrides.max_health(&zombie), Some(40.0));
        assert_eq!(overrides.max_toughness(&zombie), Some(120.0));
        assert!(overrides.distribution(&zombie).unwrap().contains(ToughnessColor::Red));
        assert!(bypass.contains_damage_type("mymod:bullet"));
        assert!(bypass.contains_mod_id("guns"));
        assert_eq!(bypass.matching_item_prefix("guns:pistol"), Some("guns:".to_string()));
    }

    #[test]
    fn test_default_config_parses() {
        let config = default_config();
        assert!(config.validate().is_ok());
        assert!(config.reduction_policy().is_ok());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let mut record = EntityRecord::new("minecraft:zombie");
        record.max_toughness = Some(10.0);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"minecraft:zombie\""));
        assert!(json.contains("\"maxToughness\":10.0"));
        assert!(!json.contains("maxHealth"));
    }
}
