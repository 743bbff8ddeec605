//! ScriptApi - String-keyed façade over the registries for scripting bindings

use crate::bypass::BypassRegistry;
use crate::distribution::ColorDistribution;
use crate::toughness::OverrideRegistry;
use crate::types::ActorTypeId;
use std::sync::Arc;

/// What a scripting binding calls into
///
/// Changes take effect the next time an actor of the type is initialized.
#[derive(Debug, Clone)]
pub struct ScriptApi {
    overrides: Arc<OverrideRegistry>,
    bypass: Arc<BypassRegistry>,
}

impl ScriptApi {
    pub fn new(overrides: Arc<OverrideRegistry>, bypass: Arc<BypassRegistry>) -> Self {
        ScriptApi { overrides, bypass }
    }

    // === Max health ===

    pub fn set_max_health(&self, type_id: &str, value: f32) {
        self.overrides.set_max_health(type_id, value);
    }

    pub fn get_max_health(&self, type_id: &str) -> Option<f32> {
        self.overrides.max_health(&ActorTypeId::new(type_id))
    }

    pub fn remove_max_health(&self, type_id: &str) -> bool {
        self.overrides
            .remove_max_health(&ActorTypeId::new(type_id))
            .is_some()
    }

    // === Max toughness ===

    pub fn set_max_toughness(&self, type_id: &str, value: f32) {
        self.overrides.set_max_toughness(type_id, value);
    }

    pub fn get_max_toughness(&self, type_id: &str) -> Option<f32> {
        self.overrides.max_toughness(&ActorTypeId::new(type_id))
    }

    pub fn remove_max_toughness(&self, type_id: &str) -> bool {
        self.overrides
            .remove_max_toughness(&ActorTypeId::new(type_id))
            .is_some()
    }

    // === Colors ===

    /// Single color; unknown names become White
    pub fn set_color(&self, type_id: &str, color: &str) {
        self.overrides
            .set_distribution(type_id, ColorDistribution::single_named(color));
    }

    /// Weighted colors; unknown names are skipped
    pub fn set_colors(&self, type_id: &str, weights: &[(&str, f32)]) {
        let distribution = ColorDistribution::from_named(weights.iter().copied());
        self.overrides.set_distribution(type_id, distribution);
    }

    /// `(color name, fraction)` pairs in color order
    pub fn get_colors(&self, type_id: &str) -> Option<Vec<(String, f32)>> {
        self.overrides
            .distribution(&ActorTypeId::new(type_id))
            .map(|d| d.iter().map(|(c, f)| (c.name().to_string(), f)).collect())
    }

    pub fn remove_colors(&self, type_id: &str) -> bool {
        self.overrides
            .remove_distribution(&ActorTypeId::new(type_id))
            .is_some()
    }

    // === Exemptions ===

    pub fn add_exempt_damage_type(&self, id: &str) -> bool {
        self.bypass.add_damage_type(id)
    }

    pub fn remove_exempt_damage_type(&self, id: &str) -> bool {
        self.bypass.remove_damage_type(id)
    }

    pub fn has_exempt_damage_type(&self, id: &str) -> bool {
        self.bypass.contains_damage_type(id)
    }

    pub fn add_exempt_mod_id(&self, namespace: &str) -> bool {
        self.bypass.add_mod_id(namespace)
    }

    pub fn remove_exempt_mod_id(&self, namespace: &str) -> bool {
        self.bypass.remove_mod_id(namespace)
    }

    pub fn has_exempt_mod_id(&self, namespace: &str) -> bool {
        self.bypass.contains_mod_id(namespace)
    }

    pub fn add_exempt_item_prefix(&self, prefix: &str) -> bool {
        self.bypass.add_item_prefix(prefix)
    }

    pub fn remove_exempt_item_prefix(&self, prefix: &str) -> bool {
        self.bypass.remove_item_prefix(prefix)
    }

    pub fn has_exempt_item_prefix(&self, prefix: &str) -> bool {
        self.bypass.contains_item_prefix(prefix)
    }

    // === Bulk ===

    pub fn clear_overrides(&self) {
        self.overrides.clear();
    }

    pub fn clear_exemptions(&self) {
        self.bypass.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> ScriptApi {
        ScriptApi::new(Arc::new(OverrideRegistry::new()), Arc::new(BypassRegistry::new()))
    }

    #[test]
    fn test_max_values() {
        let api = api();
        api.set_max_toughness("minecraft:creeper", 60.0);
        api.set_max_health("minecraft:creeper", 30.0);
        assert_eq!(api.get_max_toughness("minecraft:creeper"), Some(60.0));
        assert_eq!(api.get_max_health("Minecraft:Creeper"), Some(30.0));

        assert!(api.remove_max_toughness("minecraft:creeper"));
        assert!(!api.remove_max_toughness("minecraft:creeper"));
        assert_eq!(api.get_max_toughness("minecraft:creeper"), None);
    }

    #[test]
    fn test_colors() {
        let api = api();
        api.set_colors("minecraft:creeper", &[("green", 3.0), ("black", 1.0), ("sparkly", 5.0)]);
        let colors = api.get_colors("minecraft:creeper").unwrap();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].0, "black");
        assert!((colors[0].1 - 0.25).abs() < 1e-6);

        api.set_color("minecraft:creeper", "nope");
        assert_eq!(api.get_colors("minecraft:creeper"), Some(vec![("white".to_string(), 1.0)]));

        assert!(api.remove_colors("minecraft:creeper"));
        assert_eq!(api.get_colors("minecraft:creeper"), None);
    }

    #[test]
    fn test_exemptions() {
        let api = api();
        assert!(api.add_exempt_damage_type("mymod:laser"));
        assert!(api.add_exempt_mod_id("guns"));
        assert!(api.add_exempt_item_prefix("guns:"));
        assert!(api.has_exempt_damage_type("mymod:laser"));
        assert!(api.has_exempt_mod_id("GUNS"));
        assert!(api.has_exempt_item_prefix("guns:"));

        assert!(api.remove_exempt_mod_id("guns"));
        assert!(!api.has_exempt_mod_id("guns"));

        api.clear_exemptions();
        assert!(!api.has_exempt_damage_type("mymod:laser"));
    }

    #[test]
    fn test_shared_with_registry() {
        let overrides = Arc::new(OverrideRegistry::new());
        let api = ScriptApi::new(Arc::clone(&overrides), Arc::new(BypassRegistry::new()));
        api.set_max_toughness("minecraft:zombie", 10.0);
        assert!(overrides.has_toughness_override(&ActorTypeId::new("minecraft:zombie")));
        api.clear_overrides();
        assert!(overrides.is_empty());
    }
}
