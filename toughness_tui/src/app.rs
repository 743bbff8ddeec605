//! Application state

use crate::simulation::BreakSimulation;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use toughness_core::{
    config::{default_config, load_config, CombatConstants},
    damage::DamageEvent,
    Actor, ActorCategory, BypassRegistry, Combatant, DamageOutcome, DamageResolver, OverrideRegistry,
    PassthroughReason, ReductionPolicy, Resolution, ScriptApi, ToughnessBar, ToughnessCapability,
    ToughnessColor, ToughnessConfig, Weapon,
};
use tracing::{info, warn};

const CONFIG_PATHS: [&str; 3] = [
    "toughness_tui/data/toughness.toml",
    "data/toughness.toml",
    "../toughness_tui/data/toughness.toml",
];

/// Hits the break simulation gives up after
const SIMULATION_HITS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Combat,
    Registry,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Combat, Tab::Registry, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Combat => "Combat",
            Tab::Registry => "Registry",
            Tab::Help => "Help",
        }
    }
}

/// A weapon the player can swing
#[derive(Debug, Clone)]
pub struct WeaponPreset {
    pub label: &'static str,
    pub weapon: Weapon,
}

impl WeaponPreset {
    fn new(label: &'static str, weapon: Weapon) -> Self {
        WeaponPreset { label, weapon }
    }

    /// Nominal damage of the weapon
    pub fn damage(&self) -> f32 {
        self.weapon.attack_damage.unwrap_or(1.0)
    }
}

fn weapon_presets() -> Vec<WeaponPreset> {
    let mut presets = vec![
        WeaponPreset::new(
            "Wooden Sword",
            Weapon::new("minecraft:wooden_sword").with_attack_damage(4.0),
        ),
        WeaponPreset::new(
            "Iron Sword",
            Weapon::new("minecraft:iron_sword")
                .with_attack_damage(6.0)
                .with_breaker(&[ToughnessColor::White, ToughnessColor::Green]),
        ),
        WeaponPreset::new(
            "Netherite Axe",
            Weapon::new("minecraft:netherite_axe")
                .with_attack_damage(10.0)
                .with_breaker(&[ToughnessColor::Black, ToughnessColor::Red]),
        ),
        WeaponPreset::new(
            "Trident",
            Weapon::new("minecraft:trident")
                .with_attack_damage(9.0)
                .with_breaker(&[ToughnessColor::Blue, ToughnessColor::Black]),
        ),
        WeaponPreset::new("Rifle", Weapon::new("guns:rifle").with_attack_damage(12.0)),
    ];

    let mut prism = Weapon::new("toughness:prism_blade").with_attack_damage(8.0);
    prism.set_can_break_toughness(true);
    for color in ToughnessColor::all() {
        prism.add_color(*color);
    }
    presets.push(WeaponPreset::new("Prism Blade", prism));
    presets
}

fn target_roster() -> Vec<Actor> {
    vec![
        Actor::new(10, "minecraft:zombie", ActorCategory::Hostile).with_defense(2.0),
        Actor::new(11, "minecraft:skeleton", ActorCategory::Hostile),
        Actor::new(12, "minecraft:wither_skeleton", ActorCategory::Hostile).with_defense(4.0),
        Actor::new(13, "minecraft:warden", ActorCategory::Hostile)
            .with_health(500.0)
            .with_defense(20.0)
            .boss(),
        Actor::new(14, "minecraft:wither", ActorCategory::Hostile)
            .with_health(300.0)
            .with_defense(4.0)
            .boss(),
        Actor::new(15, "minecraft:wolf", ActorCategory::Neutral).with_health(8.0),
        Actor::new(16, "minecraft:cow", ActorCategory::Passive).with_health(10.0),
    ]
}

pub struct App {
    pub current_tab: Tab,
    pub resolver: DamageResolver,
    pub script: ScriptApi,
    pub config_source: String,
    pub player: Actor,
    /// Fresh copies used by reset
    pub roster: Vec<Actor>,
    pub targets: Vec<Actor>,
    pub selected_target: usize,
    pub weapons: Vec<WeaponPreset>,
    pub selected_weapon: usize,
    pub last_outcome: Option<DamageOutcome>,
    pub combat_log: Vec<String>,
    pub rng: StdRng,
    pub show_help: bool,
    pub log_scroll: usize,
    pub registry_scroll: usize,
}

impl App {
    pub fn new() -> Self {
        let (config, config_source) = Self::read_config();
        let mut resolver = DamageResolver::from_config(&config).unwrap_or_else(|e| {
            warn!(error = %e, "config rejected, using built-in defaults");
            DamageResolver::new(
                Arc::new(OverrideRegistry::new()),
                Arc::new(BypassRegistry::new()),
                ReductionPolicy::default(),
                CombatConstants::default(),
            )
        });
        let script = ScriptApi::new(
            Arc::clone(resolver.overrides()),
            Arc::clone(resolver.bypass()),
        );

        let roster = target_roster();
        let mut targets = roster.clone();
        for target in &mut targets {
            resolver.on_actor_joined(target);
        }

        let weapons = weapon_presets();
        let player = Actor::player(1).with_weapon(weapons[0].weapon.clone());

        App {
            current_tab: Tab::Combat,
            resolver,
            script,
            config_source: config_source.clone(),
            player,
            roster,
            targets,
            selected_target: 0,
            weapons,
            selected_weapon: 0,
            last_outcome: None,
            combat_log: vec![
                format!("Loaded config from {}", config_source),
                "Toughness bench ready.".to_string(),
            ],
            rng: StdRng::seed_from_u64(42),
            show_help: false,
            log_scroll: 0,
            registry_scroll: 0,
        }
    }

    fn config_path() -> Option<PathBuf> {
        CONFIG_PATHS
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(Path::to_path_buf)
    }

    fn read_config() -> (ToughnessConfig, String) {
        if let Some(path) = Self::config_path() {
            match load_config(&path) {
                Ok(config) => {
                    info!(path = %path.display(), entities = config.entities.len(), "loaded config");
                    return (config, path.display().to_string());
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load config");
                }
            }
        }
        info!("no toughness.toml found, using bundled defaults");
        (default_config(), "bundled defaults".to_string())
    }

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let next_idx = (current_idx + 1) % tabs.len();
        self.current_tab = tabs[next_idx];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.current_tab = tabs[prev_idx];
    }

    pub fn set_tab(&mut self, index: usize) {
        let tabs = Tab::all();
        if index < tabs.len() {
            self.current_tab = tabs[index];
        }
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Combat => self.log_scroll = self.log_scroll.saturating_sub(1),
            Tab::Registry => self.registry_scroll = self.registry_scroll.saturating_sub(1),
            Tab::Help => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Combat => {
                if self.log_scroll + 1 < self.combat_log.len() {
                    self.log_scroll += 1;
                }
            }
            Tab::Registry => self.registry_scroll += 1,
            Tab::Help => {}
        }
    }

    pub fn next_target(&mut self) {
        self.selected_target = (self.selected_target + 1) % self.targets.len();
        self.last_outcome = None;
    }

    pub fn prev_target(&mut self) {
        self.selected_target = if self.selected_target == 0 {
            self.targets.len() - 1
        } else {
            self.selected_target - 1
        };
        self.last_outcome = None;
    }

    pub fn next_weapon(&mut self) {
        self.selected_weapon = (self.selected_weapon + 1) % self.weapons.len();
        self.player.weapon = Some(self.weapons[self.selected_weapon].weapon.clone());
    }

    pub fn toggle_falling(&mut self) {
        self.player.falling = !self.player.falling;
    }

    /// Cycle the strength buff through 0..=2 stacks
    pub fn cycle_strength(&mut self) {
        self.player.strength_stacks = (self.player.strength_stacks + 1) % 3;
    }

    pub fn target(&self) -> &Actor {
        &self.targets[self.selected_target]
    }

    pub fn weapon(&self) -> &WeaponPreset {
        &self.weapons[self.selected_weapon]
    }

    /// HUD bar of the selected target
    pub fn target_bar(&self) -> Option<ToughnessBar> {
        self.resolver.store().hud(self.target().id)
    }

    /// Whether the held weapon breaks the selected target's bar
    pub fn weapon_qualifies(&self) -> bool {
        self.resolver
            .store()
            .distribution(self.target().id)
            .map(|d| self.weapon().weapon.qualifies_against(d))
            .unwrap_or(false)
    }

    /// Raw damage of a swing with crit and strength baked in
    pub fn swing_damage(&self) -> f32 {
        let constants = self.resolver.constants();
        let mut damage = self.weapon().damage();
        if self.player.falling {
            damage *= constants.crit_multiplier;
        }
        damage + constants.strength_bonus_per_stack * self.player.strength_stacks as f32
    }

    pub fn attack(&mut self) {
        if !self.target().is_alive() {
            self.log("Target is already dead!".to_string());
            return;
        }

        let raw = self.swing_damage();
        let mut event = DamageEvent::melee(&self.player, self.target(), raw);
        if self.player.falling {
            event = event.with_tag("toughness:critical_hit");
        }
        self.log(format!(
            "━━━ {} hits {} for {:.1} ━━━",
            self.weapon().label,
            self.target().type_id,
            raw
        ));
        self.resolve_hit(event);
    }

    /// Hit the target with void damage to show the bypass path
    pub fn environmental_hit(&mut self) {
        if !self.target().is_alive() {
            self.log("Target is already dead!".to_string());
            return;
        }
        let event = DamageEvent::new(self.target().id, 4.0).with_tag("minecraft:out_of_world");
        self.log(format!("━━━ Void damage on {} ━━━", self.target().type_id));
        self.resolve_hit(event);
    }

    fn resolve_hit(&mut self, event: DamageEvent) {
        let target = &mut self.targets[self.selected_target];
        let outcome = self.resolver.strike_with_rng(target, &event, &mut self.rng);

        if let Some(base) = &outcome.base_damage {
            let mut notes = Vec::new();
            if base.critical {
                notes.push("crit removed".to_string());
            }
            if base.strength_bonus > 0.0 {
                notes.push(format!("-{:.0} strength", base.strength_bonus));
            }
            if base.capped_by_weapon {
                notes.push("capped by weapon".to_string());
            }
            let notes = if notes.is_empty() {
                String::new()
            } else {
                format!(" ({})", notes.join(", "))
            };
            self.log(format!("  Base damage: {:.1}{}", base.amount, notes));
        }

        let line = match &outcome.resolution {
            Resolution::Passthrough(PassthroughReason::Exempt(reason)) => format!("  ⚡ Bypassed: {}", reason),
            Resolution::Passthrough(PassthroughReason::NoToughness) => "  No toughness, full damage".to_string(),
            Resolution::Passthrough(reason) => format!("  Passthrough: {:?}", reason),
            Resolution::Broke { toughness_damage } => {
                format!("  💥 TOUGHNESS BROKEN (-{:.1})", toughness_damage)
            }
            Resolution::Absorbed {
                toughness_damage,
                health_damage,
            } => format!(
                "  🛡 Absorbed: -{:.1} toughness, -{:.1} health",
                toughness_damage, health_damage
            ),
            Resolution::Chipped { health_damage } => {
                format!("  Chipped: -{:.2} health (weapon cannot break)", health_damage)
            }
        };
        self.log(line);
        self.log(format!(
            "  ▶ Health {:.1} → {:.1}, toughness {:.1} → {:.1}",
            outcome.health_before, outcome.health_after, outcome.toughness_before, outcome.toughness_after
        ));
        if outcome.is_killing_blow() {
            self.log("  → TARGET DEFEATED".to_string());
        }
        self.last_outcome = Some(outcome);
    }

    /// Report how long the held weapon takes to break the target
    pub fn simulate(&mut self) {
        let raw = self.swing_damage();
        let result = BreakSimulation::run(
            &self.resolver,
            &self.roster[self.selected_target],
            &self.player,
            raw,
            SIMULATION_HITS,
            &mut self.rng,
        );
        self.log(format!(
            "━━━ Simulation: {} vs {} ━━━",
            self.weapon().label,
            self.target().type_id
        ));
        self.log(format!("  {}", result.summary()));
    }

    /// Restore the selected target and re-arm its toughness
    pub fn reset(&mut self) {
        let mut fresh = self.roster[self.selected_target].clone();
        self.resolver.on_actor_removed(fresh.id);
        self.resolver.on_actor_joined(&mut fresh);
        self.targets[self.selected_target] = fresh;
        self.last_outcome = None;
        self.log("Target reset.".to_string());
    }

    /// Give the target's type the next single color through the script API
    pub fn recolor_target(&mut self) {
        let type_id = self.target().type_id.to_string();
        let current = self
            .resolver
            .store()
            .distribution(self.target().id)
            .map(|d| d.dominant())
            .unwrap_or(ToughnessColor::White);
        let colors = ToughnessColor::all();
        let idx = colors.iter().position(|c| *c == current).unwrap_or(0);
        let next = colors[(idx + 1) % colors.len()];

        self.script.set_color(&type_id, next.name());
        let target = &mut self.targets[self.selected_target];
        self.resolver.on_actor_joined(target);
        self.log(format!("{} toughness is now {}", type_id, next));
    }

    /// Re-read the config file and refresh every target
    pub fn reload(&mut self) {
        let (config, source) = Self::read_config();
        match self.resolver.reload(&config) {
            Ok(()) => {
                self.targets = self.roster.clone();
                for target in &mut self.targets {
                    self.resolver.on_actor_joined(target);
                }
                self.config_source = source.clone();
                self.last_outcome = None;
                self.log(format!("Reloaded config from {}", source));
            }
            Err(e) => self.log(format!("Reload failed: {}", e)),
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.current_tab = Tab::Help;
        }
    }

    fn log(&mut self, line: String) {
        self.combat_log.push(line);
        // Auto-scroll to bottom
        self.log_scroll = self.combat_log.len().saturating_sub(15);
    }
}
