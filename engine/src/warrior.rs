use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

/// Closed set of warrior archetypes. Type advantages are keyed on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarriorType {
    Tough,
    Dexterous,
    Smart,
}

impl WarriorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarriorType::Tough => "Tough",
            WarriorType::Dexterous => "Dexterous",
            WarriorType::Smart => "Smart",
        }
    }
}

impl fmt::Display for WarriorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WarriorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tough" => Ok(WarriorType::Tough),
            "dexterous" => Ok(WarriorType::Dexterous),
            "smart" => Ok(WarriorType::Smart),
            other => Err(format!("unknown warrior type '{}'", other)),
        }
    }
}

/// Per-level growth of the three primary attributes. Carried with the
/// record but not consulted by combat.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatGrowth {
    pub toughness: f64,
    pub dexterity: f64,
    pub intelligence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarriorDefinition {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: WarriorType,
    pub toughness: f64,
    pub dexterity: f64,
    pub intelligence: f64,
    #[serde(default)]
    pub growth: StatGrowth,
    pub min_base_damage: f64,
    pub max_base_damage: f64,
    pub base_attack_time: f64,
}

impl WarriorDefinition {
    /// Every numeric field must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.name.trim().is_empty() {
            return Err(ArenaError::invalid("<unnamed>", "name", "name is required"));
        }
        let fields = [
            ("tough", self.toughness),
            ("inctough", self.growth.toughness),
            ("dex", self.dexterity),
            ("incdex", self.growth.dexterity),
            ("smart", self.intelligence),
            ("incsmart", self.growth.intelligence),
            ("min_dmg", self.min_base_damage),
            ("max_dmg", self.max_base_damage),
            ("attack_time", self.base_attack_time),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ArenaError::invalid(&self.name, field, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(ArenaError::invalid(&self.name, field, "must not be negative"));
            }
        }
        Ok(())
    }
}

/// Flat bonuses granted by an equipped item. `Default` is "no item".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDefinition {
    pub name: String,
    pub add_toughness: f64,
    pub add_dexterity: f64,
    pub add_intelligence: f64,
    pub add_hp: f64,
    pub add_hp_regen: f64,
    pub add_damage: f64,
    pub add_defense: f64,
    pub add_attack_speed: f64,
}

impl ItemDefinition {
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.name.trim().is_empty() {
            return Err(ArenaError::invalid("<unnamed>", "name", "name is required"));
        }
        let fields = [
            ("add_tough", self.add_toughness),
            ("add_dex", self.add_dexterity),
            ("add_smart", self.add_intelligence),
            ("add_hp", self.add_hp),
            ("add_hp_regen", self.add_hp_regen),
            ("add_dmg", self.add_damage),
            ("add_defense", self.add_defense),
            ("add_attack_speed", self.add_attack_speed),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ArenaError::invalid(&self.name, field, "must be a finite number"));
            }
        }
        Ok(())
    }
}

/// A fully-resolved team slot: the warrior and whatever it carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub warrior: WarriorDefinition,
    #[serde(default)]
    pub item: Option<ItemDefinition>,
}

impl Loadout {
    pub fn new(warrior: WarriorDefinition, item: Option<ItemDefinition>) -> Self {
        Self { warrior, item }
    }

    pub fn bare(warrior: WarriorDefinition) -> Self {
        Self { warrior, item: None }
    }

    /// An item penalty may not slow its bearer to a standstill.
    pub fn validate(&self) -> Result<(), ArenaError> {
        let speed = crate::stats::attack_speed(&self.warrior, self.item.as_ref());
        if speed > -100.0 {
            return Ok(());
        }
        let record = self.item.as_ref().map_or(&self.warrior.name, |i| &i.name);
        Err(ArenaError::invalid(
            record,
            "add_attack_speed",
            format!("leaves {} with attack speed {} (must stay above -100)", self.warrior.name, speed),
        ))
    }
}
