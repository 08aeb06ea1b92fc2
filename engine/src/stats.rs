use serde::{Deserialize, Serialize};

use crate::battle::Side;
use crate::warrior::{ItemDefinition, Loadout, WarriorDefinition, WarriorType};

pub const BASE_HP: f64 = 150.0;
pub const HP_PER_TOUGHNESS: f64 = 20.0;
pub const BASE_HP_REGEN: f64 = 0.25;
pub const REGEN_PER_TOUGHNESS: f64 = 0.05;
pub const DEFENSE_PER_DEXTERITY: f64 = 2.0;
pub const DAMAGE_PER_INTELLIGENCE: f64 = 3.0;

/// Live combat state of one warrior for the duration of one battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantState {
    pub name: String,
    pub kind: WarriorType,
    pub hp: f64,
    pub max_hp: f64,
    /// Health restored per simulated second.
    pub hp_regen: f64,
    pub defense: f64,
    pub min_dmg: f64,
    pub max_dmg: f64,
    /// Seconds between one attack and the next.
    pub cooldown: f64,
    pub next_attack_time: f64,
    pub stun_end_time: f64,
    pub stun_immune_until: f64,
    /// Multiplier on the next stun's duration; halves after each stun.
    pub stun_diminish: f64,
}

/// Attack speed bonus in percent; the cooldown is divided by `1 + speed/100`.
pub fn attack_speed(warrior: &WarriorDefinition, item: Option<&ItemDefinition>) -> f64 {
    match item {
        Some(item) => warrior.dexterity + item.add_dexterity + item.add_attack_speed,
        None => warrior.dexterity,
    }
}

/// Derive the starting combat state from a warrior and its optional item.
pub fn derive(warrior: &WarriorDefinition, item: Option<&ItemDefinition>) -> CombatantState {
    let none = ItemDefinition::default();
    let item = item.unwrap_or(&none);

    let toughness = warrior.toughness + item.add_toughness;
    let dexterity = warrior.dexterity + item.add_dexterity;
    let intelligence = warrior.intelligence + item.add_intelligence;

    let max_hp = BASE_HP + toughness * HP_PER_TOUGHNESS + item.add_hp;
    let hp_regen = BASE_HP_REGEN + toughness * REGEN_PER_TOUGHNESS + item.add_hp_regen;
    let defense = dexterity * DEFENSE_PER_DEXTERITY + item.add_defense;
    let damage_bonus = intelligence * DAMAGE_PER_INTELLIGENCE + item.add_damage;
    let cooldown = warrior.base_attack_time / (1.0 + attack_speed(warrior, Some(item)) / 100.0);

    CombatantState {
        name: warrior.name.clone(),
        kind: warrior.kind,
        hp: max_hp,
        max_hp,
        hp_regen,
        defense,
        min_dmg: warrior.min_base_damage + damage_bonus,
        max_dmg: warrior.max_base_damage + damage_bonus,
        cooldown,
        // first swing only after a full cooldown
        next_attack_time: cooldown,
        stun_end_time: 0.0,
        stun_immune_until: 0.0,
        stun_diminish: 1.0,
    }
}

impl CombatantState {
    pub fn from_loadout(loadout: &Loadout) -> Self {
        derive(&loadout.warrior, loadout.item.as_ref())
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn is_stunned(&self, now: f64) -> bool {
        now < self.stun_end_time
    }

    pub fn is_ready(&self, now: f64) -> bool {
        now >= self.next_attack_time
    }

    /// One second's worth of regeneration. Returns the amount healed, if any.
    pub fn regenerate(&mut self) -> Option<f64> {
        if !self.is_alive() || self.hp >= self.max_hp {
            return None;
        }
        let amount = self.hp_regen.min(self.max_hp - self.hp);
        if amount <= 0.0 {
            return None;
        }
        self.hp += amount;
        Some(amount)
    }

    /// Subtract damage. Returns true if this hit took the combatant down.
    pub fn take_damage(&mut self, amount: f64) -> bool {
        let was_alive = self.is_alive();
        self.hp -= amount;
        was_alive && !self.is_alive()
    }

    /// Opens a stun window of `duration` seconds followed by one second of
    /// immunity, and halves the next stun's length.
    pub fn apply_stun(&mut self, now: f64, duration: f64) {
        self.stun_end_time = now + duration;
        self.stun_immune_until = now + duration + 1.0;
        self.stun_diminish *= 0.5;
    }

    pub fn schedule_next_attack(&mut self, now: f64) {
        self.next_attack_time = now + self.cooldown;
    }

    pub fn attacks_per_second(&self) -> f64 {
        if self.cooldown > 0.0 { 1.0 / self.cooldown } else { f64::INFINITY }
    }

    pub fn sheet(&self, side: Side) -> StatSheet {
        StatSheet {
            side,
            name: self.name.clone(),
            kind: self.kind,
            max_hp: self.max_hp,
            hp_regen: self.hp_regen,
            defense: self.defense,
            min_dmg: self.min_dmg,
            max_dmg: self.max_dmg,
            cooldown: self.cooldown,
            attacks_per_second: self.attacks_per_second(),
        }
    }
}

/// Pre-battle snapshot of a combatant's derived stats, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSheet {
    pub side: Side,
    pub name: String,
    pub kind: WarriorType,
    pub max_hp: f64,
    pub hp_regen: f64,
    pub defense: f64,
    pub min_dmg: f64,
    pub max_dmg: f64,
    pub cooldown: f64,
    pub attacks_per_second: f64,
}
