use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::battle::{Outcome, Side};
use crate::stats::StatSheet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BattleEvent {
    Regen {
        actor: String,
        amount: f64,
    },
    Miss {
        attacker: String,
        target: String,
    },
    BonusDamage {
        attacker: String,
        target: String,
        multiplier: f64,
    },
    Stun {
        attacker: String,
        target: String,
        duration: f64,
    },
    Damage {
        attacker: String,
        target: String,
        rolled: f64,
        dealt: f64,
        target_hp: f64,
    },
    Defeat {
        actor: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Simulated seconds since the battle began.
    pub time: f64,
    #[serde(flatten)]
    pub event: BattleEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantResult {
    pub side: Side,
    pub name: String,
    pub max_hp: f64,
    pub final_hp: f64,
    pub survived: bool,
    pub damage_dealt: f64,
    pub damage_taken: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub outcome: Outcome,
    /// Simulated seconds at which the battle ended.
    pub elapsed: f64,
    pub ticks: u32,
    /// Derived stats at the start of the battle, team 1 first.
    pub combatants: Vec<StatSheet>,
    pub events: Vec<TimedEvent>,
    pub results: Vec<CombatantResult>,
}

impl BattleReport {
    pub fn count(&self, pred: impl Fn(&BattleEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.event)).count()
    }

    pub fn result_for(&self, name: &str) -> Option<&CombatantResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn render(&self) -> String {
        let mut out = String::from("=== Battle Report ===\n");
        for side in [Side::Team1, Side::Team2] {
            let _ = writeln!(out, "[{}]", side.label().to_uppercase());
            for sheet in self.combatants.iter().filter(|s| s.side == side) {
                let _ = writeln!(out, "  {}", format_stat_sheet(sheet));
            }
        }
        out.push_str("[BEGIN]\n");
        for entry in &self.events {
            out.push_str(&format_event(entry));
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "[END] {} at {:.1}s",
            format_outcome(self.outcome),
            self.elapsed
        );
        out
    }
}

pub fn format_stat_sheet(sheet: &StatSheet) -> String {
    format!(
        "{} ({}): HP {:.1} | regen {:.2}/s | defense {:.1} | damage {:.1}-{:.1} | {:.2} attacks/s",
        sheet.name,
        sheet.kind,
        sheet.max_hp,
        sheet.hp_regen,
        sheet.defense,
        sheet.min_dmg,
        sheet.max_dmg,
        sheet.attacks_per_second
    )
}

pub fn format_event(entry: &TimedEvent) -> String {
    let t = entry.time;
    match &entry.event {
        BattleEvent::Regen { actor, amount } => {
            format!("[t={:.1}s][REGEN][{}] +{:.1} HP", t, actor, amount)
        }
        BattleEvent::Miss { attacker, target } => {
            format!("[t={:.1}s][MISS][{}] attack misses {}", t, attacker, target)
        }
        BattleEvent::BonusDamage { attacker, target, multiplier } => format!(
            "[t={:.1}s][BONUS][{}] finds a weak spot on {} (x{:.1})",
            t, attacker, target, multiplier
        ),
        BattleEvent::Stun { attacker, target, duration } => format!(
            "[t={:.1}s][STUN][{}] stuns {} for {:.2}s",
            t, attacker, target, duration
        ),
        BattleEvent::Damage { attacker, target, rolled, dealt, target_hp } => format!(
            "[t={:.1}s][DMG][{}] deals {:.1} to {} (reduced from {:.1}) → {:.1} HP",
            t, attacker, dealt, target, rolled, target_hp
        ),
        BattleEvent::Defeat { actor } => {
            format!("[t={:.1}s][DEFEAT][{}] has been defeated", t, actor)
        }
    }
}

pub fn format_outcome(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Team1Victory => "Team 1 is victorious",
        Outcome::Team2Victory => "Team 2 is victorious",
        Outcome::Draw => "Draw",
    }
}
