use serde::{Deserialize, Serialize};

pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 300;
pub const DEFAULT_EFFECT_CHANCE: f64 = 0.2;

/// Tunables for one battle. Missing fields fall back to the standard arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BattleRules {
    /// Clock resolution; 10 gives 0.1 s ticks.
    pub ticks_per_second: u32,
    /// Simulated seconds before the battle is called a draw.
    pub time_limit_secs: u32,
    /// Probability that a type advantage (miss, weak spot, stun) triggers.
    pub effect_chance: f64,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            effect_chance: DEFAULT_EFFECT_CHANCE,
        }
    }
}

impl BattleRules {
    /// Standard rules with type advantages switched off.
    pub fn without_effects() -> Self {
        Self { effect_chance: 0.0, ..Self::default() }
    }

    /// Standard rules with every type advantage guaranteed to trigger.
    pub fn with_forced_effects() -> Self {
        Self { effect_chance: 1.0, ..Self::default() }
    }

    pub fn limit_ticks(&self) -> u32 {
        self.time_limit_secs.saturating_mul(self.ticks_per_second.max(1))
    }
}
