use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod battle;
pub mod clock;
pub mod content;
pub mod damage;
pub mod error;
pub mod log;
pub mod matchup;
pub mod roster;
pub mod rules;
pub mod stats;
pub mod warrior;

pub use battle::{BattleEngine, Outcome, Side};
pub use error::ArenaError;
pub use log::{BattleEvent, BattleReport, CombatantResult, TimedEvent};
pub use roster::{Roster, TeamSlot};
pub use rules::BattleRules;
pub use stats::{CombatantState, StatSheet};
pub use warrior::{ItemDefinition, Loadout, StatGrowth, WarriorDefinition, WarriorType};

enum Source {
    Rng(ChaCha8Rng),
    Scripted { draws: Vec<f64>, cursor: usize },
}

/// Source of every random draw a battle makes.
pub struct Dice {
    source: Source,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Rng(ChaCha8Rng::seed_from_u64(seed)) }
    }

    /// Non-reproducible generator; what a normal battle uses.
    pub fn from_entropy() -> Self {
        Self { source: Source::Rng(ChaCha8Rng::from_entropy()) }
    }

    /// Replays `draws` in order, wrapping around when exhausted.
    /// Values are clamped into [0, 1).
    pub fn from_scripted(draws: Vec<f64>) -> Self {
        let draws = draws
            .into_iter()
            .map(|d| d.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { source: Source::Scripted { draws, cursor: 0 } }
    }

    /// Uniform draw in [0, 1).
    pub fn unit(&mut self) -> f64 {
        match &mut self.source {
            Source::Rng(rng) => rng.gen_range(0.0..1.0),
            Source::Scripted { draws, cursor } => {
                if draws.is_empty() {
                    return 0.0;
                }
                let value = draws[*cursor % draws.len()];
                *cursor += 1;
                value
            }
        }
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    /// Uniform value between `lo` and `hi`.
    pub fn between(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.unit() * (hi - lo)
    }

    /// Uniform index into a slice of `len` elements. `len` must be non-zero.
    pub fn pick(&mut self, len: usize) -> usize {
        let idx = (self.unit() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}
