use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::battle::{BattleEngine, Outcome};
use crate::log::BattleReport;
use crate::roster::{Roster, TeamSlot};
use crate::rules::BattleRules;
use crate::Dice;

/// Everything needed to stage a battle from stored records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleConfig {
    /// Warriors CSV; the built-in roster when absent.
    #[serde(default)]
    pub warriors_path: Option<String>,
    /// Items CSV; the built-in items when absent.
    #[serde(default)]
    pub items_path: Option<String>,
    pub team1: Vec<TeamSlot>,
    pub team2: Vec<TeamSlot>,
    /// Fixed seed for a reproducible battle; entropy otherwise.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rules: BattleRules,
}

impl BattleConfig {
    pub fn duel(warrior1: &str, warrior2: &str) -> Self {
        Self {
            team1: vec![TeamSlot::new(warrior1, None)],
            team2: vec![TeamSlot::new(warrior2, None)],
            ..Self::default()
        }
    }

    /// Read a config file; `.json` is parsed as JSON, anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read battle config: {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let cfg = if is_json {
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse battle config JSON: {}", path.display()))?
        } else {
            serde_yaml::from_str(&text)
                .with_context(|| format!("failed to parse battle config YAML: {}", path.display()))?
        };
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleStats {
    pub samples: u32,
    pub team1_wins: u32,
    pub team2_wins: u32,
    pub draws: u32,
    pub mean_elapsed: f64,
}

impl BattleStats {
    pub fn win_rate(&self, outcome: Outcome) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        let n = match outcome {
            Outcome::Team1Victory => self.team1_wins,
            Outcome::Team2Victory => self.team2_wins,
            Outcome::Draw => self.draws,
        };
        n as f64 / self.samples as f64
    }
}

/// Load the roster a config points at, falling back to the built-in one for
/// whichever table is not given.
pub fn load_roster(cfg: &BattleConfig) -> Result<Roster> {
    let warriors = match &cfg.warriors_path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read warriors CSV: {}", path))?,
        None => crate::content::builtin_warriors().to_string(),
    };
    let items = match &cfg.items_path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read items CSV: {}", path))?,
        None => crate::content::builtin_items().to_string(),
    };
    let roster = Roster::from_csv_str(&warriors, &items).context("failed to load roster")?;
    Ok(roster)
}

pub fn simulate_battle(cfg: BattleConfig) -> Result<BattleReport> {
    let roster = load_roster(&cfg)?;
    simulate_with_roster(&roster, &cfg)
}

pub fn simulate_with_roster(roster: &Roster, cfg: &BattleConfig) -> Result<BattleReport> {
    let (team1, team2) = roster.resolve_teams(&cfg.team1, &cfg.team2)?;
    let dice = match cfg.seed {
        Some(seed) => Dice::from_seed(seed),
        None => Dice::from_entropy(),
    };
    let report = BattleEngine::new(cfg.rules, dice).run(&team1, &team2)?;
    Ok(report)
}

/// Run `samples` battles. With a seed, battle `i` uses `seed + i`.
pub fn simulate_battle_many(cfg: BattleConfig, samples: u32) -> Result<BattleStats> {
    let roster = load_roster(&cfg)?;
    simulate_many_with_roster(&roster, &cfg, samples)
}

/// Like [`simulate_battle_many`], against a roster the caller already loaded.
pub fn simulate_many_with_roster(
    roster: &Roster,
    cfg: &BattleConfig,
    samples: u32,
) -> Result<BattleStats> {
    if samples == 0 {
        bail!("samples must be at least 1");
    }
    let mut stats = BattleStats {
        samples,
        team1_wins: 0,
        team2_wins: 0,
        draws: 0,
        mean_elapsed: 0.0,
    };
    let mut total_elapsed = 0.0;
    for i in 0..samples {
        let run = BattleConfig {
            seed: cfg.seed.map(|s| s.wrapping_add(i as u64)),
            ..cfg.clone()
        };
        let report = simulate_with_roster(roster, &run)?;
        match report.outcome {
            Outcome::Team1Victory => stats.team1_wins += 1,
            Outcome::Team2Victory => stats.team2_wins += 1,
            Outcome::Draw => stats.draws += 1,
        }
        total_elapsed += report.elapsed;
    }
    stats.mean_elapsed = total_elapsed / samples as f64;
    info!(
        samples,
        team1 = stats.team1_wins,
        team2 = stats.team2_wins,
        draws = stats.draws,
        "batch finished"
    );
    Ok(stats)
}
