use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::clock::CombatClock;
use crate::error::ArenaError;
use crate::log::{BattleEvent, BattleReport, CombatantResult, TimedEvent};
use crate::rules::BattleRules;
use crate::stats::CombatantState;
use crate::warrior::Loadout;
use crate::{damage, matchup, Dice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Team1,
    Team2,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Team1 => "Team 1",
            Side::Team2 => "Team 2",
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Team1 => 0,
            Side::Team2 => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Team1Victory,
    Team2Victory,
    Draw,
}

impl Outcome {
    /// Terminal outcome given which sides still have someone standing, or
    /// `None` while both do. A double knockout is a draw.
    pub fn from_survivors(team1_alive: bool, team2_alive: bool) -> Option<Outcome> {
        match (team1_alive, team2_alive) {
            (true, true) => None,
            (true, false) => Some(Outcome::Team1Victory),
            (false, true) => Some(Outcome::Team2Victory),
            (false, false) => Some(Outcome::Draw),
        }
    }
}

/// Check that the two teams can fight: equal, non-empty, 1v1 or 3v3, and
/// every loadout able to swing.
pub fn validate_teams(team1: &[Loadout], team2: &[Loadout]) -> Result<(), ArenaError> {
    if team1.is_empty() || team2.is_empty() || team1.len() != team2.len() {
        return Err(ArenaError::TeamSizeMismatch {
            team1: team1.len(),
            team2: team2.len(),
        });
    }
    match team1.len() {
        1 | 3 => {}
        n => return Err(ArenaError::UnsupportedTeamSize(n)),
    }
    team1.iter().chain(team2).try_for_each(Loadout::validate)
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    dealt: f64,
    taken: f64,
}

/// Runs one battle to completion. Each run owns its combatant states.
pub struct BattleEngine {
    rules: BattleRules,
    dice: Dice,
}

impl BattleEngine {
    pub fn new(rules: BattleRules, dice: Dice) -> Self {
        Self { rules, dice }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(BattleRules::default(), Dice::from_seed(seed))
    }

    pub fn run(&mut self, team1: &[Loadout], team2: &[Loadout]) -> Result<BattleReport, ArenaError> {
        validate_teams(team1, team2)?;

        let _span = info_span!("battle", team_size = team1.len()).entered();

        let mut teams: [Vec<CombatantState>; 2] = [
            team1.iter().map(CombatantState::from_loadout).collect(),
            team2.iter().map(CombatantState::from_loadout).collect(),
        ];
        let mut tallies: [Vec<Tally>; 2] = [
            vec![Tally::default(); team1.len()],
            vec![Tally::default(); team2.len()],
        ];
        let combatants = [Side::Team1, Side::Team2]
            .into_iter()
            .flat_map(|side| teams[side.index()].iter().map(move |c| c.sheet(side)))
            .collect();

        let mut events = Vec::new();
        let mut clock = CombatClock::new(&self.rules);

        let outcome = loop {
            if clock.expired() {
                break Outcome::Draw;
            }
            let now = clock.now();

            if clock.crossed_second() {
                for combatant in teams.iter_mut().flatten() {
                    if let Some(amount) = combatant.regenerate() {
                        events.push(TimedEvent {
                            time: now,
                            event: BattleEvent::Regen {
                                actor: combatant.name.clone(),
                                amount,
                            },
                        });
                    }
                }
            }

            for side in [Side::Team1, Side::Team2] {
                for slot in 0..teams[side.index()].len() {
                    self.attack(&mut teams, &mut tallies, side, slot, now, &mut events);
                }
            }

            let team1_alive = teams[0].iter().any(CombatantState::is_alive);
            let team2_alive = teams[1].iter().any(CombatantState::is_alive);
            if let Some(outcome) = Outcome::from_survivors(team1_alive, team2_alive) {
                break outcome;
            }
            clock.advance();
        };

        let elapsed = clock.now();
        info!(?outcome, elapsed, events = events.len(), "battle finished");

        let results = [Side::Team1, Side::Team2]
            .into_iter()
            .flat_map(|side| {
                teams[side.index()]
                    .iter()
                    .zip(tallies[side.index()].iter())
                    .map(move |(c, t)| CombatantResult {
                        side,
                        name: c.name.clone(),
                        max_hp: c.max_hp,
                        final_hp: c.hp,
                        survived: c.is_alive(),
                        damage_dealt: t.dealt,
                        damage_taken: t.taken,
                    })
            })
            .collect();

        Ok(BattleReport {
            outcome,
            elapsed,
            ticks: clock.tick(),
            combatants,
            events,
            results,
        })
    }

    /// Resolve the turn of one combatant on the current tick, if it is able
    /// to act.
    fn attack(
        &mut self,
        teams: &mut [Vec<CombatantState>; 2],
        tallies: &mut [Vec<Tally>; 2],
        side: Side,
        slot: usize,
        now: f64,
        events: &mut Vec<TimedEvent>,
    ) {
        let [team1, team2] = teams;
        let (own, foes) = match side {
            Side::Team1 => (team1, team2),
            Side::Team2 => (team2, team1),
        };
        let attacker = &mut own[slot];
        if !attacker.is_alive() || attacker.is_stunned(now) || !attacker.is_ready(now) {
            return;
        }

        let living: Vec<usize> = foes
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| i)
            .collect();
        if living.is_empty() {
            return;
        }
        let target_slot = living[self.dice.pick(living.len())];
        let target = &mut foes[target_slot];

        let outcome =
            matchup::resolve(attacker.kind, target, now, self.rules.effect_chance, &mut self.dice);

        let mut push = |event: BattleEvent| events.push(TimedEvent { time: now, event });

        if outcome.stun_applied {
            target.apply_stun(now, outcome.stun_duration);
            debug!(attacker = %attacker.name, target = %target.name, duration = outcome.stun_duration, "stun");
            push(BattleEvent::Stun {
                attacker: attacker.name.clone(),
                target: target.name.clone(),
                duration: outcome.stun_duration,
            });
        }

        if outcome.miss {
            push(BattleEvent::Miss {
                attacker: attacker.name.clone(),
                target: target.name.clone(),
            });
        } else {
            if outcome.is_bonus() {
                push(BattleEvent::BonusDamage {
                    attacker: attacker.name.clone(),
                    target: target.name.clone(),
                    multiplier: outcome.damage_multiplier,
                });
            }
            let rolled = self.dice.between(attacker.min_dmg, attacker.max_dmg);
            let dealt = damage::resolve(rolled, target.defense, outcome.damage_multiplier);
            let defeated = target.take_damage(dealt);

            let foe_side = match side {
                Side::Team1 => Side::Team2,
                Side::Team2 => Side::Team1,
            };
            tallies[side.index()][slot].dealt += dealt;
            tallies[foe_side.index()][target_slot].taken += dealt;

            push(BattleEvent::Damage {
                attacker: attacker.name.clone(),
                target: target.name.clone(),
                rolled,
                dealt,
                target_hp: target.hp,
            });
            if defeated {
                debug!(actor = %target.name, time = now, "defeated");
                push(BattleEvent::Defeat {
                    actor: target.name.clone(),
                });
            }
        }

        attacker.schedule_next_attack(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_knockout_is_a_draw() {
        assert_eq!(Outcome::from_survivors(false, false), Some(Outcome::Draw));
        assert_eq!(Outcome::from_survivors(true, false), Some(Outcome::Team1Victory));
        assert_eq!(Outcome::from_survivors(false, true), Some(Outcome::Team2Victory));
        assert_eq!(Outcome::from_survivors(true, true), None);
    }
}
