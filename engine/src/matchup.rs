use crate::stats::CombatantState;
use crate::warrior::WarriorType;
use crate::Dice;

pub const WEAK_SPOT_MULTIPLIER: f64 = 1.5;

/// What the attacker/defender type pairing did to this attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchupOutcome {
    pub miss: bool,
    pub damage_multiplier: f64,
    pub stun_applied: bool,
    /// Seconds; only meaningful when `stun_applied`.
    pub stun_duration: f64,
}

impl MatchupOutcome {
    pub const NEUTRAL: MatchupOutcome = MatchupOutcome {
        miss: false,
        damage_multiplier: 1.0,
        stun_applied: false,
        stun_duration: 0.0,
    };

    pub fn is_bonus(&self) -> bool {
        self.damage_multiplier > 1.0
    }
}

/// Which special effect, if any, a pairing can roll for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advantage {
    /// Smart into Dexterous: the attack may whiff entirely.
    Miss,
    /// Smart into Tough: the attack may find a weak spot.
    WeakSpot,
    /// Tough into Dexterous: the defender may be stunned.
    Stun,
    None,
}

pub fn advantage(attacker: WarriorType, defender: WarriorType) -> Advantage {
    use WarriorType::*;
    match (attacker, defender) {
        (Smart, Dexterous) => Advantage::Miss,
        (Smart, Tough) => Advantage::WeakSpot,
        (Tough, Dexterous) => Advantage::Stun,
        (Tough, Tough) | (Tough, Smart) => Advantage::None,
        (Dexterous, _) | (Smart, Smart) => Advantage::None,
    }
}

/// Roll the type advantage for one attack.
///
/// Draws from `dice` only when the pairing has an advantage. A stun is
/// reported but not applied; the caller opens the stun window on the
/// defender with [`CombatantState::apply_stun`].
pub fn resolve(
    attacker: WarriorType,
    defender: &CombatantState,
    now: f64,
    chance: f64,
    dice: &mut Dice,
) -> MatchupOutcome {
    match advantage(attacker, defender.kind) {
        Advantage::Miss if dice.chance(chance) => MatchupOutcome {
            miss: true,
            ..MatchupOutcome::NEUTRAL
        },
        Advantage::WeakSpot if dice.chance(chance) => MatchupOutcome {
            damage_multiplier: WEAK_SPOT_MULTIPLIER,
            ..MatchupOutcome::NEUTRAL
        },
        Advantage::Stun => {
            // the roll is consumed even while the defender is immune
            let rolled = dice.chance(chance);
            if rolled && now >= defender.stun_immune_until {
                MatchupOutcome {
                    stun_applied: true,
                    stun_duration: defender.stun_diminish,
                    ..MatchupOutcome::NEUTRAL
                }
            } else {
                MatchupOutcome::NEUTRAL
            }
        }
        _ => MatchupOutcome::NEUTRAL,
    }
}
