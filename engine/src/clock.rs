use crate::rules::BattleRules;

/// Simulated time, counted in whole ticks so that second boundaries are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatClock {
    tick: u32,
    ticks_per_second: u32,
    limit_ticks: u32,
}

impl CombatClock {
    pub fn new(rules: &BattleRules) -> Self {
        Self {
            tick: 0,
            ticks_per_second: rules.ticks_per_second.max(1),
            limit_ticks: rules.limit_ticks(),
        }
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Current simulated time in seconds.
    pub fn now(&self) -> f64 {
        self.tick as f64 / self.ticks_per_second as f64
    }

    /// True on ticks where a new whole second has just elapsed.
    pub fn crossed_second(&self) -> bool {
        self.tick > 0 && self.tick % self.ticks_per_second == 0
    }

    pub fn expired(&self) -> bool {
        self.tick >= self.limit_ticks
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_are_exact() {
        let mut clock = CombatClock::new(&BattleRules::default());
        let mut crossings = Vec::new();
        while clock.now() < 3.05 {
            if clock.crossed_second() {
                crossings.push(clock.now());
            }
            clock.advance();
        }
        assert_eq!(crossings, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn expires_at_time_limit() {
        let rules = BattleRules { time_limit_secs: 1, ..BattleRules::default() };
        let mut clock = CombatClock::new(&rules);
        for _ in 0..10 {
            assert!(!clock.expired());
            clock.advance();
        }
        assert!(clock.expired());
        assert_eq!(clock.now(), 1.0);
    }
}
