pub const DEFENSE_FACTOR: f64 = 0.06;
pub const MIN_DAMAGE: f64 = 1.0;

/// Fraction of incoming damage absorbed by `defense`. Approaches but never
/// reaches 1.
pub fn reduction(defense: f64) -> f64 {
    let k = DEFENSE_FACTOR * defense;
    k / (1.0 + k)
}

/// Final damage of a connecting hit. Never below [`MIN_DAMAGE`].
pub fn resolve(rolled: f64, defense: f64, multiplier: f64) -> f64 {
    (rolled * (1.0 - reduction(defense)) * multiplier).max(MIN_DAMAGE)
}
