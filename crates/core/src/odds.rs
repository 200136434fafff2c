use crate::{GameConfig, HazardCurve, JokerKind, Loot, RandomSource};

/// Hazard chance for the upcoming turn. Risk ramps with the streak but is
/// capped, and an active jammer grants temporary relief (floored at 0).
pub fn hazard_probability(curve: &HazardCurve, streak: u32, jammer_turns: u32) -> f64 {
    let mut p = (curve.base + curve.per_streak * streak as f64).clamp(curve.base, curve.cap);
    if jammer_turns > 0 {
        p = (p - curve.jammer_relief).max(0.0);
    }
    p
}

pub fn draw_loot(config: &GameConfig, rng: &mut dyn RandomSource) -> Loot {
    if rng.chance(config.joker_chance) {
        let idx = rng.pick(JokerKind::ALL.len() as u64) as usize;
        return Loot::Joker(JokerKind::ALL[idx]);
    }
    Loot::Number(draw_number(config, rng))
}

/// Fresh uniform number draw; also the scrambler's reroll.
pub fn draw_number(config: &GameConfig, rng: &mut dyn RandomSource) -> u8 {
    1 + rng.pick(config.number_values as u64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSource;

    fn curve() -> HazardCurve {
        HazardCurve::default()
    }

    #[test]
    fn base_chance_at_zero_streak() {
        assert!((hazard_probability(&curve(), 0, 0) - 0.20).abs() < 1e-9);
    }

    #[test]
    fn streak_ramp_is_capped() {
        assert!((hazard_probability(&curve(), 3, 0) - 0.38).abs() < 1e-9);
        assert!((hazard_probability(&curve(), 6, 0) - 0.56).abs() < 1e-9);
        assert!((hazard_probability(&curve(), 40, 0) - 0.56).abs() < 1e-9);
    }

    #[test]
    fn jammer_relief_applies_after_clamp() {
        assert!((hazard_probability(&curve(), 0, 1) - 0.05).abs() < 1e-9);
        assert!((hazard_probability(&curve(), 6, 2) - 0.41).abs() < 1e-9);
    }

    #[test]
    fn jammer_relief_floors_at_zero() {
        let steep = HazardCurve {
            jammer_relief: 0.9,
            ..curve()
        };
        assert_eq!(hazard_probability(&steep, 0, 1), 0.0);
    }

    #[test]
    fn draw_number_spans_full_range() {
        let config = GameConfig::default();
        let mut rng = ScriptedSource::new([0.0, 0.999]);
        assert_eq!(draw_number(&config, &mut rng), 1);
        assert_eq!(draw_number(&config, &mut rng), 7);
    }

    #[test]
    fn joker_roll_precedes_number_draw() {
        let config = GameConfig::default();
        // First draw decides joker-vs-number, second picks within the family.
        let mut rng = ScriptedSource::new([0.10, 0.5]);
        assert_eq!(
            draw_loot(&config, &mut rng),
            Loot::Joker(JokerKind::Scrambler)
        );
        let mut rng = ScriptedSource::new([0.50, 2.5 / 7.0]);
        assert_eq!(draw_loot(&config, &mut rng), Loot::Number(3));
    }
}
