//! # Drop Decisions
//!
//! `chance = clamp(base + level * bonus_per_level, 0.0, 1.0)`
//!
//! A uniform draw in `[0, 1)` below `chance` drops the head. The draw comes
//! from any [`Rng`], or is injected directly through [`decide_with_draw`].

use rand::Rng;

use crate::resolver::DropSettings;

/// Outcome of one roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropDecision {
    /// Clamped chance used for the roll.
    pub chance: f64,
    /// Uniform draw in `[0, 1)`.
    pub draw: f64,
    /// Whether the head drops.
    pub dropped: bool,
}

/// Final chance for a bonus level, clamped to `[0, 1]`.
///
/// Non-finite inputs collapse to `0.0`.
#[must_use]
pub fn final_chance(settings: &DropSettings, bonus_level: u32) -> f64 {
    let raw = settings.base_chance + f64::from(bonus_level) * settings.bonus_per_level;
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 1.0)
}

/// Decides a drop from a pre-drawn value.
#[must_use]
pub fn decide_with_draw(settings: &DropSettings, bonus_level: u32, draw: f64) -> DropDecision {
    let chance = final_chance(settings, bonus_level);
    DropDecision {
        chance,
        draw,
        dropped: draw < chance,
    }
}

/// Decides a drop, drawing from `rng`.
pub fn decide<R: Rng + ?Sized>(settings: &DropSettings, bonus_level: u32, rng: &mut R) -> DropDecision {
    let draw: f64 = rng.gen();
    decide_with_draw(settings, bonus_level, draw)
}

/// Fraction of `trials` rolls that drop.
pub fn simulate_drop_rate<R: Rng + ?Sized>(
    settings: &DropSettings,
    bonus_level: u32,
    trials: u32,
    rng: &mut R,
) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    let drops = (0..trials)
        .filter(|_| decide(settings, bonus_level, rng).dropped)
        .count();
    drops as f64 / f64::from(trials)
}

/// Running counters for kills handled by a system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropStats {
    /// Kills that reached the engine.
    pub kills: u64,
    /// Kills with no configured settings.
    pub unconfigured: u64,
    /// Rolls made.
    pub rolls: u64,
    /// Rolls that dropped a head.
    pub drops: u64,
}

impl DropStats {
    /// Observed drop rate over all rolls.
    #[must_use]
    pub fn drop_rate(&self) -> f64 {
        if self.rolls == 0 {
            0.0
        } else {
            self.drops as f64 / self.rolls as f64
        }
    }

    /// Records one roll.
    pub fn record(&mut self, decision: &DropDecision) {
        self.rolls += 1;
        if decision.dropped {
            self.drops += 1;
        }
    }
}
