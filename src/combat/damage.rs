//! Damage resolution
//!
//! Folds a [`ModifierSet`] into an effective strength, pushes the strength
//! ratio through the damage curve and scales by the dealer's remaining
//! health. Randomness comes in through a caller-supplied RNG so replays and
//! AI lookahead stay deterministic.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combat::combatant::Combatant;
use crate::combat::modifiers::{attack_modifiers, defence_modifiers, to_percent, ModifierSet};
use crate::map::hex::HexCoord;
use crate::rules::effect::Effect;
use crate::state::unit::MovementDomain;
use crate::state::GameState;

/// One attack declaration: who strikes whom, and from where
#[derive(Debug, Clone, Copy)]
pub struct Engagement<'a> {
    pub attacker: Combatant<'a>,
    pub defender: Combatant<'a>,
    /// Tile the attacker strikes from when it differs from its position
    /// (a move-and-attack order)
    pub tile_attacked_from: Option<HexCoord>,
}

impl<'a> Engagement<'a> {
    pub fn new(attacker: Combatant<'a>, defender: Combatant<'a>) -> Self {
        Self {
            attacker,
            defender,
            tile_attacked_from: None,
        }
    }
}

/// Damage dealt to each side by one engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementDamage {
    pub to_attacker: i32,
    pub to_defender: i32,
}

/// Fold a modifier set into one multiplicative factor
pub fn combine(modifiers: &ModifierSet) -> f32 {
    let mut factor = 1.0;
    for (_, amount) in modifiers.iter() {
        factor *= to_percent(*amount);
    }
    factor
}

/// Damage scaling from the dealer's remaining health. Each 3 points of
/// missing health shaves 1% off outgoing damage. Settlements always deal
/// full damage.
pub fn health_damage_ratio(state: &GameState, combatant: &Combatant<'_>) -> f32 {
    match combatant {
        Combatant::Settlement(_) => 1.0,
        Combatant::Unit(unit) => {
            let full_strength = state
                .faction(unit.faction)
                .effects
                .contains(&Effect::FullStrengthWhenDamaged)
                && unit.kind.domain != MovementDomain::Air;
            if full_strength {
                1.0
            } else {
                1.0 - (100 - unit.health) as f32 / 300.0
            }
        }
    }
}

/// Effective attacking strength, all attack modifiers applied
pub fn attacking_strength(
    state: &GameState,
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
) -> f32 {
    attacker.attack_strength() as f32 * combine(&attack_modifiers(state, attacker, defender))
}

/// Effective defending strength, all defence modifiers applied
pub fn defending_strength(
    state: &GameState,
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
) -> f32 {
    defender.defence_strength() as f32 * combine(&defence_modifiers(state, attacker, defender))
}

/// Map the attacker-to-defender strength ratio onto a damage factor. The
/// curve is evaluated from the stronger side, then inverted for the side
/// receiving the weaker party's blows.
fn ratio_curve(attacker_to_defender_ratio: f32, to_attacker: bool) -> f32 {
    let stronger = if attacker_to_defender_ratio < 1.0 {
        attacker_to_defender_ratio.recip()
    } else {
        attacker_to_defender_ratio
    };
    let mut curve = (((stronger + 3.0) / 4.0).powi(4) + 1.0) / 2.0;
    if (to_attacker && attacker_to_defender_ratio > 1.0)
        || (!to_attacker && attacker_to_defender_ratio < 1.0)
    {
        curve = curve.recip();
    }
    curve
}

/// Base damage roll, uniform over [24, 36)
fn damage_roll(rng: &mut impl Rng) -> f32 {
    24.0 + 12.0 * rng.gen::<f32>()
}

fn strength_ratio(state: &GameState, attacker: &Combatant<'_>, defender: &Combatant<'_>) -> f32 {
    let defence = defending_strength(state, attacker, defender);
    assert!(defence > 0.0, "defending strength must be positive");
    attacking_strength(state, attacker, defender) / defence
}

/// Damage the defender takes from this engagement
pub fn damage_to_defender(
    state: &GameState,
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
    rng: &mut impl Rng,
) -> i32 {
    let ratio = strength_ratio(state, attacker, defender);
    (ratio_curve(ratio, false) * damage_roll(rng) * health_damage_ratio(state, attacker)).round()
        as i32
}

/// Retaliation damage the attacker takes. Ranged attacks (including
/// settlement bombardment) and strikes on civilians draw no blood back.
pub fn damage_to_attacker(
    state: &GameState,
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
    rng: &mut impl Rng,
) -> i32 {
    if attacker.is_ranged() {
        return 0;
    }
    if defender.is_civilian() {
        return 0;
    }
    let ratio = strength_ratio(state, attacker, defender);
    (ratio_curve(ratio, true) * damage_roll(rng) * health_damage_ratio(state, defender)).round()
        as i32
}

/// Resolve one engagement: damage to the defender is rolled first, then the
/// retaliation.
pub fn resolve(
    state: &GameState,
    engagement: &Engagement<'_>,
    rng: &mut impl Rng,
) -> EngagementDamage {
    let to_defender = damage_to_defender(state, &engagement.attacker, &engagement.defender, rng);
    let to_attacker = damage_to_attacker(state, &engagement.attacker, &engagement.defender, rng);
    tracing::debug!(to_defender, to_attacker, "engagement resolved");
    EngagementDamage {
        to_attacker,
        to_defender,
    }
}

/// Resolve with a fresh RNG from a seed. Same snapshot and seed always give
/// the same outcome.
pub fn resolve_seeded(state: &GameState, engagement: &Engagement<'_>, seed: u64) -> EngagementDamage {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    resolve(state, engagement, &mut rng)
}
