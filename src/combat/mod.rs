//! Combat resolution
//!
//! Collects every modifier bearing on an engagement, folds them into
//! effective strengths and rolls the damage dealt to each side.

pub mod combatant;
pub mod damage;
pub mod modifiers;

pub use combatant::Combatant;
pub use damage::{
    attacking_strength, combine, damage_to_attacker, damage_to_defender, defending_strength,
    health_damage_ratio, resolve, resolve_seeded, Engagement, EngagementDamage,
};
pub use modifiers::{attack_modifiers, defence_modifiers, ModifierLabel, ModifierSet};
