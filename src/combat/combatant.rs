//! Polymorphic view over the two kinds of combat participant
//!
//! A [`Combatant`] borrows either a mobile unit or a settlement from the game
//! snapshot and answers the strength, health and classification queries the
//! resolver needs, with exhaustive matching over the two variants.

use crate::core::types::FactionId;
use crate::map::hex::HexCoord;
use crate::state::unit::{CombatArm, MovementDomain, Settlement, Unit, UnitCategory};
use crate::state::GameState;

/// One side of an engagement
#[derive(Debug, Clone, Copy)]
pub enum Combatant<'a> {
    Unit(&'a Unit),
    Settlement(&'a Settlement),
}

impl<'a> Combatant<'a> {
    pub fn faction_id(&self) -> FactionId {
        match self {
            Combatant::Unit(u) => u.faction,
            Combatant::Settlement(s) => s.faction,
        }
    }

    pub fn position(&self) -> HexCoord {
        match self {
            Combatant::Unit(u) => u.position,
            Combatant::Settlement(s) => s.position,
        }
    }

    /// Health in [0, 100]
    pub fn health(&self) -> i32 {
        match self {
            Combatant::Unit(u) => u.health,
            Combatant::Settlement(s) => s.health,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health() <= 0
    }

    /// Base strength when attacking. Ranged units attack with their ranged
    /// strength; settlements bombard with their combat strength.
    pub fn attack_strength(&self) -> i32 {
        match self {
            Combatant::Unit(u) => {
                if u.kind.arm == CombatArm::Ranged && u.kind.ranged_strength > 0 {
                    u.kind.ranged_strength
                } else {
                    u.kind.strength
                }
            }
            Combatant::Settlement(s) => s.strength,
        }
    }

    /// Base strength when defending
    pub fn defence_strength(&self) -> i32 {
        match self {
            Combatant::Unit(u) => u.kind.strength,
            Combatant::Settlement(s) => s.strength,
        }
    }

    /// Settlements bombard, so they count as ranged attackers
    pub fn is_ranged(&self) -> bool {
        match self {
            Combatant::Unit(u) => u.kind.arm == CombatArm::Ranged,
            Combatant::Settlement(_) => true,
        }
    }

    pub fn is_melee(&self) -> bool {
        match self {
            Combatant::Unit(u) => u.kind.arm == CombatArm::Melee,
            Combatant::Settlement(_) => false,
        }
    }

    pub fn is_civilian(&self) -> bool {
        match self {
            Combatant::Unit(u) => u.kind.arm == CombatArm::Civilian,
            Combatant::Settlement(_) => false,
        }
    }

    pub fn is_embarked(&self) -> bool {
        match self {
            Combatant::Unit(u) => u.embarked,
            Combatant::Settlement(_) => false,
        }
    }

    pub fn is_fortified(&self) -> bool {
        match self {
            Combatant::Unit(u) => u.fortified_turns.is_some(),
            Combatant::Settlement(_) => false,
        }
    }

    pub fn as_unit(&self) -> Option<&'a Unit> {
        match self {
            Combatant::Unit(u) => Some(u),
            Combatant::Settlement(_) => None,
        }
    }

    pub fn as_settlement(&self) -> Option<&'a Settlement> {
        match self {
            Combatant::Unit(_) => None,
            Combatant::Settlement(s) => Some(s),
        }
    }

    /// Category predicate dispatch over both combatant kinds
    pub fn matches_category(&self, category: &UnitCategory, state: &GameState) -> bool {
        match self {
            Combatant::Unit(u) => match category {
                UnitCategory::All => true,
                UnitCategory::Military => u.is_military(),
                UnitCategory::Civilian => u.kind.arm == CombatArm::Civilian,
                UnitCategory::Melee => u.kind.arm == CombatArm::Melee,
                UnitCategory::Ranged => u.kind.arm == CombatArm::Ranged,
                UnitCategory::Land => u.kind.domain == MovementDomain::Land,
                UnitCategory::Water => u.kind.domain == MovementDomain::Water,
                UnitCategory::Air => u.kind.domain == MovementDomain::Air,
                UnitCategory::Wounded => u.is_wounded(),
                UnitCategory::Embarked => u.embarked,
                UnitCategory::Barbarian => state.faction(u.faction).barbarian,
                UnitCategory::CityState => state.faction(u.faction).city_state,
                UnitCategory::City => false,
                UnitCategory::Named(name) => u.kind.name == *name,
                tag => u.kind.tags.contains(tag),
            },
            Combatant::Settlement(s) => match category {
                UnitCategory::All | UnitCategory::City => true,
                UnitCategory::Barbarian => state.faction(s.faction).barbarian,
                UnitCategory::CityState => state.faction(s.faction).city_state,
                _ => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{SettlementId, UnitId};
    use crate::state::unit::UnitKind;
    use crate::state::Faction;

    fn test_state() -> GameState {
        let mut state = GameState::new();
        state.factions.push(Faction::new(FactionId(0), "Rome"));
        state
    }

    #[test]
    fn test_ranged_unit_attacks_with_ranged_strength() {
        let archer = Unit::new(
            UnitId(1),
            FactionId(0),
            UnitKind::archer(),
            HexCoord::new(0, 0),
        );
        let combatant = Combatant::Unit(&archer);
        assert_eq!(combatant.attack_strength(), 7);
        assert_eq!(combatant.defence_strength(), 5);
        assert!(combatant.is_ranged());
    }

    #[test]
    fn test_settlement_is_a_ranged_attacker() {
        let city = Settlement::new(SettlementId(1), "Roma", FactionId(0), HexCoord::new(0, 0), 12);
        let combatant = Combatant::Settlement(&city);
        assert!(combatant.is_ranged());
        assert!(!combatant.is_melee());
        assert!(!combatant.is_civilian());
        assert_eq!(combatant.attack_strength(), 12);
    }

    #[test]
    fn test_category_matching_for_units() {
        let state = test_state();
        let knight = Unit::new(
            UnitId(1),
            FactionId(0),
            UnitKind::knight(),
            HexCoord::new(0, 0),
        );
        let combatant = Combatant::Unit(&knight);

        assert!(combatant.matches_category(&UnitCategory::All, &state));
        assert!(combatant.matches_category(&UnitCategory::Mounted, &state));
        assert!(combatant.matches_category(&UnitCategory::Melee, &state));
        assert!(combatant.matches_category(&UnitCategory::Named("Knight".into()), &state));
        assert!(!combatant.matches_category(&UnitCategory::Siege, &state));
        assert!(!combatant.matches_category(&UnitCategory::City, &state));
        assert!(!combatant.matches_category(&UnitCategory::Wounded, &state));
    }

    #[test]
    fn test_category_matching_for_settlements() {
        let state = test_state();
        let city = Settlement::new(SettlementId(1), "Roma", FactionId(0), HexCoord::new(0, 0), 12);
        let combatant = Combatant::Settlement(&city);

        assert!(combatant.matches_category(&UnitCategory::All, &state));
        assert!(combatant.matches_category(&UnitCategory::City, &state));
        assert!(!combatant.matches_category(&UnitCategory::Mounted, &state));
    }
}
