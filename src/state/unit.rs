//! Mobile units and settlements
//!
//! Units carry their kind's base strengths plus per-unit combat effects
//! (promotions). Settlements are stationary combatants with their own
//! strength and building effects.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{FactionId, SettlementId, UnitId};
use crate::map::hex::HexCoord;
use crate::rules::effect::Effect;

/// How a unit moves across the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MovementDomain {
    #[default]
    Land,
    Water,
    Air,
}

/// How a unit fights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CombatArm {
    #[default]
    Melee,
    Ranged,
    Civilian,
}

/// Predicate over combatants, used by conditional combat effects
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitCategory {
    All,
    Military,
    Civilian,
    Melee,
    Ranged,
    Land,
    Water,
    Air,
    Mounted,
    Armored,
    Siege,
    Wounded,
    Embarked,
    Barbarian,
    CityState,
    City,
    /// Matches a specific unit kind by name
    Named(String),
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitCategory::All => write!(f, "All"),
            UnitCategory::Military => write!(f, "Military"),
            UnitCategory::Civilian => write!(f, "Civilian"),
            UnitCategory::Melee => write!(f, "Melee"),
            UnitCategory::Ranged => write!(f, "Ranged"),
            UnitCategory::Land => write!(f, "Land"),
            UnitCategory::Water => write!(f, "Water"),
            UnitCategory::Air => write!(f, "Air"),
            UnitCategory::Mounted => write!(f, "Mounted"),
            UnitCategory::Armored => write!(f, "Armored"),
            UnitCategory::Siege => write!(f, "Siege"),
            UnitCategory::Wounded => write!(f, "Wounded"),
            UnitCategory::Embarked => write!(f, "Embarked"),
            UnitCategory::Barbarian => write!(f, "Barbarian"),
            UnitCategory::CityState => write!(f, "City-States"),
            UnitCategory::City => write!(f, "City"),
            UnitCategory::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Static description of a unit kind (base strengths and classification)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitKind {
    pub name: String,
    /// Base melee/defence strength
    pub strength: i32,
    /// Base ranged strength (0 for non-ranged kinds)
    pub ranged_strength: i32,
    pub arm: CombatArm,
    pub domain: MovementDomain,
    /// Classification tags matched by category filters (Mounted, Siege, ...)
    pub tags: Vec<UnitCategory>,
    /// Strategic resources this kind consumes
    pub required_resources: Vec<String>,
}

impl UnitKind {
    fn new(name: &str, strength: i32, arm: CombatArm) -> Self {
        Self {
            name: name.to_string(),
            strength,
            ranged_strength: 0,
            arm,
            domain: MovementDomain::Land,
            tags: Vec::new(),
            required_resources: Vec::new(),
        }
    }

    /// Baseline melee infantry
    pub fn warrior() -> Self {
        Self::new("Warrior", 8, CombatArm::Melee)
    }

    /// Ranged infantry
    pub fn archer() -> Self {
        let mut kind = Self::new("Archer", 5, CombatArm::Ranged);
        kind.ranged_strength = 7;
        kind
    }

    /// Mounted melee, consumes horses
    pub fn knight() -> Self {
        let mut kind = Self::new("Knight", 20, CombatArm::Melee);
        kind.tags.push(UnitCategory::Mounted);
        kind.required_resources.push("Horses".to_string());
        kind
    }

    /// Siege weapon, consumes iron
    pub fn catapult() -> Self {
        let mut kind = Self::new("Catapult", 7, CombatArm::Ranged);
        kind.ranged_strength = 8;
        kind.tags.push(UnitCategory::Siege);
        kind.required_resources.push("Iron".to_string());
        kind
    }

    /// Non-combat unit
    pub fn worker() -> Self {
        Self::new("Worker", 0, CombatArm::Civilian)
    }

    /// Melee warship
    pub fn galley() -> Self {
        let mut kind = Self::new("Galley", 10, CombatArm::Melee);
        kind.domain = MovementDomain::Water;
        kind
    }
}

/// A mobile unit on the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub faction: FactionId,
    pub kind: UnitKind,
    pub position: HexCoord,
    /// Health in [0, 100]
    pub health: i32,
    pub embarked: bool,
    /// Turns spent fortified; `None` when not fortified
    pub fortified_turns: Option<u32>,
    /// Promotions and other unit-local combat effects
    pub effects: Vec<Effect>,
}

impl Unit {
    pub fn new(id: UnitId, faction: FactionId, kind: UnitKind, position: HexCoord) -> Self {
        Self {
            id,
            faction,
            kind,
            position,
            health: 100,
            embarked: false,
            fortified_turns: None,
            effects: Vec::new(),
        }
    }

    pub fn is_military(&self) -> bool {
        self.kind.arm != CombatArm::Civilian
    }

    pub fn is_melee(&self) -> bool {
        self.kind.arm == CombatArm::Melee
    }

    pub fn is_wounded(&self) -> bool {
        self.health < 100
    }
}

/// A stationary settlement combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    pub id: SettlementId,
    pub name: String,
    pub faction: FactionId,
    pub position: HexCoord,
    /// Base combat strength, attacking and defending
    pub strength: i32,
    /// Health in [0, 100]
    pub health: i32,
    /// Buildings and other settlement-local combat effects
    pub effects: Vec<Effect>,
}

impl Settlement {
    pub fn new(
        id: SettlementId,
        name: &str,
        faction: FactionId,
        position: HexCoord,
        strength: i32,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            faction,
            position,
            strength,
            health: 100,
            effects: Vec::new(),
        }
    }
}
