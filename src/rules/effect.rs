//! Conditional combat effects
//!
//! The effect catalog is a closed set of typed records. Every rule that can
//! bend a combat number lives here as one variant with its parameters already
//! parsed; the combat core never touches rule text.

use serde::{Deserialize, Serialize};

use crate::map::tile::TileFilter;
use crate::state::unit::UnitCategory;

/// One conditional combat effect, carried by a unit (promotion), a settlement
/// (building) or a faction (civic, wonder, era bonus).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effect {
    /// ±X% strength against opponents matching a category
    StrengthVsCategory { percent: i32, category: UnitCategory },
    /// Flat ±X% combat strength
    CombatStrength { percent: i32 },
    /// Faction-wide: units of a category deal ±X% damage
    CategoryDamage { category: UnitCategory, percent: i32 },
    /// Faction-wide: ±X% strength for units of a category with an allied unit
    /// of another category in an adjacent tile
    AdjacentAllyBonus {
        percent: i32,
        unit_category: UnitCategory,
        ally_category: UnitCategory,
    },
    /// Carried by a unit: ±X% strength imposed on enemy units of a category
    /// in adjacent tiles matching a filter
    AdjacentEnemyPenalty {
        percent: i32,
        enemy_category: UnitCategory,
        tile_filter: TileFilter,
    },
    /// Carried by a commander unit: +15% strength to allied units within
    /// 2 tiles
    CombatAura,
    /// Faction-wide: the commander aura grants +30% instead of +15%
    DoubledAura,
    /// ±X% strength when sharing a tile with a unit matching a category
    StackedWith { percent: i32, category: UnitCategory },
    /// Faction-wide: +10% strength while a golden age is active
    GoldenAgeStrength,
    /// Faction-wide: +30% strength against city-state units and settlements
    CityStateCombat,
    /// ±X% strength on tiles matching a filter
    StrengthInTiles { percent: i32, filter: TileFilter },
    /// Superseded phrasing of [`Effect::StrengthInTiles`]; kept so older
    /// faction rule sets still load
    StrengthFightingInTiles { percent: i32, filter: TileFilter },
    /// Faction-wide: ±X% strength within a radius of a matching tile
    StrengthNear {
        percent: i32,
        radius: u32,
        filter: TileFilter,
    },
    /// Faction-wide: ±X% strength for units of a category on matching tiles
    CategoryStrengthInTiles {
        percent: i32,
        category: UnitCategory,
        filter: TileFilter,
    },
    /// ±X% strength when attacking
    AttackBonus { percent: i32 },
    /// Removes the embarked-attack penalty
    Amphibious,
    /// ±X% to the flanking bonus
    FlankingMultiplier { percent: i32 },
    /// Removes the river-crossing attack penalty
    RiverRaider,
    /// Faction-wide timed buff: ±X% attack strength for units of a category
    TemporaryAttackBonus { percent: i32, category: UnitCategory },
    /// Faction-wide: +15% strength when attacking settlements
    CityAssault,
    /// Settlement: ±X% attacking strength while garrisoned
    GarrisonAttack { percent: i32 },
    /// Settlement: ±X% attacking strength
    SettlementAttack { percent: i32 },
    /// Unit or faction-wide: embarked units defend at +100%
    EmbarkedDefence,
    /// The unit never receives terrain defensive bonuses
    NoTerrainDefence,
    /// ±X% strength when defending against a category
    DefenceVsCategory { percent: i32, category: UnitCategory },
    /// ±X% strength when defending
    DefenceBonus { percent: i32 },
    /// ±X% defence on tiles matching a filter
    DefenceInTiles { percent: i32, filter: TileFilter },
    /// Faction-wide: ±X% defensive strength for settlements
    SettlementDefence { percent: i32 },
    /// Faction-wide: units fight at full strength regardless of damage
    FullStrengthWhenDamaged,
}
