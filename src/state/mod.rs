//! Read-only game snapshot queried by combat resolution
//!
//! A [`GameState`] is a consistent view of the board for the duration of one
//! resolution call: tiles, units, settlements, factions and difficulty
//! settings. Combat never mutates it.

pub mod faction;
pub mod unit;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::FactionId;
use crate::map::hex::HexCoord;
use crate::map::tile::{Tile, TileFilter};

pub use faction::Faction;
pub use unit::{CombatArm, MovementDomain, Settlement, Unit, UnitCategory, UnitKind};

/// Difficulty knobs read by combat resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GameSettings {
    /// Bonus strength fraction against barbarians (e.g. 0.33 = +33%)
    pub barbarian_bonus: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            barbarian_bonus: 0.0,
        }
    }
}

/// Snapshot of the board state for one resolution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    pub tiles: AHashMap<HexCoord, Tile>,
    pub units: Vec<Unit>,
    pub settlements: Vec<Settlement>,
    pub factions: Vec<Faction>,
    pub settings: GameSettings,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tile(&self, at: HexCoord) -> Option<&Tile> {
        self.tiles.get(&at)
    }

    /// Look up a faction by id. Every combatant in the snapshot references a
    /// faction the snapshot contains; a miss is a broken snapshot.
    pub fn faction(&self, id: FactionId) -> &Faction {
        self.factions
            .iter()
            .find(|f| f.id == id)
            .expect("combatant faction missing from snapshot")
    }

    pub fn units_at(&self, at: HexCoord) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().filter(move |u| u.position == at)
    }

    /// The military unit occupying a tile, if any
    pub fn military_unit_at(&self, at: HexCoord) -> Option<&Unit> {
        self.units_at(at).find(|u| u.is_military())
    }

    pub fn settlement_at(&self, at: HexCoord) -> Option<&Settlement> {
        self.settlements.iter().find(|s| s.position == at)
    }

    /// True if a river separates two adjacent tiles
    pub fn crosses_river(&self, a: HexCoord, b: HexCoord) -> bool {
        self.tile(a).map(|t| t.is_connected_by_river(b)).unwrap_or(false)
            || self.tile(b).map(|t| t.is_connected_by_river(a)).unwrap_or(false)
    }

    /// True if the tile is road-connected for the given faction
    pub fn has_road_connection(&self, at: HexCoord, _faction: FactionId) -> bool {
        self.tile(at).map(|t| t.has_road).unwrap_or(false)
    }

    /// Evaluate a tile filter. `viewer` resolves ownership-relative filters
    /// (friendly/foreign land); `None` makes those filters never match.
    pub fn tile_matches(&self, at: HexCoord, filter: &TileFilter, viewer: Option<FactionId>) -> bool {
        let Some(tile) = self.tile(at) else {
            return false;
        };
        match filter {
            TileFilter::All => true,
            TileFilter::Land => tile.terrain.is_land(),
            TileFilter::Water => !tile.terrain.is_land(),
            TileFilter::Open => tile.terrain.is_land() && !tile.is_rough() && tile.feature.is_none(),
            TileFilter::Rough => tile.is_rough(),
            TileFilter::FriendlyLand => {
                tile.terrain.is_land() && viewer.is_some() && tile.owner == viewer
            }
            TileFilter::ForeignLand => {
                tile.terrain.is_land()
                    && matches!((tile.owner, viewer), (Some(o), Some(v)) if o != v)
            }
            TileFilter::River => !tile.river_edges.is_empty(),
            TileFilter::Coastal => {
                tile.terrain.is_land()
                    && at.neighbors().iter().any(|n| {
                        self.tile(*n).map(|t| !t.terrain.is_land()).unwrap_or(false)
                    })
            }
            TileFilter::Terrain(t) => tile.terrain == *t,
            TileFilter::Feature(ft) => tile.feature == Some(*ft),
        }
    }
}
