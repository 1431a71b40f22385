//! World map tiles: terrain, features, rivers and roads
//!
//! Terrain carries an intrinsic defensive bonus that feeds combat resolution.

use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::FactionId;
use crate::map::hex::HexCoord;

/// Base terrain for a map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    #[default]
    Plains,
    Grassland,
    Desert,
    Tundra,
    Snow,
    Hills,
    Mountains,
    Coast,
    Ocean,
}

impl Terrain {
    /// Intrinsic defensive bonus (fraction, e.g. 0.25 = +25%)
    pub fn defensive_bonus(&self) -> f32 {
        match self {
            Terrain::Hills | Terrain::Mountains => 0.25,
            _ => 0.0,
        }
    }

    pub fn is_land(&self) -> bool {
        !matches!(self, Terrain::Coast | Terrain::Ocean)
    }

    /// Rough terrain slows movement and favors defenders
    pub fn is_rough(&self) -> bool {
        matches!(self, Terrain::Hills | Terrain::Mountains)
    }
}

/// Optional terrain feature layered on top of the base terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainFeature {
    Forest,
    Jungle,
    Marsh,
    FloodPlains,
    Oasis,
}

impl TerrainFeature {
    /// Defensive bonus contributed by the feature (fraction)
    pub fn defensive_bonus(&self) -> f32 {
        match self {
            TerrainFeature::Forest | TerrainFeature::Jungle => 0.25,
            TerrainFeature::Marsh | TerrainFeature::FloodPlains => -0.1,
            TerrainFeature::Oasis => 0.0,
        }
    }

    pub fn is_rough(&self) -> bool {
        matches!(
            self,
            TerrainFeature::Forest | TerrainFeature::Jungle | TerrainFeature::Marsh
        )
    }
}

/// A single map tile
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Tile {
    pub terrain: Terrain,
    pub feature: Option<TerrainFeature>,
    /// Neighboring coordinates separated from this tile by a river
    pub river_edges: AHashSet<HexCoord>,
    pub has_road: bool,
    pub owner: Option<FactionId>,
}

impl Tile {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            ..Default::default()
        }
    }

    pub fn with_feature(mut self, feature: TerrainFeature) -> Self {
        self.feature = Some(feature);
        self
    }

    /// Combined defensive bonus of terrain and feature (fraction)
    pub fn defensive_bonus(&self) -> f32 {
        self.terrain.defensive_bonus()
            + self.feature.map(|f| f.defensive_bonus()).unwrap_or(0.0)
    }

    /// True if a river runs along the edge towards `neighbor`
    pub fn is_connected_by_river(&self, neighbor: HexCoord) -> bool {
        self.river_edges.contains(&neighbor)
    }

    pub fn is_rough(&self) -> bool {
        self.terrain.is_rough() || self.feature.map(|f| f.is_rough()).unwrap_or(false)
    }
}

/// Predicate over tiles, used by conditional combat effects
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileFilter {
    All,
    Land,
    Water,
    /// Flat land without a feature
    Open,
    Rough,
    FriendlyLand,
    ForeignLand,
    River,
    Coastal,
    Terrain(Terrain),
    Feature(TerrainFeature),
}

impl fmt::Display for TileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileFilter::All => write!(f, "All"),
            TileFilter::Land => write!(f, "Land"),
            TileFilter::Water => write!(f, "Water"),
            TileFilter::Open => write!(f, "Open terrain"),
            TileFilter::Rough => write!(f, "Rough terrain"),
            TileFilter::FriendlyLand => write!(f, "Friendly Land"),
            TileFilter::ForeignLand => write!(f, "Foreign Land"),
            TileFilter::River => write!(f, "River"),
            TileFilter::Coastal => write!(f, "Coastal"),
            TileFilter::Terrain(t) => write!(f, "{:?}", t),
            TileFilter::Feature(t) => write!(f, "{:?}", t),
        }
    }
}
