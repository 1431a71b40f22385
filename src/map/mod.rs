//! World map: hex geometry and tiles

pub mod hex;
pub mod tile;

pub use hex::HexCoord;
pub use tile::{Terrain, TerrainFeature, Tile, TileFilter};
