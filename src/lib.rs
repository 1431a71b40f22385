//! Hegemon: a turn-based strategy combat engine.
//!
//! The crate takes a read-only snapshot of the board ([`state::GameState`]),
//! collects every rule-driven strength modifier bearing on an engagement and
//! resolves the damage dealt to both sides. Nothing here mutates game state;
//! the same snapshot, engagement and seed always produce the same outcome,
//! which keeps replays and AI lookahead honest.
//!
//! Modules:
//! - [`core`]: ids and the crate error type
//! - [`map`]: hex coordinates, tiles, terrain and tile filters
//! - [`state`]: the game snapshot (units, settlements, factions, settings)
//! - [`rules`]: the conditional effect catalog and its TOML loaders
//! - [`combat`]: modifier collection and damage resolution

pub mod combat;
pub mod core;
pub mod map;
pub mod rules;
pub mod state;

pub use combat::{resolve, resolve_seeded, Combatant, Engagement, EngagementDamage};
pub use crate::core::{HegemonError, Result};
pub use state::GameState;
