//! Factions: the owning polities of units and settlements
//!
//! A faction snapshot carries everything combat resolution reads: happiness,
//! wars, golden age, resource balances and faction-wide effects.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::core::types::FactionId;
use crate::rules::effect::Effect;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
    /// Net happiness; negative values penalise combat strength
    pub happiness: i32,
    pub golden_age: bool,
    pub barbarian: bool,
    pub city_state: bool,
    /// Allied major faction, for city-states
    pub ally: Option<FactionId>,
    pub at_war_with: AHashSet<FactionId>,
    /// Strategic resource balances; negative means over-committed
    pub resources: AHashMap<String, i32>,
    /// Roads bridge rivers for this faction
    pub roads_cross_rivers: bool,
    /// Civics, wonders and other faction-wide combat effects
    pub effects: Vec<Effect>,
}

impl Faction {
    pub fn new(id: FactionId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            happiness: 0,
            golden_age: false,
            barbarian: false,
            city_state: false,
            ally: None,
            at_war_with: AHashSet::new(),
            resources: AHashMap::new(),
            roads_cross_rivers: false,
            effects: Vec::new(),
        }
    }

    pub fn is_at_war_with(&self, other: FactionId) -> bool {
        self.at_war_with.contains(&other)
    }

    /// Resource balance, treating unknown resources as zero
    pub fn resource_balance(&self, resource: &str) -> i32 {
        self.resources.get(resource).copied().unwrap_or(0)
    }
}
