//! Combat modifier collection
//!
//! Walks every conditional effect that can bend a combat number for one
//! participant in one engagement and accumulates them into a named
//! [`ModifierSet`]. Labels are additive accumulation keys: repeated bonuses
//! under the same label add together before the multiplicative fold in
//! [`crate::combat::damage`]. Flat rules overwrite their label instead.

use std::fmt;

use crate::combat::combatant::Combatant;
use crate::map::hex::HexCoord;
use crate::map::tile::TileFilter;
use crate::rules::effect::Effect;
use crate::state::unit::{Settlement, Unit, UnitCategory};
use crate::state::{Faction, GameState};

/// Name of one percentage modifier, shown in UI breakdowns
#[derive(Debug, Clone, PartialEq)]
pub enum ModifierLabel {
    VsCategory(UnitCategory),
    CombatStrength,
    Unhappiness,
    CategoryDamage(UnitCategory),
    AdjacentUnits,
    AdjacentEnemyUnits,
    MissingResource,
    GreatGeneral,
    StackedWith(UnitCategory),
    GoldenAge,
    Difficulty,
    TileFilterBonus(TileFilter),
    AttackerBonus,
    Landing,
    Flanking,
    AcrossRiver,
    TemporaryBonus,
    CityAssault,
    GarrisonedUnit,
    AttackingBonus,
    Embarked,
    Tile,
    DefenceVsCategory(UnitCategory),
    DefenderBonus,
    TileFilterDefence(TileFilter),
    Fortification,
    DefensiveBonus,
}

impl fmt::Display for ModifierLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierLabel::VsCategory(c) => write!(f, "vs [{}]", c),
            ModifierLabel::CombatStrength => write!(f, "Combat Strength"),
            ModifierLabel::Unhappiness => write!(f, "Unhappiness"),
            ModifierLabel::CategoryDamage(c) => write!(f, "{}", c),
            ModifierLabel::AdjacentUnits => write!(f, "Adjacent units"),
            ModifierLabel::AdjacentEnemyUnits => write!(f, "Adjacent enemy units"),
            ModifierLabel::MissingResource => write!(f, "Missing resource"),
            ModifierLabel::GreatGeneral => write!(f, "Great General"),
            ModifierLabel::StackedWith(c) => write!(f, "Stacked with [{}]", c),
            ModifierLabel::GoldenAge => write!(f, "Golden Age"),
            ModifierLabel::Difficulty => write!(f, "Difficulty"),
            ModifierLabel::TileFilterBonus(t) => write!(f, "{}", t),
            ModifierLabel::AttackerBonus => write!(f, "Attacker Bonus"),
            ModifierLabel::Landing => write!(f, "Landing"),
            ModifierLabel::Flanking => write!(f, "Flanking"),
            ModifierLabel::AcrossRiver => write!(f, "Across river"),
            ModifierLabel::TemporaryBonus => write!(f, "Temporary Bonus"),
            ModifierLabel::CityAssault => write!(f, "City Assault"),
            ModifierLabel::GarrisonedUnit => write!(f, "Garrisoned unit"),
            ModifierLabel::AttackingBonus => write!(f, "Attacking Bonus"),
            ModifierLabel::Embarked => write!(f, "Embarked"),
            ModifierLabel::Tile => write!(f, "Tile"),
            ModifierLabel::DefenceVsCategory(c) => write!(f, "defence vs [{}]", c),
            ModifierLabel::DefenderBonus => write!(f, "Defender Bonus"),
            ModifierLabel::TileFilterDefence(t) => write!(f, "[{}] defence", t),
            ModifierLabel::Fortification => write!(f, "Fortification"),
            ModifierLabel::DefensiveBonus => write!(f, "Defensive Bonus"),
        }
    }
}

/// Insertion-ordered mapping from modifier label to accumulated percentage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifierSet(Vec<(ModifierLabel, i32)>);

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate onto a label (repeated bonuses add together)
    pub fn add(&mut self, label: ModifierLabel, amount: i32) {
        if let Some(entry) = self.0.iter_mut().find(|(l, _)| *l == label) {
            entry.1 += amount;
        } else {
            self.0.push((label, amount));
        }
    }

    /// Overwrite a label (flat rules apply once)
    pub fn set(&mut self, label: ModifierLabel, amount: i32) {
        if let Some(entry) = self.0.iter_mut().find(|(l, _)| *l == label) {
            entry.1 = amount;
        } else {
            self.0.push((label, amount));
        }
    }

    pub fn get(&self, label: &ModifierLabel) -> Option<i32> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, v)| *v)
    }

    /// Merge another set, accumulating shared labels
    pub fn extend_add(&mut self, other: ModifierSet) {
        for (label, amount) in other.0 {
            self.add(label, amount);
        }
    }

    /// Merge another set, overwriting shared labels
    pub fn extend_set(&mut self, other: ModifierSet) {
        for (label, amount) in other.0 {
            self.set(label, amount);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ModifierLabel, i32)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Percentage to growth factor: +25 becomes 1.25
pub(crate) fn to_percent(percent: i32) -> f32 {
    1.0 + percent as f32 / 100.0
}

fn unit_and_faction_effects<'a>(
    unit: &'a Unit,
    faction: &'a Faction,
) -> impl Iterator<Item = &'a Effect> {
    unit.effects.iter().chain(faction.effects.iter())
}

fn settlement_and_faction_effects<'a>(
    settlement: &'a Settlement,
    faction: &'a Faction,
) -> impl Iterator<Item = &'a Effect> {
    settlement.effects.iter().chain(faction.effects.iter())
}

/// Modifiers that apply in both roles, evaluated for `subject`
fn general_modifiers(
    state: &GameState,
    subject: &Combatant<'_>,
    opponent: &Combatant<'_>,
) -> ModifierSet {
    let mut modifiers = ModifierSet::new();
    let faction = state.faction(subject.faction_id());

    if let Combatant::Unit(unit) = *subject {
        for effect in unit_and_faction_effects(unit, faction) {
            if let Effect::StrengthVsCategory { percent, category } = effect {
                if opponent.matches_category(category, state) {
                    modifiers.add(ModifierLabel::VsCategory(category.clone()), *percent);
                }
            }
        }

        for effect in &unit.effects {
            if let Effect::CombatStrength { percent } = effect {
                modifiers.add(ModifierLabel::CombatStrength, *percent);
            }
        }

        // City-states with an ally also suffer the ally's unhappiness
        let happiness = match (faction.city_state, faction.ally) {
            (true, Some(ally)) => faction.happiness.min(state.faction(ally).happiness),
            _ => faction.happiness,
        };
        if happiness < 0 {
            // floored at -90 so the total cannot pass -100% and heal the enemy
            modifiers.set(ModifierLabel::Unhappiness, (2 * happiness).max(-90));
        }

        for effect in &faction.effects {
            if let Effect::CategoryDamage { category, percent } = effect {
                if subject.matches_category(category, state) {
                    modifiers.add(ModifierLabel::CategoryDamage(category.clone()), *percent);
                }
            }
        }

        let adjacent_units: Vec<&Unit> = unit
            .position
            .neighbors()
            .iter()
            .flat_map(|n| state.units_at(*n))
            .collect();

        for effect in &faction.effects {
            if let Effect::AdjacentAllyBonus {
                percent,
                unit_category,
                ally_category,
            } = effect
            {
                if subject.matches_category(unit_category, state)
                    && adjacent_units.iter().copied().any(|u| {
                        u.faction == unit.faction
                            && Combatant::Unit(u).matches_category(ally_category, state)
                    })
                {
                    modifiers.add(ModifierLabel::AdjacentUnits, *percent);
                }
            }
        }

        for enemy in adjacent_units
            .iter()
            .copied()
            .filter(|u| state.faction(u.faction).is_at_war_with(unit.faction))
        {
            let enemy_faction = state.faction(enemy.faction);
            for effect in unit_and_faction_effects(enemy, enemy_faction) {
                if let Effect::AdjacentEnemyPenalty {
                    percent,
                    enemy_category,
                    tile_filter,
                } = effect
                {
                    if subject.matches_category(enemy_category, state)
                        && state.tile_matches(unit.position, tile_filter, None)
                    {
                        modifiers.add(ModifierLabel::AdjacentEnemyUnits, *percent);
                    }
                }
            }
        }

        if !faction.barbarian {
            for resource in &unit.kind.required_resources {
                if faction.resource_balance(resource) < 0 {
                    // flat penalty, applied once no matter how many are short
                    modifiers.set(ModifierLabel::MissingResource, -25);
                }
            }
        }

        let aura_in_range = unit.position.hexes_in_range(2).iter().any(|at| {
            state
                .units_at(*at)
                .any(|u| u.faction == unit.faction && u.effects.contains(&Effect::CombatAura))
        });
        if aura_in_range {
            let amount = if faction.effects.contains(&Effect::DoubledAura) {
                30
            } else {
                15
            };
            modifiers.set(ModifierLabel::GreatGeneral, amount);
        }

        for effect in unit_and_faction_effects(unit, faction) {
            if let Effect::StackedWith { percent, category } = effect {
                let mut bonus = 0;
                if state
                    .units_at(unit.position)
                    .any(|u| Combatant::Unit(u).matches_category(category, state))
                {
                    bonus += percent;
                }
                if bonus > 0 {
                    modifiers.set(ModifierLabel::StackedWith(category.clone()), bonus);
                }
            }
        }

        if faction.golden_age && faction.effects.contains(&Effect::GoldenAgeStrength) {
            modifiers.set(ModifierLabel::GoldenAge, 10);
        }

        if state.faction(opponent.faction_id()).city_state
            && faction.effects.contains(&Effect::CityStateCombat)
        {
            modifiers.set(ModifierLabel::VsCategory(UnitCategory::CityState), 30);
        }
    }

    if state.faction(opponent.faction_id()).barbarian {
        modifiers.set(
            ModifierLabel::Difficulty,
            (state.settings.barbarian_bonus * 100.0) as i32,
        );
    }

    modifiers
}

/// Terrain and feature bonuses for a unit evaluated against one tile
fn tile_specific_modifiers(state: &GameState, unit: &Unit, at: HexCoord) -> ModifierSet {
    let mut modifiers = ModifierSet::new();
    let faction = state.faction(unit.faction);

    for effect in &unit.effects {
        if let Effect::StrengthInTiles { percent, filter } = effect {
            if state.tile_matches(at, filter, Some(unit.faction)) {
                modifiers.add(ModifierLabel::TileFilterBonus(filter.clone()), *percent);
            }
        }
    }

    for effect in &faction.effects {
        match effect {
            Effect::StrengthFightingInTiles { percent, filter } => {
                if state.tile_matches(at, filter, Some(unit.faction)) {
                    modifiers.add(ModifierLabel::TileFilterBonus(filter.clone()), *percent);
                }
            }
            Effect::StrengthNear {
                percent,
                radius,
                filter,
            } => {
                if at
                    .hexes_in_range(*radius)
                    .iter()
                    .any(|c| state.tile_matches(*c, filter, None))
                {
                    modifiers.set(ModifierLabel::TileFilterBonus(filter.clone()), *percent);
                }
            }
            Effect::CategoryStrengthInTiles {
                percent,
                category,
                filter,
            } => {
                if Combatant::Unit(unit).matches_category(category, state)
                    && state.tile_matches(at, filter, Some(unit.faction))
                {
                    modifiers.add(ModifierLabel::TileFilterBonus(filter.clone()), *percent);
                }
            }
            _ => {}
        }
    }

    modifiers
}

/// Collect every modifier applying to `attacker` in this engagement
pub fn attack_modifiers(
    state: &GameState,
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
) -> ModifierSet {
    let mut modifiers = general_modifiers(state, attacker, defender);

    match *attacker {
        Combatant::Unit(unit) => {
            let faction = state.faction(unit.faction);
            modifiers.extend_add(tile_specific_modifiers(state, unit, defender.position()));

            for effect in unit_and_faction_effects(unit, faction) {
                if let Effect::AttackBonus { percent } = effect {
                    modifiers.add(ModifierLabel::AttackerBonus, *percent);
                }
            }

            if unit.embarked && !unit.effects.contains(&Effect::Amphibious) {
                modifiers.set(ModifierLabel::Landing, -50);
            }

            if attacker.is_melee() {
                // Count melee units of the attacking faction around the
                // defender; the attacker stands on one of those tiles
                let surrounding = defender
                    .position()
                    .neighbors()
                    .iter()
                    .filter(|n| {
                        state
                            .military_unit_at(**n)
                            .map(|u| u.faction == unit.faction && u.is_melee())
                            .unwrap_or(false)
                    })
                    .count() as i32;
                if surrounding > 1 {
                    let mut flank_bonus = 10.0_f32;
                    for effect in unit_and_faction_effects(unit, faction) {
                        if let Effect::FlankingMultiplier { percent } = effect {
                            flank_bonus *= to_percent(*percent);
                        }
                    }
                    modifiers.set(
                        ModifierLabel::Flanking,
                        (flank_bonus * (surrounding - 1) as f32) as i32,
                    );
                }

                let from = unit.position;
                let to = defender.position();
                if from.distance(&to) == 1
                    && state.crosses_river(from, to)
                    && !unit.effects.contains(&Effect::RiverRaider)
                {
                    let bridged = faction.roads_cross_rivers
                        && state.has_road_connection(from, unit.faction)
                        && state.has_road_connection(to, unit.faction);
                    if !bridged {
                        modifiers.set(ModifierLabel::AcrossRiver, -20);
                    }
                }
            }

            for effect in &faction.effects {
                if let Effect::TemporaryAttackBonus { percent, category } = effect {
                    if attacker.matches_category(category, state) {
                        modifiers.add(ModifierLabel::TemporaryBonus, *percent);
                    }
                }
            }

            if defender.as_settlement().is_some()
                && faction.effects.contains(&Effect::CityAssault)
            {
                modifiers.set(ModifierLabel::CityAssault, 15);
            }
        }
        Combatant::Settlement(settlement) => {
            let faction = state.faction(settlement.faction);

            if state.military_unit_at(settlement.position).is_some() {
                let garrison_bonus: i32 = settlement_and_faction_effects(settlement, faction)
                    .filter_map(|e| match e {
                        Effect::GarrisonAttack { percent } => Some(*percent),
                        _ => None,
                    })
                    .sum();
                if garrison_bonus != 0 {
                    modifiers.set(ModifierLabel::GarrisonedUnit, garrison_bonus);
                }
            }

            for effect in settlement_and_faction_effects(settlement, faction) {
                if let Effect::SettlementAttack { percent } = effect {
                    modifiers.add(ModifierLabel::AttackingBonus, *percent);
                }
            }
        }
    }

    modifiers
}

/// Collect every modifier applying to `defender` in this engagement
pub fn defence_modifiers(
    state: &GameState,
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
) -> ModifierSet {
    let mut modifiers = general_modifiers(state, defender, attacker);

    match *defender {
        Combatant::Unit(unit) => {
            let faction = state.faction(unit.faction);

            // Embarked units get no defensive modifiers apart from this one
            if unit.embarked {
                if unit.effects.contains(&Effect::EmbarkedDefence)
                    || faction.effects.contains(&Effect::EmbarkedDefence)
                {
                    modifiers.set(ModifierLabel::Embarked, 100);
                }
                return modifiers;
            }

            modifiers.extend_set(tile_specific_modifiers(state, unit, unit.position));

            if !unit.effects.contains(&Effect::NoTerrainDefence) {
                let bonus = state
                    .tile(unit.position)
                    .map(|t| t.defensive_bonus())
                    .unwrap_or(0.0);
                modifiers.set(ModifierLabel::Tile, (bonus * 100.0) as i32);
            }

            for effect in unit_and_faction_effects(unit, faction) {
                if let Effect::DefenceVsCategory { percent, category } = effect {
                    if attacker.matches_category(category, state) {
                        modifiers.add(ModifierLabel::DefenceVsCategory(category.clone()), *percent);
                    }
                }
            }

            for effect in &unit.effects {
                match effect {
                    Effect::DefenceBonus { percent } => {
                        modifiers.add(ModifierLabel::DefenderBonus, *percent);
                    }
                    Effect::DefenceInTiles { percent, filter } => {
                        if state.tile_matches(unit.position, filter, None) {
                            modifiers
                                .add(ModifierLabel::TileFilterDefence(filter.clone()), *percent);
                        }
                    }
                    _ => {}
                }
            }

            if let Some(turns) = unit.fortified_turns {
                modifiers.set(ModifierLabel::Fortification, 20 * turns as i32);
            }
        }
        Combatant::Settlement(settlement) => {
            let faction = state.faction(settlement.faction);
            // Settlement defence sums each percentage as a fraction and
            // truncates once at the end
            let total: f32 = faction
                .effects
                .iter()
                .filter_map(|e| match e {
                    Effect::SettlementDefence { percent } => Some(*percent as f32 / 100.0),
                    _ => None,
                })
                .sum();
            modifiers.set(ModifierLabel::DefensiveBonus, total as i32);
        }
    }

    modifiers
}
