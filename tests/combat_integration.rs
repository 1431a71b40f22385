//! End-to-end combat scenarios against full board snapshots

use hegemon::combat::{
    attack_modifiers, damage_to_attacker, defence_modifiers, resolve_seeded, Combatant, Engagement,
    ModifierLabel,
};
use hegemon::core::types::{FactionId, SettlementId, UnitId};
use hegemon::map::hex::HexCoord;
use hegemon::map::tile::{Terrain, Tile};
use hegemon::rules::Effect;
use hegemon::state::{Faction, GameState, Settlement, Unit, UnitCategory, UnitKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const ROME: FactionId = FactionId(0);
const CARTHAGE: FactionId = FactionId(1);

fn duel() -> GameState {
    let mut state = GameState::new();
    state.factions.push(Faction::new(ROME, "Rome"));
    state.factions.push(Faction::new(CARTHAGE, "Carthage"));
    state.factions[0].at_war_with.insert(CARTHAGE);
    state.factions[1].at_war_with.insert(ROME);
    state
}

fn place(state: &mut GameState, id: u32, faction: FactionId, kind: UnitKind, at: HexCoord) -> usize {
    state.units.push(Unit::new(UnitId(id), faction, kind, at));
    state.units.len() - 1
}

#[test]
fn test_flanking_counts_all_surrounding_melee() {
    let mut state = duel();
    let target = HexCoord::new(0, 0);
    place(&mut state, 1, CARTHAGE, UnitKind::warrior(), target);
    // the attacker and two more melee units ring the defender
    let attacker = place(&mut state, 2, ROME, UnitKind::warrior(), HexCoord::new(1, 0));
    place(&mut state, 3, ROME, UnitKind::warrior(), HexCoord::new(0, 1));
    place(&mut state, 4, ROME, UnitKind::warrior(), HexCoord::new(1, -1));

    let modifiers = attack_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[0]),
    );
    assert_eq!(modifiers.get(&ModifierLabel::Flanking), Some(20));
}

#[test]
fn test_lone_attacker_gets_no_flanking() {
    let mut state = duel();
    place(&mut state, 1, CARTHAGE, UnitKind::warrior(), HexCoord::new(0, 0));
    let attacker = place(&mut state, 2, ROME, UnitKind::warrior(), HexCoord::new(1, 0));

    let modifiers = attack_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[0]),
    );
    assert_eq!(modifiers.get(&ModifierLabel::Flanking), None);
}

#[test]
fn test_missing_resources_penalise_once() {
    let mut state = duel();
    state.factions[0].resources.insert("Iron".to_string(), -2);
    state.factions[0].resources.insert("Horses".to_string(), -1);

    let mut kind = UnitKind::catapult();
    kind.required_resources.push("Horses".to_string());
    let attacker = place(&mut state, 1, ROME, kind, HexCoord::new(0, 0));
    place(&mut state, 2, CARTHAGE, UnitKind::warrior(), HexCoord::new(2, 0));

    let modifiers = attack_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[1]),
    );
    // two shortages, one flat -25
    assert_eq!(modifiers.get(&ModifierLabel::MissingResource), Some(-25));
}

#[test]
fn test_settlement_defence_sums_fractions_before_truncating() {
    let mut state = duel();
    state.factions[1].effects.push(Effect::SettlementDefence { percent: 50 });
    state.factions[1].effects.push(Effect::SettlementDefence { percent: 60 });
    state.settlements.push(Settlement::new(
        SettlementId(1),
        "Carthago",
        CARTHAGE,
        HexCoord::new(0, 0),
        12,
    ));
    let attacker = place(&mut state, 1, ROME, UnitKind::warrior(), HexCoord::new(1, 0));

    let modifiers = defence_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Settlement(&state.settlements[0]),
    );
    // 0.5 + 0.6 truncates to 1, not 0 + 0
    assert_eq!(modifiers.get(&ModifierLabel::DefensiveBonus), Some(1));
}

#[test]
fn test_embarked_defenders_ignore_terrain() {
    let mut state = duel();
    let at = HexCoord::new(0, 0);
    state.tiles.insert(at, Tile::new(Terrain::Hills));
    let defender = place(&mut state, 1, CARTHAGE, UnitKind::warrior(), at);
    state.units[defender].embarked = true;
    let attacker = place(&mut state, 2, ROME, UnitKind::warrior(), HexCoord::new(1, 0));

    let modifiers = defence_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[defender]),
    );
    assert_eq!(modifiers.get(&ModifierLabel::Tile), None);
    assert_eq!(modifiers.get(&ModifierLabel::Embarked), None);

    state.factions[1].effects.push(Effect::EmbarkedDefence);
    let modifiers = defence_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[defender]),
    );
    assert_eq!(modifiers.get(&ModifierLabel::Embarked), Some(100));
    assert_eq!(modifiers.get(&ModifierLabel::Tile), None);
}

#[test]
fn test_river_crossing_penalty_and_bridges() {
    let mut state = duel();
    let from = HexCoord::new(0, 0);
    let to = HexCoord::new(1, 0);
    let mut near_bank = Tile::new(Terrain::Plains);
    near_bank.river_edges.insert(to);
    state.tiles.insert(from, near_bank);
    state.tiles.insert(to, Tile::new(Terrain::Plains));

    let attacker = place(&mut state, 1, ROME, UnitKind::warrior(), from);
    let defender = place(&mut state, 2, CARTHAGE, UnitKind::warrior(), to);

    let modifiers = attack_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[defender]),
    );
    assert_eq!(modifiers.get(&ModifierLabel::AcrossRiver), Some(-20));

    // roads on both banks and engineering that bridges rivers lift it
    state.tiles.get_mut(&from).unwrap().has_road = true;
    state.tiles.get_mut(&to).unwrap().has_road = true;
    state.factions[0].roads_cross_rivers = true;
    let modifiers = attack_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[defender]),
    );
    assert_eq!(modifiers.get(&ModifierLabel::AcrossRiver), None);
}

#[test]
fn test_commander_aura_within_two_tiles() {
    let mut state = duel();
    let attacker = place(&mut state, 1, ROME, UnitKind::warrior(), HexCoord::new(0, 0));
    place(&mut state, 2, CARTHAGE, UnitKind::warrior(), HexCoord::new(3, 0));
    let general = place(&mut state, 3, ROME, UnitKind::worker(), HexCoord::new(0, 2));
    state.units[general].effects.push(Effect::CombatAura);

    let modifiers = attack_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[1]),
    );
    assert_eq!(modifiers.get(&ModifierLabel::GreatGeneral), Some(15));

    state.factions[0].effects.push(Effect::DoubledAura);
    let modifiers = attack_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[1]),
    );
    assert_eq!(modifiers.get(&ModifierLabel::GreatGeneral), Some(30));
}

#[test]
fn test_unhappiness_penalty_is_floored() {
    let mut state = duel();
    state.factions[0].happiness = -60;
    let attacker = place(&mut state, 1, ROME, UnitKind::warrior(), HexCoord::new(0, 0));
    place(&mut state, 2, CARTHAGE, UnitKind::warrior(), HexCoord::new(1, 0));

    let modifiers = attack_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[1]),
    );
    assert_eq!(modifiers.get(&ModifierLabel::Unhappiness), Some(-90));
}

#[test]
fn test_barbarian_difficulty_bonus_applies_to_both_roles() {
    let mut state = duel();
    state.factions[1].barbarian = true;
    state.settings.barbarian_bonus = 0.33;
    let roman = place(&mut state, 1, ROME, UnitKind::warrior(), HexCoord::new(0, 0));
    let barbarian = place(&mut state, 2, CARTHAGE, UnitKind::warrior(), HexCoord::new(1, 0));

    let attack = attack_modifiers(
        &state,
        &Combatant::Unit(&state.units[roman]),
        &Combatant::Unit(&state.units[barbarian]),
    );
    assert_eq!(attack.get(&ModifierLabel::Difficulty), Some(33));

    let defence = defence_modifiers(
        &state,
        &Combatant::Unit(&state.units[barbarian]),
        &Combatant::Unit(&state.units[roman]),
    );
    assert_eq!(defence.get(&ModifierLabel::Difficulty), Some(33));
}

#[test]
fn test_category_bonuses_accumulate_additively() {
    let mut state = duel();
    state.factions[0].effects.push(Effect::StrengthVsCategory {
        percent: 10,
        category: UnitCategory::Mounted,
    });
    let attacker = place(&mut state, 1, ROME, UnitKind::warrior(), HexCoord::new(0, 0));
    state.units[attacker].effects.push(Effect::StrengthVsCategory {
        percent: 25,
        category: UnitCategory::Mounted,
    });
    let knight = place(&mut state, 2, CARTHAGE, UnitKind::knight(), HexCoord::new(1, 0));

    let modifiers = attack_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[knight]),
    );
    assert_eq!(
        modifiers.get(&ModifierLabel::VsCategory(UnitCategory::Mounted)),
        Some(35)
    );
}

#[test]
fn test_fortification_scales_with_turns() {
    let mut state = duel();
    let defender = place(&mut state, 1, CARTHAGE, UnitKind::warrior(), HexCoord::new(0, 0));
    state.units[defender].fortified_turns = Some(2);
    let attacker = place(&mut state, 2, ROME, UnitKind::warrior(), HexCoord::new(1, 0));

    let modifiers = defence_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[defender]),
    );
    assert_eq!(modifiers.get(&ModifierLabel::Fortification), Some(40));
}

#[test]
fn test_hill_defenders_get_the_tile_bonus() {
    let mut state = duel();
    let at = HexCoord::new(0, 0);
    state.tiles.insert(at, Tile::new(Terrain::Hills));
    let defender = place(&mut state, 1, CARTHAGE, UnitKind::warrior(), at);
    let attacker = place(&mut state, 2, ROME, UnitKind::warrior(), HexCoord::new(1, 0));

    let modifiers = defence_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[defender]),
    );
    assert_eq!(modifiers.get(&ModifierLabel::Tile), Some(25));
}

#[test]
fn test_ranged_engagement_draws_no_retaliation() {
    let mut state = duel();
    let archer = place(&mut state, 1, ROME, UnitKind::archer(), HexCoord::new(0, 0));
    let target = place(&mut state, 2, CARTHAGE, UnitKind::warrior(), HexCoord::new(2, 0));

    let engagement = Engagement::new(
        Combatant::Unit(&state.units[archer]),
        Combatant::Unit(&state.units[target]),
    );
    let outcome = resolve_seeded(&state, &engagement, 5);
    assert_eq!(outcome.to_attacker, 0);
    assert!(outcome.to_defender > 0);
}

#[test]
fn test_settlement_bombardment_draws_no_retaliation() {
    let mut state = duel();
    state.settlements.push(Settlement::new(
        SettlementId(1),
        "Roma",
        ROME,
        HexCoord::new(0, 0),
        12,
    ));
    let target = place(&mut state, 1, CARTHAGE, UnitKind::warrior(), HexCoord::new(2, 0));

    let engagement = Engagement::new(
        Combatant::Settlement(&state.settlements[0]),
        Combatant::Unit(&state.units[target]),
    );
    let outcome = resolve_seeded(&state, &engagement, 5);
    assert_eq!(outcome.to_attacker, 0);
    assert!(outcome.to_defender > 0);
}

#[test]
fn test_striking_civilians_is_bloodless() {
    let mut state = duel();
    let attacker = place(&mut state, 1, ROME, UnitKind::warrior(), HexCoord::new(0, 0));
    let worker = place(&mut state, 2, CARTHAGE, UnitKind::worker(), HexCoord::new(1, 0));

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let retaliation = damage_to_attacker(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[worker]),
        &mut rng,
    );
    assert_eq!(retaliation, 0);
}

#[test]
fn test_same_seed_same_outcome() {
    let mut state = duel();
    let attacker = place(&mut state, 1, ROME, UnitKind::warrior(), HexCoord::new(0, 0));
    let defender = place(&mut state, 2, CARTHAGE, UnitKind::warrior(), HexCoord::new(1, 0));

    let engagement = Engagement::new(
        Combatant::Unit(&state.units[attacker]),
        Combatant::Unit(&state.units[defender]),
    );
    let first = resolve_seeded(&state, &engagement, 1234);
    let second = resolve_seeded(&state, &engagement, 1234);
    assert_eq!(first, second);
    assert!(first.to_defender > 0);
    assert!(first.to_attacker > 0);
}

#[test]
fn test_modifier_breakdown_is_queryable_by_label() {
    let mut state = duel();
    state.factions[1].barbarian = true;
    state.settings.barbarian_bonus = 0.25;
    let attacker = place(&mut state, 1, ROME, UnitKind::warrior(), HexCoord::new(0, 0));
    state.units[attacker].effects.push(Effect::AttackBonus { percent: 20 });
    place(&mut state, 2, CARTHAGE, UnitKind::warrior(), HexCoord::new(1, 0));

    let modifiers = attack_modifiers(
        &state,
        &Combatant::Unit(&state.units[attacker]),
        &Combatant::Unit(&state.units[1]),
    );
    let labels: Vec<String> = modifiers.iter().map(|(l, _)| l.to_string()).collect();
    assert!(labels.contains(&"Attacker Bonus".to_string()));
    assert!(labels.contains(&"Difficulty".to_string()));
    assert_eq!(modifiers.get(&ModifierLabel::AttackerBonus), Some(20));
}
