mod common;

use common::{constant, fighter};
use pokeview::core::battle::{attack_damage, heal_amount, special_damage, PLACEHOLDER_MOVE};
use pokeview::core::utils::{pick_index, roll_range, sequence_source};
use pokeview::{resolve_action, BattleAction, BattleError, CombatantStatus};

#[test]
fn attack_with_neutral_jitter_subtracts_defense() {
    let mut attacker = fighter("Bulbasaur", 100, 60, 50, 50, 50);
    let mut defender = fighter("Charmander", 100, 50, 50, 50, 50);
    // 0.5 lands on jitter 0 in [-5, 5].
    let mut rng = constant(0.5);

    let outcome = resolve_action(BattleAction::Attack, &mut attacker, &mut defender, &mut rng)
        .expect("attack resolves");

    assert_eq!(outcome.damage, 10);
    assert_eq!(outcome.new_hp, 90);
    assert_eq!(defender.current_hp, 90);
    assert!(!outcome.fainted);
    assert!(!outcome.defended);
    assert_eq!(outcome.log, "Bulbasaur attacks Charmander for 10 damage!");
}

#[test]
fn jitter_spans_its_full_range() {
    assert_eq!(roll_range(&mut constant(0.0), -5, 5), -5);
    assert_eq!(roll_range(&mut constant(0.999_999), -5, 5), 5);
    assert_eq!(roll_range(&mut constant(1.0), -5, 5), 5);
    assert_eq!(roll_range(&mut constant(0.25), -3, 8), 0);
    assert_eq!(roll_range(&mut constant(0.7), 3, 3), 3);
}

#[test]
fn pick_index_handles_empty_and_upper_edge() {
    assert_eq!(pick_index(&mut constant(0.3), 0), None);
    assert_eq!(pick_index(&mut constant(0.999), 4), Some(3));
    assert_eq!(pick_index(&mut constant(1.0), 4), Some(3));
}

#[test]
fn damage_is_at_least_one() {
    let weak = fighter("Magikarp", 20, 10, 10, 10, 10);
    let wall = fighter("Shuckle", 20, 10, 230, 10, 230);
    for jitter in -5..=5 {
        assert_eq!(attack_damage(&weak, &wall, jitter), 1);
    }
    for jitter in -3..=8 {
        assert_eq!(special_damage(&weak, &wall, jitter), 1);
    }
}

#[test]
fn defending_target_takes_half_and_loses_stance() {
    let mut attacker = fighter("Bulbasaur", 100, 60, 50, 50, 50);
    let mut defender = fighter("Squirtle", 100, 50, 50, 50, 50);
    defender.defending = true;
    assert_eq!(defender.status(), CombatantStatus::Defending);

    let outcome = resolve_action(BattleAction::Attack, &mut attacker, &mut defender, &mut constant(0.5))
        .expect("attack resolves");

    assert_eq!(outcome.damage, 5);
    assert!(outcome.defended);
    assert_eq!(defender.current_hp, 95);
    assert!(!defender.defending);
    assert!(outcome.log.ends_with("Squirtle braced and took only half!"));

    let second = resolve_action(BattleAction::Attack, &mut attacker, &mut defender, &mut constant(0.5))
        .expect("second attack resolves");
    assert_eq!(second.damage, 10);
    assert!(!second.defended);
}

#[test]
fn halved_minimum_hit_still_deals_one() {
    let mut attacker = fighter("Magikarp", 20, 10, 10, 10, 10);
    let mut defender = fighter("Shuckle", 20, 10, 230, 10, 230);
    defender.defending = true;

    let outcome = resolve_action(BattleAction::Attack, &mut attacker, &mut defender, &mut constant(0.0))
        .expect("attack resolves");

    assert_eq!(outcome.damage, 1);
    assert_eq!(defender.current_hp, 19);
}

#[test]
fn special_without_moves_uses_placeholder() {
    let mut attacker = fighter("Abra", 100, 20, 20, 70, 50);
    let mut defender = fighter("Geodude", 100, 50, 50, 50, 50);
    // Only the jitter draw is consumed; 0.25 lands on 0 in [-3, 8].
    let mut rng = sequence_source(vec![0.25], 0.99);

    let outcome = resolve_action(BattleAction::Special, &mut attacker, &mut defender, &mut rng)
        .expect("special resolves");

    assert_eq!(outcome.damage, 26);
    assert_eq!(outcome.move_name.as_deref(), Some(PLACEHOLDER_MOVE));
    assert_eq!(
        outcome.log,
        "Abra used Special Attack on Geodude for 26 damage!"
    );
}

#[test]
fn special_picks_move_before_jitter() {
    let mut attacker = fighter("Pikachu", 100, 55, 40, 70, 50);
    attacker.moves = vec!["Thunderbolt".to_string(), "Quick Attack".to_string()];
    let mut defender = fighter("Pidgey", 100, 45, 40, 35, 50);
    let mut rng = sequence_source(vec![0.9, 0.25], 0.5);

    let outcome = resolve_action(BattleAction::Special, &mut attacker, &mut defender, &mut rng)
        .expect("special resolves");

    assert_eq!(outcome.move_name.as_deref(), Some("Quick Attack"));
    assert_eq!(outcome.damage, 26);
    assert_eq!(defender.current_hp, 74);
}

#[test]
fn heal_restores_a_fifth_capped_at_max() {
    let mut actor = fighter("Chansey", 100, 5, 5, 35, 105);
    let mut other = fighter("Onix", 35, 45, 160, 30, 45);
    actor.current_hp = 90;

    let outcome = resolve_action(BattleAction::Heal, &mut actor, &mut other, &mut constant(0.5))
        .expect("heal resolves");

    assert_eq!(heal_amount(100), 20);
    assert_eq!(outcome.healed, 10);
    assert_eq!(outcome.new_hp, 100);
    assert_eq!(actor.current_hp, actor.max_hp);
    assert_eq!(outcome.log, "Chansey restored 10 HP!");

    let full = resolve_action(BattleAction::Heal, &mut actor, &mut other, &mut constant(0.5))
        .expect("heal at full resolves");
    assert_eq!(full.healed, 0);
    assert_eq!(actor.current_hp, 100);
    assert_eq!(full.log, "Chansey is already at full health!");
}

#[test]
fn defend_sets_stance_without_damage() {
    let mut actor = fighter("Onix", 35, 45, 160, 30, 45);
    let mut other = fighter("Chansey", 100, 5, 5, 35, 105);

    let outcome = resolve_action(BattleAction::Defend, &mut actor, &mut other, &mut constant(0.5))
        .expect("defend resolves");

    assert!(actor.defending);
    assert_eq!(outcome.damage, 0);
    assert_eq!(other.current_hp, 100);
    assert_eq!(outcome.log, "Onix takes a defensive stance!");
}

#[test]
fn lethal_hit_faints_and_stops_further_actions() {
    let mut attacker = fighter("Machamp", 90, 130, 80, 65, 85);
    let mut defender = fighter("Caterpie", 45, 30, 35, 20, 20);
    defender.current_hp = 5;

    let outcome = resolve_action(BattleAction::Attack, &mut attacker, &mut defender, &mut constant(0.5))
        .expect("attack resolves");

    assert!(outcome.fainted);
    assert_eq!(defender.current_hp, 0);
    assert_eq!(defender.status(), CombatantStatus::Fainted);
    assert!(outcome.log.ends_with("Caterpie fainted! Machamp wins!"));

    let err = resolve_action(BattleAction::Attack, &mut defender, &mut attacker, &mut constant(0.5))
        .expect_err("fainted combatant cannot act");
    assert_eq!(err, BattleError::Fainted("Caterpie".to_string()));

    let err = resolve_action(BattleAction::Heal, &mut attacker, &mut defender, &mut constant(0.5))
        .expect_err("battle is over");
    assert_eq!(err, BattleError::BattleOver);
}

#[test]
fn actions_parse_case_insensitively() {
    assert_eq!("Attack".parse::<BattleAction>(), Ok(BattleAction::Attack));
    assert_eq!(" heal ".parse::<BattleAction>(), Ok(BattleAction::Heal));
    assert_eq!("SPECIAL".parse::<BattleAction>(), Ok(BattleAction::Special));
    assert_eq!(
        "dance".parse::<BattleAction>(),
        Err(BattleError::UnknownAction("dance".to_string()))
    );
}
