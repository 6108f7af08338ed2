mod common;

use common::{constant, fighter};
use pokeview::ai::weighted::BASE_WEIGHTS;
use pokeview::{choose_computer_action, ActionWeights, BattleAction};
use pretty_assertions::assert_eq;

#[test]
fn full_health_specialist_under_threat() {
    let own = fighter("Alakazam", 100, 50, 45, 135, 95);
    let opponent = fighter("Machamp", 90, 130, 80, 65, 85);

    let weights = ActionWeights::for_state(&own, &opponent);

    assert_eq!(
        weights,
        ActionWeights {
            attack: 40.0,
            heal: 5.0,
            defend: 30.0,
            special: 35.0,
        }
    );
}

#[test]
fn low_health_favours_healing() {
    let mut own = fighter("Pidgey", 100, 45, 40, 35, 35);
    own.current_hp = 30;
    let opponent = fighter("Rattata", 100, 40, 35, 25, 35);

    let weights = ActionWeights::for_state(&own, &opponent);

    assert_eq!(weights.heal, 50.0);
    assert_eq!(weights.defend, 30.0);
    assert_eq!(weights.special, BASE_WEIGHTS.special);
}

#[test]
fn mid_health_keeps_base_heal() {
    let mut own = fighter("Pidgey", 100, 45, 40, 35, 35);
    own.current_hp = 50;
    let opponent = fighter("Rattata", 100, 40, 45, 25, 35);

    assert_eq!(ActionWeights::for_state(&own, &opponent), BASE_WEIGHTS);
}

#[test]
fn sample_walks_attack_heal_defend_special() {
    // Cumulative bounds over 105: 40, 50, 80, 105.
    assert_eq!(BASE_WEIGHTS.total(), 105.0);
    assert_eq!(BASE_WEIGHTS.sample(&mut constant(0.0)), BattleAction::Attack);
    assert_eq!(BASE_WEIGHTS.sample(&mut constant(0.38)), BattleAction::Attack);
    assert_eq!(BASE_WEIGHTS.sample(&mut constant(0.40)), BattleAction::Heal);
    assert_eq!(BASE_WEIGHTS.sample(&mut constant(0.50)), BattleAction::Defend);
    assert_eq!(BASE_WEIGHTS.sample(&mut constant(0.90)), BattleAction::Special);
    assert_eq!(BASE_WEIGHTS.sample(&mut constant(0.9999)), BattleAction::Special);
}

#[test]
fn zero_weights_are_never_picked() {
    let heal_only = ActionWeights {
        attack: 0.0,
        heal: 10.0,
        defend: 0.0,
        special: 0.0,
    };
    for r in [0.0, 0.3, 0.7, 0.999] {
        assert_eq!(heal_only.sample(&mut constant(r)), BattleAction::Heal);
    }
}

#[test]
fn all_zero_weights_fall_back_to_attack() {
    let none = ActionWeights {
        attack: 0.0,
        heal: 0.0,
        defend: 0.0,
        special: 0.0,
    };
    assert_eq!(none.sample(&mut constant(0.6)), BattleAction::Attack);
}

#[test]
fn choice_comes_with_a_description() {
    let own = fighter("Charmander", 100, 50, 50, 50, 50);
    let opponent = fighter("Squirtle", 100, 50, 50, 50, 50);

    // Weights 40/5/30/25: 0.5 * 100 = 50 lands in defend.
    let choice = choose_computer_action(&own, &opponent, &mut constant(0.5));
    assert_eq!(choice.action, BattleAction::Defend);
    assert_eq!(choice.description, "Charmander braces for impact!");

    let choice = choose_computer_action(&own, &opponent, &mut constant(0.1));
    assert_eq!(choice.action, BattleAction::Attack);
    assert_eq!(choice.description, "Charmander prepares to attack!");
}

#[test]
fn top_of_range_draw_lands_in_last_bucket() {
    assert_eq!(BASE_WEIGHTS.sample(&mut constant(1.0)), BattleAction::Special);

    let no_special = ActionWeights {
        special: 0.0,
        ..BASE_WEIGHTS
    };
    assert_eq!(no_special.sample(&mut constant(1.0)), BattleAction::Defend);

    let heal_only = ActionWeights {
        attack: 0.0,
        heal: 10.0,
        defend: 0.0,
        special: 0.0,
    };
    assert_eq!(heal_only.sample(&mut constant(1.0)), BattleAction::Heal);
}
