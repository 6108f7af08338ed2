use crate::ai::weighted::choose_computer_action;
use crate::core::battle::{BattleOptions, BattleSession};
use crate::core::state::Combatant;

pub const MAX_AUTO_TURNS: u32 = 100;

/// Lets the weighted policy play both sides until someone faints or the
/// turn cap is hit. The opponent picks its reply after the player's action
/// lands, as in an interactive turn.
pub fn run_auto_battle(
    player: &Combatant,
    opponent: &Combatant,
    rng: &mut dyn FnMut() -> f64,
) -> BattleSession {
    let mut session = BattleSession::new(player.clone(), opponent.clone(), BattleOptions::default());
    while !session.is_over() && session.turn < MAX_AUTO_TURNS {
        let player_choice = choose_computer_action(&session.player, &session.opponent, rng);
        if session.play_turn(player_choice.action, rng).is_err() {
            break;
        }
    }
    session
}
