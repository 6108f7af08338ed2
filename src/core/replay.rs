use crate::core::battle::{BattleOptions, BattleSession};
use crate::core::state::{BattleHistory, Combatant};
use crate::core::utils::sequence_source;
use crate::error::BattleError;

/// Re-runs a recorded battle from its starting combatants.
pub fn replay_battle(
    player: &Combatant,
    opponent: &Combatant,
    history: &BattleHistory,
) -> Result<BattleSession, BattleError> {
    let mut session = BattleSession::new(
        player.clone(),
        opponent.clone(),
        BattleOptions { record_history: false },
    );
    for turn in &history.turns {
        let mut rng = sequence_source(turn.rng.clone(), 0.5);
        session.step(&turn.actions, &mut rng)?;
    }
    Ok(session)
}
