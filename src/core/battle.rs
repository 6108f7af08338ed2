use crate::ai::weighted::choose_computer_action;
use crate::core::state::{
    ActionOutcome, BattleAction, BattleHistory, BattleTurn, Combatant, Side, TurnAction,
};
use crate::core::utils::{pick_index, roll_range};
use crate::error::BattleError;

pub const ATTACK_JITTER: (i32, i32) = (-5, 5);
pub const SPECIAL_JITTER: (i32, i32) = (-3, 8);
pub const SPECIAL_SCALE: f64 = 1.3;
pub const HEAL_FRACTION: f64 = 0.2;
/// Label for a special attack when the attacker knows no moves.
pub const PLACEHOLDER_MOVE: &str = "Special Attack";

/// `max(1, floor(atk * atkMult + jitter - def * defMult))`
pub fn attack_damage(attacker: &Combatant, defender: &Combatant, jitter: i32) -> u32 {
    let raw = attacker.stats.attack as f64 * attacker.attack_multiplier + jitter as f64
        - defender.stats.defense as f64 * defender.defense_multiplier;
    clamp_damage(raw)
}

/// `max(1, floor((spAtk * atkMult + jitter - spDef * defMult) * 1.3))`
pub fn special_damage(attacker: &Combatant, defender: &Combatant, jitter: i32) -> u32 {
    let raw = (attacker.stats.special_attack as f64 * attacker.attack_multiplier + jitter as f64
        - defender.stats.special_defense as f64 * defender.defense_multiplier)
        * SPECIAL_SCALE;
    clamp_damage(raw)
}

pub fn heal_amount(max_hp: u32) -> u32 {
    (max_hp as f64 * HEAL_FRACTION).floor() as u32
}

fn clamp_damage(raw: f64) -> u32 {
    let floored = raw.floor();
    if floored < 1.0 {
        1
    } else {
        floored as u32
    }
}

/// Applies a hit to `target`, consuming its defensive stance.
/// Returns the damage actually dealt and whether the stance absorbed half.
fn apply_hit(target: &mut Combatant, damage: u32) -> (u32, bool) {
    let (damage, defended) = if target.defending {
        target.defending = false;
        ((damage / 2).max(1), true)
    } else {
        (damage, false)
    };
    target.current_hp = target.current_hp.saturating_sub(damage);
    (damage, defended)
}

fn hit_log(actor: &str, target: &Combatant, headline: String, defended: bool) -> String {
    let mut log = headline;
    if defended {
        log.push_str(&format!(" {} braced and took only half!", target.name));
    }
    if target.is_fainted() {
        log.push_str(&format!(" {} fainted! {} wins!", target.name, actor));
    }
    log
}

/// Resolves one action of `actor` against `target`, mutating both in place.
///
/// Special attacks draw the move label first, then the jitter.
pub fn resolve_action(
    action: BattleAction,
    actor: &mut Combatant,
    target: &mut Combatant,
    rng: &mut dyn FnMut() -> f64,
) -> Result<ActionOutcome, BattleError> {
    if actor.is_fainted() {
        return Err(BattleError::Fainted(actor.name.clone()));
    }
    if target.is_fainted() {
        return Err(BattleError::BattleOver);
    }

    let outcome = match action {
        BattleAction::Attack => {
            let jitter = roll_range(rng, ATTACK_JITTER.0, ATTACK_JITTER.1);
            let raw = attack_damage(actor, target, jitter);
            let (damage, defended) = apply_hit(target, raw);
            let headline = format!("{} attacks {} for {} damage!", actor.name, target.name, damage);
            ActionOutcome {
                action,
                actor: actor.name.clone(),
                target: target.name.clone(),
                damage,
                healed: 0,
                new_hp: target.current_hp,
                fainted: target.is_fainted(),
                move_name: None,
                defended,
                log: hit_log(&actor.name, target, headline, defended),
            }
        }
        BattleAction::Special => {
            let move_name = pick_index(rng, actor.moves.len())
                .map(|idx| actor.moves[idx].clone())
                .unwrap_or_else(|| PLACEHOLDER_MOVE.to_string());
            let jitter = roll_range(rng, SPECIAL_JITTER.0, SPECIAL_JITTER.1);
            let raw = special_damage(actor, target, jitter);
            let (damage, defended) = apply_hit(target, raw);
            let headline = format!(
                "{} used {} on {} for {} damage!",
                actor.name, move_name, target.name, damage
            );
            ActionOutcome {
                action,
                actor: actor.name.clone(),
                target: target.name.clone(),
                damage,
                healed: 0,
                new_hp: target.current_hp,
                fainted: target.is_fainted(),
                move_name: Some(move_name),
                defended,
                log: hit_log(&actor.name, target, headline, defended),
            }
        }
        BattleAction::Defend => {
            actor.defending = true;
            ActionOutcome {
                action,
                actor: actor.name.clone(),
                target: target.name.clone(),
                damage: 0,
                healed: 0,
                new_hp: actor.current_hp,
                fainted: false,
                move_name: None,
                defended: false,
                log: format!("{} takes a defensive stance!", actor.name),
            }
        }
        BattleAction::Heal => {
            let before = actor.current_hp;
            actor.current_hp = before.saturating_add(heal_amount(actor.max_hp)).min(actor.max_hp);
            let healed = actor.current_hp - before;
            let log = if healed == 0 {
                format!("{} is already at full health!", actor.name)
            } else {
                format!("{} restored {} HP!", actor.name, healed)
            };
            ActionOutcome {
                action,
                actor: actor.name.clone(),
                target: target.name.clone(),
                damage: 0,
                healed,
                new_hp: actor.current_hp,
                fainted: false,
                move_name: None,
                defended: false,
                log,
            }
        }
    };

    tracing::debug!(
        action = %outcome.action,
        actor = %outcome.actor,
        damage = outcome.damage,
        healed = outcome.healed,
        new_hp = outcome.new_hp,
        "action resolved"
    );
    Ok(outcome)
}

#[derive(Clone, Debug)]
pub struct BattleOptions {
    pub record_history: bool,
}

impl Default for BattleOptions {
    fn default() -> Self {
        Self { record_history: true }
    }
}

/// A two-sided battle: the player acts first each turn, then the opponent.
#[derive(Clone, Debug)]
pub struct BattleSession {
    pub player: Combatant,
    pub opponent: Combatant,
    pub turn: u32,
    pub log: Vec<String>,
    pub history: Option<BattleHistory>,
}

impl BattleSession {
    /// Both combatants start at full HP with no stance.
    pub fn new(mut player: Combatant, mut opponent: Combatant, options: BattleOptions) -> Self {
        player.reset();
        opponent.reset();
        let log = vec![format!("Battle begins! {} vs {}!", player.name, opponent.name)];
        Self {
            player,
            opponent,
            turn: 0,
            log,
            history: options.record_history.then(BattleHistory::default),
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn pair_mut(&mut self, side: Side) -> (&mut Combatant, &mut Combatant) {
        match side {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    pub fn is_over(&self) -> bool {
        self.player.is_fainted() || self.opponent.is_fainted()
    }

    pub fn winner(&self) -> Option<Side> {
        if self.opponent.is_fainted() {
            Some(Side::Player)
        } else if self.player.is_fainted() {
            Some(Side::Opponent)
        } else {
            None
        }
    }

    fn resolve_recorded(
        &mut self,
        side: Side,
        action: BattleAction,
        rng: &mut dyn FnMut() -> f64,
        draws: &mut Vec<f64>,
    ) -> Result<ActionOutcome, BattleError> {
        let mut recorder = || {
            let v = rng();
            draws.push(v);
            v
        };
        let (actor, target) = self.pair_mut(side);
        actor.begin_turn();
        resolve_action(action, actor, target, &mut recorder)
    }

    fn finish_turn(&mut self, actions: Vec<TurnAction>, lines: Vec<String>, draws: Vec<f64>) {
        self.turn += 1;
        self.log.extend(lines.iter().cloned());
        if let Some(history) = self.history.as_mut() {
            history.turns.push(BattleTurn {
                turn: self.turn,
                actions,
                log: lines,
                rng: draws,
            });
        }
        tracing::info!(turn = self.turn, over = self.is_over(), "battle turn finished");
    }

    /// Resolves one action, logging its intent line (if any) ahead of the
    /// result.
    fn take_action(
        &mut self,
        turn_action: TurnAction,
        rng: &mut dyn FnMut() -> f64,
        draws: &mut Vec<f64>,
        lines: &mut Vec<String>,
        taken: &mut Vec<TurnAction>,
    ) -> Result<ActionOutcome, BattleError> {
        let outcome = self.resolve_recorded(turn_action.side, turn_action.action, rng, draws)?;
        if let Some(intent) = &turn_action.intent {
            lines.push(intent.clone());
        }
        lines.push(outcome.log.clone());
        taken.push(turn_action);
        Ok(outcome)
    }

    /// Resolves the given actions in order as one turn. Actions after the
    /// battle ends are skipped.
    pub fn step(
        &mut self,
        actions: &[TurnAction],
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<Vec<ActionOutcome>, BattleError> {
        if self.is_over() {
            return Err(BattleError::BattleOver);
        }
        let mut draws = Vec::new();
        let mut lines = Vec::new();
        let mut outcomes = Vec::new();
        let mut taken = Vec::new();
        for turn_action in actions {
            if self.is_over() {
                break;
            }
            let outcome =
                self.take_action(turn_action.clone(), rng, &mut draws, &mut lines, &mut taken)?;
            outcomes.push(outcome);
        }
        self.finish_turn(taken, lines, draws);
        Ok(outcomes)
    }

    /// The player's action, then the computer's reply if it is still standing.
    ///
    /// The computer picks after the player's action lands. Its choice draws
    /// from `rng` but is not recorded; the chosen action and its intent line
    /// are, so a replay reproduces the turn and its log exactly.
    pub fn play_turn(
        &mut self,
        player_action: BattleAction,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<Vec<ActionOutcome>, BattleError> {
        if self.is_over() {
            return Err(BattleError::BattleOver);
        }
        let mut draws = Vec::new();
        let mut lines = Vec::new();
        let mut outcomes = Vec::new();
        let mut taken = Vec::new();
        let player = TurnAction::new(Side::Player, player_action);
        outcomes.push(self.take_action(player, rng, &mut draws, &mut lines, &mut taken)?);

        if !self.is_over() {
            let choice = choose_computer_action(&self.opponent, &self.player, rng);
            let reply = TurnAction::announced(Side::Opponent, choice.action, choice.description);
            outcomes.push(self.take_action(reply, rng, &mut draws, &mut lines, &mut taken)?);
        }

        self.finish_turn(taken, lines, draws);
        Ok(outcomes)
    }
}
