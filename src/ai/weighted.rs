//! Weighted-random action policy for the computer-controlled side.

use serde::{Deserialize, Serialize};

use crate::core::state::{BattleAction, Combatant};

/// Relative weights; they need not sum to anything in particular.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActionWeights {
    pub attack: f64,
    pub heal: f64,
    pub defend: f64,
    pub special: f64,
}

pub const BASE_WEIGHTS: ActionWeights = ActionWeights {
    attack: 40.0,
    heal: 10.0,
    defend: 30.0,
    special: 25.0,
};

pub const LOW_HP_HEAL_WEIGHT: f64 = 50.0;
pub const HIGH_HP_HEAL_WEIGHT: f64 = 5.0;
pub const THREATENED_DEFEND_WEIGHT: f64 = 30.0;
pub const SPECIALIST_SPECIAL_WEIGHT: f64 = 35.0;

impl ActionWeights {
    /// Adjusts [`BASE_WEIGHTS`] for the computer's situation.
    pub fn for_state(own: &Combatant, opponent: &Combatant) -> Self {
        let mut weights = BASE_WEIGHTS;
        let hp = own.hp_fraction();

        if hp < 0.35 {
            weights.heal = LOW_HP_HEAL_WEIGHT;
        } else if hp > 0.8 {
            weights.heal = HIGH_HP_HEAL_WEIGHT;
        }

        if opponent.stats.attack > own.stats.defense || hp < 0.25 {
            weights.defend = THREATENED_DEFEND_WEIGHT;
        }

        if own.stats.special_attack > own.stats.attack {
            weights.special = SPECIALIST_SPECIAL_WEIGHT;
        }

        weights
    }

    pub fn weight(&self, action: BattleAction) -> f64 {
        match action {
            BattleAction::Attack => self.attack,
            BattleAction::Heal => self.heal,
            BattleAction::Defend => self.defend,
            BattleAction::Special => self.special,
        }
    }

    pub fn total(&self) -> f64 {
        BattleAction::ALL
            .iter()
            .map(|a| self.weight(*a).max(0.0))
            .sum()
    }

    /// Weighted draw over attack, heal, defend, special (in that order).
    /// A draw of 1.0 lands in the last non-zero bucket; attack is the
    /// fallback only when every weight is zero.
    pub fn sample(&self, rng: &mut dyn FnMut() -> f64) -> BattleAction {
        let total = self.total();
        if total <= 0.0 || !total.is_finite() {
            return BattleAction::Attack;
        }
        let pick = rng().clamp(0.0, 1.0) * total;
        let mut cumulative = 0.0;
        let mut last = BattleAction::Attack;
        for action in BattleAction::ALL {
            let weight = self.weight(action).max(0.0);
            if weight == 0.0 {
                continue;
            }
            cumulative += weight;
            last = action;
            if pick < cumulative {
                return action;
            }
        }
        last
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ComputerChoice {
    pub action: BattleAction,
    pub description: String,
}

pub fn choose_computer_action(
    own: &Combatant,
    opponent: &Combatant,
    rng: &mut dyn FnMut() -> f64,
) -> ComputerChoice {
    let weights = ActionWeights::for_state(own, opponent);
    let action = weights.sample(rng);
    tracing::debug!(?weights, %action, computer = %own.name, "computer action chosen");
    ComputerChoice {
        action,
        description: describe_choice(&own.name, action),
    }
}

fn describe_choice(name: &str, action: BattleAction) -> String {
    match action {
        BattleAction::Attack => format!("{} prepares to attack!", name),
        BattleAction::Special => format!("{} is charging a special move!", name),
        BattleAction::Defend => format!("{} braces for impact!", name),
        BattleAction::Heal => format!("{} decides to recover!", name),
    }
}
